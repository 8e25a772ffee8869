use super::{scalar_at, scalar_index, DOMAIN};
use crate::error::{CipherStreamError, Result};

/// Upper bound of the Latin-1 mirror range.
pub const MAX_LATIN1: char = '\u{FF}';

/// Mirror a scalar across the full Unicode scalar domain.
///
/// Self-inverse and total, so it serves as both the encode and decode
/// mapping of the mirror algorithm.
pub fn mirror_code_point(c: char) -> char {
    scalar_at(DOMAIN - 1 - scalar_index(c))
}

/// Mirror a scalar within `[0, 0xFF]`. Anything above the Latin-1 range is
/// a usage error.
pub fn mirror_latin1(c: char) -> Result<char> {
    if c > MAX_LATIN1 {
        return Err(CipherStreamError::OutsideLatin1(c));
    }
    Ok(char::from_u32(MAX_LATIN1 as u32 - c as u32).expect("mirror stays within Latin-1"))
}

/// Mirror a byte within `[0, 255]`.
pub fn mirror_byte(b: u8) -> u8 {
    u8::MAX - b
}
