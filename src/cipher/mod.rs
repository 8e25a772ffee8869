//! Cipher selection and the code point domain shared by the ciphers.

pub mod caesar;
pub mod mirror;

pub use caesar::Caesar;
pub use mirror::{mirror_byte, mirror_code_point, mirror_latin1, MAX_LATIN1};

use crate::error::{CipherStreamError, Result};

/// Number of valid Unicode scalar values: code points `0..=0x10FFFF` minus
/// the 2048 surrogates, which a `char` cannot hold.
pub(crate) const DOMAIN: u32 = 0x11_0000 - 0x800;

/// Index of a scalar in the contiguous, surrogate-free domain.
pub(crate) fn scalar_index(c: char) -> u32 {
    let v = c as u32;
    if v >= 0xE000 {
        v - 0x800
    } else {
        v
    }
}

/// Scalar at `index` in the contiguous domain. Inverse of `scalar_index`.
pub(crate) fn scalar_at(index: u32) -> char {
    debug_assert!(index < DOMAIN);
    let v = if index >= 0xD800 { index + 0x800 } else { index };
    char::from_u32(v).expect("index below DOMAIN maps around the surrogate block")
}

/// Cipher algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    Caesar,
    Mirror,
}

impl std::str::FromStr for Algorithm {
    type Err = CipherStreamError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "caesar" => Ok(Self::Caesar),
            "mirror" => Ok(Self::Mirror),
            _ => Err(CipherStreamError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Direction of a transform run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

/// Resolve algorithm, mode and optional key into the code point mapping the
/// transform engine applies.
///
/// Caesar requires a nonzero key; mirror ignores the key and is its own
/// inverse, so both modes produce the same mapping.
pub fn transform_fn(
    algorithm: Algorithm,
    mode: Mode,
    key: Option<i32>,
) -> Result<Box<dyn Fn(char) -> char>> {
    match algorithm {
        Algorithm::Caesar => {
            let key = key.ok_or(CipherStreamError::MissingKey)?;
            let cipher = Caesar::new(key)?;
            Ok(match mode {
                Mode::Encode => Box::new(move |c| cipher.encode(c)),
                Mode::Decode => Box::new(move |c| cipher.decode(c)),
            })
        }
        Algorithm::Mirror => Ok(Box::new(mirror_code_point)),
    }
}
