use super::{scalar_at, scalar_index, DOMAIN};
use crate::error::{CipherStreamError, Result};

/// Rotating-offset cipher over the full Unicode scalar domain.
///
/// Shifting runs over the contiguous scalar index space (the surrogate block
/// is excised, since a `char` cannot hold a surrogate) and wraps modulo the
/// domain size, so `decode(encode(c)) == c` for every scalar and every
/// nonzero offset.
#[derive(Debug, Clone, Copy)]
pub struct Caesar {
    /// Offset normalized to a forward shift in `0..DOMAIN`.
    forward: u32,
}

impl Caesar {
    /// A zero offset is rejected: a no-op is not a meaningful cipher.
    pub fn new(offset: i32) -> Result<Self> {
        if offset == 0 {
            return Err(CipherStreamError::ZeroOffset);
        }
        let forward = i64::from(offset).rem_euclid(i64::from(DOMAIN)) as u32;
        Ok(Self { forward })
    }

    /// Shift forward by the offset, wrapping at the end of the domain.
    pub fn encode(&self, c: char) -> char {
        scalar_at((scalar_index(c) + self.forward) % DOMAIN)
    }

    /// Shift backward by the offset, wrapping at the start of the domain.
    pub fn decode(&self, c: char) -> char {
        scalar_at((scalar_index(c) + DOMAIN - self.forward) % DOMAIN)
    }
}
