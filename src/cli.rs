use crate::cipher::{transform_fn, Algorithm, Mode};
use crate::error::Result;
use crate::transform::transform_file;
use std::path::Path;

/// Options shared by the encode and decode commands
#[derive(Debug, Clone, Default)]
pub struct CipherOptions {
    pub algorithm: Algorithm,
    /// Caesar offset; ignored by the mirror cipher
    pub key: Option<i32>,
}

/// Run one cipher pass over `input_path`, writing the result to
/// `output_path`.
pub fn run_cipher(
    input_path: &Path,
    output_path: &Path,
    mode: Mode,
    options: &CipherOptions,
) -> Result<()> {
    let map = transform_fn(options.algorithm, mode, options.key)?;
    transform_file(input_path, output_path, map)
}
