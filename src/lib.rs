//! Cipherstream - Buffered Streaming Substitution Cipher
//!
//! Transforms the textual contents of a file by applying a per-code-point
//! mapping and writing the result to another file, using bounded buffers
//! rather than loading the whole file into memory.
//!
//! ## Transform Pipeline
//!
//! ```text
//! source bytes → Input Accumulator → decode → map → re-encode → Output Accumulator → sink bytes
//! ```
//!
//! A multi-byte code point may be split across two buffer fills. The engine
//! keeps the truncated tail at the start of the input accumulator, fills
//! again, and retries. Two consecutive failures on the first code point of
//! the buffer (or end of stream with dangling bytes) mean the data can
//! never be decoded and abort the transform with
//! [`CipherStreamError::UnableToTransform`].
//!
//! ## Example
//!
//! ```no_run
//! use cipherstream::cipher::Caesar;
//! use cipherstream::transform::transform_file;
//! use std::path::Path;
//!
//! let cipher = Caesar::new(13).unwrap();
//! transform_file(
//!     Path::new("input.txt"),
//!     Path::new("output.txt"),
//!     move |c| cipher.encode(c),
//! ).unwrap();
//! ```

pub mod buffer;
pub mod cipher;
pub mod cli;
pub mod error;
pub mod transform;

pub use buffer::Accumulator;
pub use cipher::{transform_fn, Algorithm, Caesar, Mode};
pub use error::{CipherStreamError, Result};
pub use transform::{transform_buffers, transform_file, transform_stream};
