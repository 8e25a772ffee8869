//! The buffered streaming transform engine.
//!
//! Bytes flow source → input accumulator → decode → map → re-encode →
//! output accumulator → sink. A multi-byte code point may be split across
//! two fills: the pass keeps the truncated tail at the start of the input
//! accumulator and the next fill appends the remaining bytes after it. A
//! pass that fails on its very first code point gets exactly one more fill
//! to resolve; failing again is fatal.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::buffer::Accumulator;
use crate::error::{CipherStreamError, Result};

/// Fill size of the input accumulator.
pub const READ_BUFFER_SIZE: usize = 4 * 1024;
/// A code point re-encodes to at most four bytes, so four times the read
/// size always holds one pass worth of output.
pub const WRITE_BUFFER_SIZE: usize = 4 * READ_BUFFER_SIZE;

/// Result of one decode pass over the input accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassOutcome {
    /// Every byte decoded; the input accumulator is empty.
    Complete,
    /// The code point at `decoded` could not be decoded. Its bytes have been
    /// moved to the start of the input accumulator; `decoded` counts the
    /// code points transformed before it.
    Truncated { decoded: usize },
}

/// Decode the longest valid UTF-8 prefix of the unread bytes, map each code
/// point, and append the re-encoded results to `output`.
///
/// A truncated tail and genuinely invalid bytes are classified the same
/// here; only the repeated-failure policy in the loop separates them.
fn transform_pass<F>(input: &mut Accumulator, output: &mut Accumulator, map: &F) -> PassOutcome
where
    F: Fn(char) -> char + ?Sized,
{
    let unread = input.unread();
    let valid_len = match std::str::from_utf8(unread) {
        Ok(_) => unread.len(),
        Err(err) => err.valid_up_to(),
    };
    let complete = valid_len == unread.len();
    let prefix = std::str::from_utf8(&unread[..valid_len]).expect("prefix validated above");

    let mut decoded = 0;
    for c in prefix.chars() {
        output.push_char(map(c));
        decoded += 1;
    }

    if complete {
        input.clear();
        PassOutcome::Complete
    } else {
        input.advance(valid_len);
        input.compact();
        PassOutcome::Truncated { decoded }
    }
}

/// Transform `reader` into `writer` using caller-supplied accumulators.
///
/// The input accumulator's capacity bounds how much is read per pass; the
/// output accumulator should hold four bytes per input byte so a pass never
/// reallocates.
pub fn transform_buffers<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    input: &mut Accumulator,
    output: &mut Accumulator,
    map: &F,
) -> Result<()>
where
    R: Read,
    W: Write,
    F: Fn(char) -> char + ?Sized,
{
    // Set when a pass failed on its very first code point; cleared by any
    // forward progress.
    let mut stalled = false;
    loop {
        let read = input.fill_from(reader)?;
        if read == 0 {
            if stalled || !input.is_empty() {
                // A dangling code point that no further fill can complete.
                return Err(CipherStreamError::UnableToTransform);
            }
            return Ok(());
        }

        match transform_pass(input, output, map) {
            PassOutcome::Complete | PassOutcome::Truncated { decoded: 1.. } => {
                stalled = false;
                output.flush_to(writer)?;
            }
            PassOutcome::Truncated { decoded: 0 } => {
                if stalled {
                    return Err(CipherStreamError::UnableToTransform);
                }
                // Nothing was produced this pass; retry once with more bytes.
                stalled = true;
            }
        }
    }
}

/// Transform every code point read from `reader` and write the result to
/// `writer`.
pub fn transform_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    map: impl Fn(char) -> char,
) -> Result<()> {
    let mut input = Accumulator::with_capacity(READ_BUFFER_SIZE);
    let mut output = Accumulator::with_capacity(WRITE_BUFFER_SIZE);
    transform_buffers(reader, writer, &mut input, &mut output, &map)
}

/// Open `input_path`, transform its contents, and write the result to
/// `output_path`, creating or truncating it.
pub fn transform_file(
    input_path: &Path,
    output_path: &Path,
    map: impl Fn(char) -> char,
) -> Result<()> {
    let mut reader = File::open(input_path)?;
    let mut writer = File::create(output_path)?;
    transform_stream(&mut reader, &mut writer, map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::Caesar;
    use std::io::{self, Cursor};

    const OFFSET: i32 = 10;
    const INPUT_CHAR: char = '\u{2708}';

    fn shift(c: char) -> char {
        Caesar::new(OFFSET).unwrap().encode(c)
    }

    fn encoded(c: char) -> Vec<u8> {
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf).as_bytes().to_vec()
    }

    /// Hands out at most `chunk` bytes per read call.
    struct ChunkedReader {
        data: Vec<u8>,
        pos: usize,
        chunk: usize,
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let remaining = &self.data[self.pos..];
            let take = remaining.len().min(self.chunk).min(buf.len());
            buf[..take].copy_from_slice(&remaining[..take]);
            self.pos += take;
            Ok(take)
        }
    }

    #[test]
    fn test_pass_decodes_whole_buffer() {
        let mut input = Accumulator::with_capacity(64);
        input.push_char(INPUT_CHAR);
        input.push_char(INPUT_CHAR);
        let mut output = Accumulator::with_capacity(256);

        let outcome = transform_pass(&mut input, &mut output, &shift);

        assert_eq!(outcome, PassOutcome::Complete);
        assert!(input.is_empty());
        let expected = [encoded(shift(INPUT_CHAR)), encoded(shift(INPUT_CHAR))].concat();
        assert_eq!(output.unread(), &expected[..]);
    }

    #[test]
    fn test_pass_keeps_truncated_tail() {
        let bytes = encoded(INPUT_CHAR);
        let mut input = Accumulator::with_capacity(64);
        input.extend_from_slice(&bytes);
        input.extend_from_slice(&bytes[..2]);
        let mut output = Accumulator::with_capacity(256);

        let outcome = transform_pass(&mut input, &mut output, &shift);

        assert_eq!(outcome, PassOutcome::Truncated { decoded: 1 });
        assert_eq!(input.unread(), &bytes[..2]);
        assert_eq!(output.unread(), &encoded(shift(INPUT_CHAR))[..]);
    }

    #[test]
    fn test_pass_completes_once_missing_byte_arrives() {
        let bytes = encoded(INPUT_CHAR);
        let mut input = Accumulator::with_capacity(64);
        input.extend_from_slice(&bytes);
        input.extend_from_slice(&bytes[..2]);
        let mut output = Accumulator::with_capacity(256);

        let first = transform_pass(&mut input, &mut output, &shift);
        assert_eq!(first, PassOutcome::Truncated { decoded: 1 });

        input.extend_from_slice(&bytes[2..]);
        let second = transform_pass(&mut input, &mut output, &shift);

        assert_eq!(second, PassOutcome::Complete);
        assert!(input.is_empty());
        let expected = [encoded(shift(INPUT_CHAR)), encoded(shift(INPUT_CHAR))].concat();
        assert_eq!(output.unread(), &expected[..]);
    }

    #[test]
    fn test_pass_reports_failure_on_first_code_point() {
        let bytes = encoded(INPUT_CHAR);
        let mut input = Accumulator::with_capacity(64);
        input.extend_from_slice(&bytes[..2]);
        let mut output = Accumulator::with_capacity(256);

        let outcome = transform_pass(&mut input, &mut output, &shift);

        assert_eq!(outcome, PassOutcome::Truncated { decoded: 0 });
        assert_eq!(input.unread(), &bytes[..2]);
        assert!(output.is_empty());
    }

    #[test]
    fn test_empty_source_produces_empty_output() {
        let mut source = Cursor::new(Vec::new());
        let mut sink = Vec::new();

        transform_stream(&mut source, &mut sink, shift).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_stream_shifts_code_points() {
        let mut data = encoded(INPUT_CHAR);
        data.extend_from_slice(&encoded(INPUT_CHAR));
        let mut source = Cursor::new(data);
        let mut sink = Vec::new();

        let mut input = Accumulator::with_capacity(64);
        let mut output = Accumulator::with_capacity(256);
        transform_buffers(&mut source, &mut sink, &mut input, &mut output, &shift).unwrap();

        let expected = [encoded(shift(INPUT_CHAR)), encoded(shift(INPUT_CHAR))].concat();
        assert_eq!(sink, expected);
        assert!(input.is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn test_code_point_split_across_fills() {
        // Capacity 4 forces the second airplane to straddle two fills.
        let mut data = encoded(INPUT_CHAR);
        data.extend_from_slice(&encoded(INPUT_CHAR));
        let mut source = Cursor::new(data);
        let mut sink = Vec::new();

        let mut input = Accumulator::with_capacity(4);
        let mut output = Accumulator::with_capacity(16);
        transform_buffers(&mut source, &mut sink, &mut input, &mut output, &shift).unwrap();

        let expected = [encoded(shift(INPUT_CHAR)), encoded(shift(INPUT_CHAR))].concat();
        assert_eq!(sink, expected);
    }

    #[test]
    fn test_one_byte_chunks_match_single_chunk() {
        let text = "aé✈𐍈z";
        let mut whole = Cursor::new(text.as_bytes().to_vec());
        let mut expected = Vec::new();
        transform_stream(&mut whole, &mut expected, shift).unwrap();

        let mut chunked = ChunkedReader {
            data: text.as_bytes().to_vec(),
            pos: 0,
            chunk: 1,
        };
        let mut sink = Vec::new();
        transform_stream(&mut chunked, &mut sink, shift).unwrap();

        assert_eq!(sink, expected);
    }

    #[test]
    fn test_truncated_final_code_point_is_fatal() {
        let bytes = encoded(INPUT_CHAR);
        let mut data = bytes.clone();
        data.extend_from_slice(&bytes[..2]);
        let mut source = Cursor::new(data);
        let mut sink = Vec::new();

        let err = transform_stream(&mut source, &mut sink, shift).unwrap_err();

        assert!(matches!(err, CipherStreamError::UnableToTransform));
        // The complete code point was flushed; the dangling bytes were not.
        assert_eq!(sink, encoded(shift(INPUT_CHAR)));
    }

    #[test]
    fn test_source_of_only_dangling_bytes_is_fatal() {
        let bytes = encoded(INPUT_CHAR);
        let mut source = Cursor::new(bytes[..2].to_vec());
        let mut sink = Vec::new();

        let err = transform_stream(&mut source, &mut sink, shift).unwrap_err();

        assert!(matches!(err, CipherStreamError::UnableToTransform));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_invalid_bytes_mid_stream_are_fatal() {
        let mut data = b"ab".to_vec();
        data.push(0xFF);
        data.extend_from_slice(b"cd");
        let mut source = Cursor::new(data);
        let mut sink = Vec::new();

        let mut input = Accumulator::with_capacity(4);
        let mut output = Accumulator::with_capacity(16);
        let err = transform_buffers(&mut source, &mut sink, &mut input, &mut output, &shift)
            .unwrap_err();

        assert!(matches!(err, CipherStreamError::UnableToTransform));
        // Everything decoded before the invalid byte was still flushed.
        let expected = [encoded(shift('a')), encoded(shift('b'))].concat();
        assert_eq!(sink, expected);
    }

    #[test]
    fn test_all_invalid_source_is_fatal() {
        let mut source = Cursor::new(vec![0xFFu8; 8]);
        let mut sink = Vec::new();

        let mut input = Accumulator::with_capacity(4);
        let mut output = Accumulator::with_capacity(16);
        let err = transform_buffers(&mut source, &mut sink, &mut input, &mut output, &shift)
            .unwrap_err();

        assert!(matches!(err, CipherStreamError::UnableToTransform));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sink_error_propagates() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut source = Cursor::new(b"hello".to_vec());
        let err = transform_stream(&mut source, &mut FailingWriter, shift).unwrap_err();
        assert!(matches!(err, CipherStreamError::Io(_)));
    }
}
