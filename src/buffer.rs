use std::io::{self, Read, Write};

/// Byte region with a fixed fill capacity and an explicit read position.
///
/// `fill_from` never reads past the capacity, so bytes preserved from a
/// previous pass are never overwritten. Appending through `push_char` or
/// `extend_from_slice` may grow the region past the capacity; only filling
/// is bounded.
#[derive(Debug, Default)]
pub struct Accumulator {
    buf: Vec<u8>,
    pos: usize,
    capacity: usize,
}

impl Accumulator {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            pos: 0,
            capacity,
        }
    }

    /// Number of unread bytes.
    pub fn len(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill capacity; `fill_from` never grows the region past this.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Unread bytes, oldest first.
    pub fn unread(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Mark `count` bytes as consumed.
    pub fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.len());
        self.pos += count;
    }

    /// Move the unread tail to the start of the region so the next fill
    /// appends after it.
    pub fn compact(&mut self) {
        self.buf.drain(..self.pos);
        self.pos = 0;
    }

    /// Discard everything, consumed and unread.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    /// Append raw bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append the UTF-8 encoding of one code point.
    pub fn push_char(&mut self, c: char) {
        let mut encoded = [0u8; 4];
        self.buf.extend_from_slice(c.encode_utf8(&mut encoded).as_bytes());
    }

    /// Read from `reader` until the region holds `capacity` bytes or the
    /// reader reports end of stream. Returns the number of bytes added.
    ///
    /// The read position must be at zero; callers compact or clear before
    /// filling again.
    pub fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        debug_assert_eq!(self.pos, 0, "fill over an unconsumed read position");
        let preserved = self.buf.len();
        if preserved >= self.capacity {
            return Ok(0);
        }
        let mut len = preserved;
        self.buf.resize(self.capacity, 0);
        let outcome = loop {
            if len == self.capacity {
                break Ok(());
            }
            match reader.read(&mut self.buf[len..]) {
                Ok(0) => break Ok(()),
                Ok(read) => len += read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => break Err(err),
            }
        };
        self.buf.truncate(len);
        outcome.map(|()| len - preserved)
    }

    /// Write all unread bytes to `writer` and clear the region.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.unread())?;
        self.clear();
        Ok(())
    }
}
