//! A growable, reusable byte sink used to stage page payloads before they
//! are compressed or RLE-encoded, and to drain Thrift-serialized metadata
//! structs before they hit the output file.
//!
//! Two instances of this buffer are owned by the column writer and reused
//! across every column: one for the uncompressed staging area, one for the
//! compressed (or RLE-encoded) output. Reuse avoids a fresh allocation per
//! column; correctness only depends on `resize` + `reset`, not on buffer
//! identity.

use std::io::Write;

/// A `Vec<u8>`-backed staging buffer with an explicit logical length distinct
/// from capacity, so callers can pre-size it once and `reset()` between uses
/// without releasing the underlying allocation.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    data: Vec<u8>,
    len: usize,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures the buffer can hold at least `n` bytes and sets the logical
    /// length to 0. Callers pre-size to the exact final length for plain
    /// pages, and to the RLE/bit-pack upper bound for index pages.
    pub fn resize(&mut self, n: usize) {
        if self.data.len() < n {
            self.data.resize(n, 0);
        }
        self.len = 0;
    }

    /// Resets the logical length to 0 without releasing capacity.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// The current logical length (bytes written since the last `reset`).
    pub fn tell(&self) -> usize {
        self.len
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Ensures at least `n` bytes of backing capacity and returns the whole
    /// `n`-byte window for in-place writes by callers (e.g. a compressor)
    /// that need a pre-allocated destination slice rather than `Write::write`.
    /// Pair with [`ByteBuffer::set_len`] once the actual length is known.
    pub fn reserve_exact(&mut self, n: usize) -> &mut [u8] {
        if self.data.len() < n {
            self.data.resize(n, 0);
        }
        &mut self.data[..n]
    }

    /// Sets the logical length directly; used after writing through
    /// [`ByteBuffer::reserve_exact`].
    pub fn set_len(&mut self, n: usize) {
        self.len = n;
    }

    /// Appends `bytes`, growing the backing allocation if needed. Writers
    /// that pre-`resize` to the exact expected length never hit this growth
    /// path; it exists so the buffer is safe to use even when the caller
    /// under-estimates.
    pub fn write(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[self.len..end].copy_from_slice(bytes);
        self.len = end;
    }
}

impl Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        ByteBuffer::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_accumulates_and_reset_clears() {
        let mut buf = ByteBuffer::new();
        buf.resize(4);
        buf.write(&[1, 2]);
        buf.write(&[3, 4]);
        assert_eq!(buf.tell(), 4);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);

        buf.reset();
        assert_eq!(buf.tell(), 0);
        assert_eq!(buf.as_slice(), &[] as &[u8]);
    }

    #[test]
    fn resize_preserves_capacity_across_reuse() {
        let mut buf = ByteBuffer::new();
        buf.resize(1024);
        let cap_after_first = buf.data.capacity();
        buf.write(&vec![0u8; 1024]);
        buf.reset();
        buf.resize(1024);
        assert_eq!(buf.data.capacity(), cap_after_first);
    }

    #[test]
    fn grows_past_pre_sized_length_if_needed() {
        let mut buf = ByteBuffer::new();
        buf.resize(1);
        buf.write(&[1, 2, 3]);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }
}
