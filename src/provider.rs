//! The value-provider interface (§6): a pull-based capability set the
//! column writer drives, keyed by column index. This is the Rust
//! reimplementation of what the source expresses as an abstract base class
//! with virtual methods — a capability-set trait instead of a vtable (§9).
//!
//! Every `write_*` call must emit exactly the byte count its paired size
//! query promised; the column writer treats a mismatch as a fatal
//! [`crate::error::ParquetError::SizeMismatch`], never something to retry
//! or silently tolerate.

use std::io::Write;

use crate::error::Result;

/// Supplies typed column data to the writer on demand. Implementors own the
/// in-memory (or streamed) values; the writer never buffers a whole column
/// itself beyond what a single page requires.
pub trait ValueProvider {
    /// Writes exactly `4 * num_rows` bytes of little-endian `i32` values for column `idx`.
    fn write_int32(&mut self, sink: &mut dyn Write, idx: usize) -> Result<()>;

    /// Writes exactly `8 * num_rows` bytes of little-endian IEEE-754 doubles for column `idx`.
    fn write_double(&mut self, sink: &mut dyn Write, idx: usize) -> Result<()>;

    /// Writes `num_rows` records of `(len: u32 le, bytes[len])` for column `idx`;
    /// the total must equal [`ValueProvider::size_byte_array`].
    fn write_byte_array(&mut self, sink: &mut dyn Write, idx: usize) -> Result<()>;

    /// Writes `ceil(num_rows / 8)` bytes of LSB-first-packed booleans for column `idx`.
    fn write_boolean(&mut self, sink: &mut dyn Write, idx: usize) -> Result<()>;

    /// Total PLAIN-encoded byte size (sum of `4 + len` over all rows) for a `BYTE_ARRAY` column.
    fn size_byte_array(&self, idx: usize) -> u32;

    /// Whether this provider can dictionary-encode `BYTE_ARRAY` columns.
    /// Defaults to `false`; a provider that answers `true` must implement
    /// the four dictionary methods below.
    fn has_byte_array_dictionary(&self) -> bool {
        false
    }

    /// Dictionary cardinality for column `idx`.
    fn num_values_byte_array_dictionary(&self, idx: usize) -> u32 {
        unimplemented!("provider does not support dictionary encoding")
    }

    /// PLAIN `BYTE_ARRAY` byte length of the dictionary values for column `idx`.
    fn size_byte_array_dictionary(&self, idx: usize) -> u32 {
        unimplemented!("provider does not support dictionary encoding")
    }

    /// Writes the distinct dictionary values for column `idx` in PLAIN
    /// `BYTE_ARRAY` layout, in dictionary-index order.
    fn write_byte_array_dictionary(&mut self, sink: &mut dyn Write, idx: usize) -> Result<()> {
        let _ = (sink, idx);
        unimplemented!("provider does not support dictionary encoding")
    }

    /// Writes `num_rows` dictionary index values as little-endian `u32`s into
    /// `sink`. The column writer re-encodes these with the RLE/bit-pack
    /// hybrid; this contract (4 bytes per row on the wire to the writer, even
    /// though the final on-disk form is packed) is preserved from the source
    /// implementation (§9 open questions).
    fn write_dictionary_indices(&mut self, sink: &mut dyn Write, idx: usize) -> Result<()> {
        let _ = (sink, idx);
        unimplemented!("provider does not support dictionary encoding")
    }
}
