#![forbid(unsafe_code)]
//! A minimal, single-row-group Parquet writer.
//!
//! This crate writes exactly one row group per file, flat schemas of
//! `REQUIRED` leaf columns only, `PLAIN` and `RLE_DICTIONARY` encodings, and
//! `UNCOMPRESSED`/`SNAPPY` compression. It does not read Parquet files, and it
//! does not support nested or optional columns, statistics, bloom filters, or
//! encryption — see [`write::ParquetWriter`] for what it does do.
//!
//! Callers supply column data through [`provider::ValueProvider`], a
//! pull-based trait the writer calls into column by column, rather than
//! handing the writer pre-built in-memory columns.

#[macro_use]
pub mod error;
pub mod buffer;
pub mod compression;
pub mod encoding;
pub mod metadata;
pub mod provider;
pub mod schema;
mod thrift_io;
pub mod write;

pub use error::{ParquetError, Result};
pub use provider::ValueProvider;
pub use write::ParquetWriter;

const FOOTER_SIZE: u64 = 8;
const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];
