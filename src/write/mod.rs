//! Everything involved in producing a Parquet file: per-column page framing
//! ([`column`]) and the top-level driver that ties columns into a finished
//! file ([`file`]).

mod column;
mod file;

pub use file::ParquetWriter;
