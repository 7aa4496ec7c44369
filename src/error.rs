//! Error type returned by this crate.
//!
//! The writer is single-use and fails fast: any [`Error`] aborts `write()`
//! and leaves the output file incomplete. Callers are expected to delete it.

/// The stage of the write pipeline in which a [`ParquetError::SizeMismatch`]
/// occurred, used to make diagnostics actionable without needing a debugger.
/// Covers the two points where this writer takes a byte count on faith from
/// the [`crate::provider::ValueProvider`] and then checks it: the plain
/// encoding path and the dictionary encoding path. Every other stage either
/// can't diverge from its declared size (schema construction, footer framing
/// are driven entirely by this crate's own accounting) or fails through a
/// different variant (compression overflow surfaces as [`ParquetError::OutOfSpec`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Plain,
    Dictionary,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Stage::Plain => "plain encoding",
            Stage::Dictionary => "dictionary encoding",
        };
        write!(fmt, "{}", name)
    }
}

#[derive(Debug)]
pub enum ParquetError {
    /// `write()` was called before `set_num_rows`.
    MissingRowCount,
    /// A logical type outside of {STRING, INTEGER{32, signed}} was requested.
    UnsupportedLogicalType(String),
    /// A physical-type operation was requested that the writer does not support
    /// for that type (e.g. a dictionary page on a non-`BYTE_ARRAY` column).
    UnsupportedPhysicalType { column: usize, message: String },
    /// A compression codec outside of {UNCOMPRESSED, SNAPPY}, or the
    /// dictionary+compressed combination.
    UnsupportedCompression(String),
    /// The value provider declared one byte count and wrote a different one.
    SizeMismatch {
        column: usize,
        stage: Stage,
        expected: usize,
        actual: usize,
    },
    /// Underlying file or buffer I/O failure.
    Io(std::io::Error),
    /// The parquet file being produced would be out of spec: a page larger
    /// than `i32::MAX` bytes (page headers encode sizes as `i32`), or a
    /// Snappy codec failure.
    OutOfSpec(String),
    /// Error surfaced by the Thrift Compact Protocol framer.
    Thrift(String),
}

impl std::error::Error for ParquetError {}

impl std::fmt::Display for ParquetError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParquetError::MissingRowCount => {
                write!(fmt, "set_num_rows must be called before write()")
            }
            ParquetError::UnsupportedLogicalType(message) => write!(fmt, "{}", message),
            ParquetError::UnsupportedPhysicalType { column, message } => {
                write!(fmt, "column {}: {}", column, message)
            }
            ParquetError::UnsupportedCompression(message) => write!(fmt, "{}", message),
            ParquetError::SizeMismatch {
                column,
                stage,
                expected,
                actual,
            } => write!(
                fmt,
                "column {}: {} stage declared {} bytes but wrote {}",
                column, stage, expected, actual
            ),
            ParquetError::Io(e) => write!(fmt, "underlying IO error: {}", e),
            ParquetError::OutOfSpec(message) => write!(fmt, "{}", message),
            ParquetError::Thrift(message) => write!(fmt, "underlying thrift error: {}", message),
        }
    }
}

#[cfg(feature = "snappy")]
impl From<snap::Error> for ParquetError {
    fn from(e: snap::Error) -> ParquetError {
        ParquetError::OutOfSpec(format!("underlying snap error: {}", e))
    }
}

impl From<parquet_format_async_temp::thrift::Error> for ParquetError {
    fn from(e: parquet_format_async_temp::thrift::Error) -> ParquetError {
        ParquetError::Thrift(e.to_string())
    }
}

impl From<std::io::Error> for ParquetError {
    fn from(e: std::io::Error) -> ParquetError {
        ParquetError::Io(e)
    }
}

/// A specialized `Result` for Parquet errors.
pub type Result<T> = std::result::Result<T, ParquetError>;

macro_rules! out_of_spec {
    ($fmt:expr) => ($crate::error::ParquetError::OutOfSpec($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => ($crate::error::ParquetError::OutOfSpec(format!($fmt, $($args),*)));
}
