//! The top-level driver (§4.5): file magic, schema construction, dispatching
//! column writes, footer assembly, final close.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use parquet_format_async_temp::{FileMetaData, KeyValue, RowGroup};

use crate::buffer::ByteBuffer;
use crate::compression::Compression;
use crate::error::{ParquetError, Result};
use crate::metadata::{ColumnState, EncodingChoice};
use crate::provider::ValueProvider;
use crate::schema::{self, LogicalTypeAnnotation, PhysicalType, SchemaColumn};
use crate::thrift_io::write_to_thrift;
use crate::PARQUET_MAGIC;

use super::column::write_column;

/// Identifies this writer in `FileMetaData.created_by`.
const CREATED_BY: &str = "nanoparquet-rs";

/// A single-use, single-row-group Parquet writer (§3 "Lifecycle").
///
/// Construct with [`ParquetWriter::new`], configure with `set_num_rows`,
/// `schema_add_column*` and `add_key_value_metadata`, then finalize with
/// [`ParquetWriter::write`]. The writer owns its output file exclusively and
/// is not reentrant (§5); after `write()` the file is closed and further
/// calls are undefined.
pub struct ParquetWriter {
    file: File,
    codec: Compression,
    num_rows: Option<u32>,
    columns: Vec<ColumnState>,
    kv_metadata: Vec<KeyValue>,
    buf_unc: ByteBuffer,
    buf_com: ByteBuffer,
}

impl ParquetWriter {
    /// Opens `path` for writing and selects the compression codec applied to
    /// every column added with `dict: false` and a non-dictionary request.
    pub fn new(path: impl AsRef<Path>, codec: Compression) -> Result<Self> {
        Ok(Self {
            file: File::create(path)?,
            codec,
            num_rows: None,
            columns: Vec::new(),
            kv_metadata: Vec::new(),
            buf_unc: ByteBuffer::new(),
            buf_com: ByteBuffer::new(),
        })
    }

    /// Sets the row count every column must supply exactly. Must be called
    /// before [`ParquetWriter::write`] (§3 "Lifecycle").
    pub fn set_num_rows(&mut self, num_rows: u32) {
        self.num_rows = Some(num_rows);
    }

    /// Adds a leaf column identified by a bare physical type (no logical
    /// type annotation), always PLAIN-encoded.
    pub fn schema_add_column(&mut self, name: impl Into<String>, physical_type: PhysicalType) {
        self.columns.push(ColumnState {
            schema: SchemaColumn {
                name: name.into(),
                physical_type,
                converted_type: None,
                logical_type: None,
            },
            encoding: EncodingChoice::Plain,
            codec: self.codec,
        });
    }

    /// Adds a leaf column identified by a logical type (§4.6), optionally
    /// requesting dictionary encoding. Dictionary encoding is only legal for
    /// the `STRING` logical type, since it is the only one that resolves to
    /// `BYTE_ARRAY` (§3 "Encoding choice").
    pub fn schema_add_column_logical(
        &mut self,
        name: impl Into<String>,
        logical_type: LogicalTypeAnnotation,
        dict: bool,
    ) -> Result<()> {
        let (physical_type, converted_type, thrift_logical) = logical_type.resolve()?;

        if dict && physical_type != PhysicalType::ByteArray {
            return Err(ParquetError::UnsupportedPhysicalType {
                column: self.columns.len(),
                message: "dictionary encoding is only supported for BYTE_ARRAY columns"
                    .to_string(),
            });
        }

        self.columns.push(ColumnState {
            schema: SchemaColumn {
                name: name.into(),
                physical_type,
                converted_type: Some(converted_type),
                logical_type: Some(thrift_logical),
            },
            encoding: if dict {
                EncodingChoice::RleDictionary
            } else {
                EncodingChoice::Plain
            },
            codec: self.codec,
        });
        Ok(())
    }

    /// Appends a key/value pair to the footer's `KeyValueMetadata`.
    pub fn add_key_value_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.kv_metadata.push(KeyValue {
            key: key.into(),
            value: Some(value.into()),
        });
    }

    /// Runs the write sequence described in §4.5: magic, columns, footer,
    /// trailing magic. Consumes the writer; the file is closed on return
    /// (success or failure — a failed write leaves a file the caller must
    /// delete, per §5 and §7).
    pub fn write<P: ValueProvider + ?Sized>(mut self, provider: &mut P) -> Result<()> {
        let num_rows = self.num_rows.ok_or(ParquetError::MissingRowCount)?;

        self.file.write_all(&PARQUET_MAGIC)?;

        let columns_start = stream_position(&mut self.file)?;
        let mut column_chunks = Vec::with_capacity(self.columns.len());
        for (idx, column) in self.columns.iter().enumerate() {
            let stats = write_column(
                &mut self.file,
                column,
                idx,
                num_rows,
                provider,
                &mut self.buf_unc,
                &mut self.buf_com,
            )?;
            column_chunks.push(column.clone().into_column_chunk(stats));
        }
        let total_size = stream_position(&mut self.file)? - columns_start;

        let schema = {
            let mut elements = Vec::with_capacity(self.columns.len() + 1);
            elements.push(schema::root_element(self.columns.len() as i32));
            elements.extend(self.columns.iter().map(|c| c.schema.to_thrift()));
            elements
        };

        let row_group = RowGroup {
            columns: column_chunks,
            total_byte_size: total_size as i64,
            num_rows: num_rows as i64,
            sorting_columns: None,
            file_offset: None,
            total_compressed_size: None,
            ordinal: None,
        };

        let footer = FileMetaData {
            version: 1,
            schema,
            num_rows: num_rows as i64,
            row_groups: vec![row_group],
            key_value_metadata: if self.kv_metadata.is_empty() {
                None
            } else {
                Some(self.kv_metadata)
            },
            created_by: Some(CREATED_BY.to_string()),
            column_orders: None,
            encryption_algorithm: None,
            footer_signing_key_metadata: None,
        };

        let footer_len = write_to_thrift(&footer, &mut self.file)? as u32;
        self.file.write_all(&footer_len.to_le_bytes())?;
        self.file.write_all(&PARQUET_MAGIC)?;
        self.file.flush()?;

        Ok(())
    }
}

fn stream_position(file: &mut File) -> Result<u64> {
    use std::io::{Seek, SeekFrom};
    Ok(file.seek(SeekFrom::Current(0))?)
}
