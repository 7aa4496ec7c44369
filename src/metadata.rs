//! Per-column bookkeeping: the encoding choice fixed at schema-construction
//! time, and the size/offset fields that are only known once the column has
//! actually been encoded (§3 "deferred fields").

use parquet_format_async_temp::{ColumnChunk, ColumnMetaData, Encoding};

use crate::compression::Compression;
use crate::schema::SchemaColumn;

/// The single top-level encoding selected for a column (§3). Dictionary
/// encoding is only legal for `BYTE_ARRAY` columns; enforced when the column
/// is added to the schema, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingChoice {
    Plain,
    RleDictionary,
}

impl EncodingChoice {
    /// The encoding multiset written into `ColumnMetaData.encodings`:
    /// `{PLAIN}` for a plain column, `{PLAIN, RLE, RLE_DICTIONARY}` for a
    /// dictionary-encoded one.
    pub fn thrift_encodings(&self) -> Vec<Encoding> {
        match self {
            EncodingChoice::Plain => vec![Encoding::PLAIN],
            EncodingChoice::RleDictionary => {
                vec![Encoding::PLAIN, Encoding::RLE, Encoding::RLE_DICTIONARY]
            }
        }
    }
}

/// A schema column plus the encoding/compression fixed for it at
/// `schema_add_column*` time.
#[derive(Debug, Clone)]
pub struct ColumnState {
    pub schema: SchemaColumn,
    pub encoding: EncodingChoice,
    pub codec: Compression,
}

/// Size and offset fields populated once the column writer has emitted every
/// page for a column (§3 "deferred fields", §4.4).
#[derive(Debug, Clone, Default)]
pub struct ColumnChunkStats {
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub data_page_offset: i64,
    pub dictionary_page_offset: Option<i64>,
}

impl ColumnState {
    /// Assembles the final `ColumnChunk` for the footer (invariant 2: `path_in_schema`
    /// is exactly the one-element `[name]` path; §4.5 "`file_offset` = `data_page_offset`",
    /// a deliberate simplification preserved from the source).
    pub fn into_column_chunk(self, stats: ColumnChunkStats) -> ColumnChunk {
        let metadata = ColumnMetaData {
            type_: self.schema.physical_type.into(),
            encodings: self.encoding.thrift_encodings(),
            path_in_schema: vec![self.schema.name],
            codec: self.codec.into(),
            num_values: stats.num_values,
            total_uncompressed_size: stats.total_uncompressed_size,
            total_compressed_size: stats.total_compressed_size,
            key_value_metadata: None,
            data_page_offset: stats.data_page_offset,
            index_page_offset: None,
            dictionary_page_offset: stats.dictionary_page_offset,
            statistics: None,
            encoding_stats: None,
            bloom_filter_offset: None,
        };

        ColumnChunk {
            file_path: None,
            file_offset: stats.data_page_offset,
            meta_data: Some(metadata),
            offset_index_offset: None,
            offset_index_length: None,
            column_index_offset: None,
            column_index_length: None,
            crypto_metadata: None,
            encrypted_column_metadata: None,
        }
    }
}
