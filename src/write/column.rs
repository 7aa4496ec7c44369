//! The column writer (§4.4): drives one of four code paths selected by
//! `(dictionary?, compressed?)`, pulling typed bytes from the
//! [`ValueProvider`] and framing pages via the Thrift Compact Protocol.

use std::fs::File;
use std::io::Write;

use parquet_format_async_temp::{
    DataPageHeader, DictionaryPageHeader, Encoding, PageHeader, PageType,
};

use crate::buffer::ByteBuffer;
use crate::compression::{self, Compression};
use crate::encoding::{bit_width, hybrid_rle};
use crate::error::{ParquetError, Result, Stage};
use crate::metadata::{ColumnChunkStats, ColumnState, EncodingChoice};
use crate::provider::ValueProvider;
use crate::schema::PhysicalType;
use crate::thrift_io::write_to_thrift;

/// Plain-encoded byte size of `num_rows` values of `physical_type` (§4.4 (a)).
/// `BYTE_ARRAY` sizes come from the provider since they are not fixed-width.
fn plain_size<P: ValueProvider + ?Sized>(
    provider: &P,
    idx: usize,
    physical_type: PhysicalType,
    num_rows: u32,
) -> u32 {
    match physical_type {
        PhysicalType::Boolean => num_rows / 8 + (num_rows % 8 != 0) as u32,
        PhysicalType::Int32 => num_rows * 4,
        PhysicalType::Double => num_rows * 8,
        PhysicalType::ByteArray => provider.size_byte_array(idx),
    }
}

fn write_plain_values<P: ValueProvider + ?Sized>(
    provider: &mut P,
    sink: &mut dyn Write,
    idx: usize,
    physical_type: PhysicalType,
) -> Result<()> {
    match physical_type {
        PhysicalType::Boolean => provider.write_boolean(sink, idx),
        PhysicalType::Int32 => provider.write_int32(sink, idx),
        PhysicalType::Double => provider.write_double(sink, idx),
        PhysicalType::ByteArray => provider.write_byte_array(sink, idx),
    }
}

/// Parquet page headers encode sizes as `i32` (§9); a page this writer
/// assembles in memory can in principle overflow that before it ever reaches
/// disk, so every size that lands in a `PageHeader` field is funneled
/// through here rather than cast directly. Mirrors the donor's
/// `write::page::maybe_bytes` bounds check.
fn page_size(column: usize, what: &str, n: usize) -> Result<i32> {
    i32::try_from(n).map_err(|_| {
        out_of_spec!(
            "column {}: {} is {} bytes, exceeding the i32::MAX a page header can encode",
            column,
            what,
            n
        )
    })
}

fn check_written(column: usize, stage: Stage, expected: u32, actual: usize) -> Result<()> {
    if actual as u64 != expected as u64 {
        return Err(ParquetError::SizeMismatch {
            column,
            stage,
            expected: expected as usize,
            actual,
        });
    }
    Ok(())
}

/// Writes every page belonging to column `idx` and returns the finished
/// accumulator with all deferred fields populated.
#[allow(clippy::too_many_arguments)]
pub fn write_column<P: ValueProvider + ?Sized>(
    file: &mut File,
    column: &ColumnState,
    idx: usize,
    num_rows: u32,
    provider: &mut P,
    buf_unc: &mut ByteBuffer,
    buf_com: &mut ByteBuffer,
) -> Result<ColumnChunkStats> {
    let dictionary = column.encoding == EncodingChoice::RleDictionary;
    let compressed = column.codec != Compression::Uncompressed;

    match (dictionary, compressed) {
        (false, false) => {
            write_plain_uncompressed(file, column, idx, num_rows, provider)
        }
        (false, true) => write_plain_compressed(file, column, idx, num_rows, provider, buf_unc, buf_com),
        (true, false) => write_dictionary_uncompressed(
            file, column, idx, num_rows, provider, buf_unc, buf_com,
        ),
        (true, true) => Err(ParquetError::UnsupportedCompression(
            "dictionary encoding combined with compression is not implemented".to_string(),
        )),
    }
}

fn file_pos(file: &mut File) -> Result<u64> {
    use std::io::{Seek, SeekFrom};
    Ok(file.seek(SeekFrom::Current(0))?)
}

fn write_header(file: &mut File, header: &PageHeader) -> Result<()> {
    write_to_thrift(header, file)
}

/// (a) PLAIN + UNCOMPRESSED.
fn write_plain_uncompressed<P: ValueProvider + ?Sized>(
    file: &mut File,
    column: &ColumnState,
    idx: usize,
    num_rows: u32,
    provider: &mut P,
) -> Result<ColumnChunkStats> {
    let col_start = file_pos(file)?;
    let data_offset = col_start;
    let data_size = plain_size(provider, idx, column.schema.physical_type, num_rows);
    let page_bytes = page_size(idx, "data page", data_size as usize)?;

    let header = PageHeader {
        type_: PageType::DATA_PAGE,
        uncompressed_page_size: page_bytes,
        compressed_page_size: page_bytes,
        crc: None,
        data_page_header: Some(DataPageHeader {
            num_values: num_rows as i32,
            encoding: Encoding::PLAIN,
            definition_level_encoding: Encoding::RLE,
            repetition_level_encoding: Encoding::RLE,
            statistics: None,
        }),
        index_page_header: None,
        dictionary_page_header: None,
        data_page_header_v2: None,
    };
    write_header(file, &header)?;

    let cb_start = file_pos(file)?;
    write_plain_values(provider, file, idx, column.schema.physical_type)?;
    let cb_end = file_pos(file)?;
    check_written(idx, Stage::Plain, data_size, (cb_end - cb_start) as usize)?;

    let column_bytes = file_pos(file)? - col_start;
    Ok(ColumnChunkStats {
        num_values: num_rows as i64,
        total_uncompressed_size: column_bytes as i64,
        total_compressed_size: column_bytes as i64,
        data_page_offset: data_offset as i64,
        dictionary_page_offset: None,
    })
}

/// (b) PLAIN + SNAPPY.
fn write_plain_compressed<P: ValueProvider + ?Sized>(
    file: &mut File,
    column: &ColumnState,
    idx: usize,
    num_rows: u32,
    provider: &mut P,
    buf_unc: &mut ByteBuffer,
    buf_com: &mut ByteBuffer,
) -> Result<ColumnChunkStats> {
    if column.codec != Compression::Snappy {
        return Err(ParquetError::UnsupportedCompression(
            "only SNAPPY compression is supported at this time".to_string(),
        ));
    }

    let data_size = plain_size(provider, idx, column.schema.physical_type, num_rows);
    buf_unc.resize(data_size as usize);
    buf_unc.reset();
    write_plain_values(provider, buf_unc, idx, column.schema.physical_type)?;
    check_written(idx, Stage::Plain, data_size, buf_unc.tell())?;

    #[cfg(feature = "snappy")]
    let cl = {
        let max_len = compression::snappy_max_compressed_len(data_size as usize);
        let out = buf_com.reserve_exact(max_len);
        let cl = compression::snappy_compress(buf_unc.as_slice(), out)?;
        buf_com.set_len(cl);
        cl
    };
    #[cfg(not(feature = "snappy"))]
    let cl: usize = {
        let _ = &buf_com;
        return Err(ParquetError::UnsupportedCompression(
            "this build was compiled without the `snappy` feature".to_string(),
        ));
    };

    let uncompressed_page_size = page_size(idx, "uncompressed data page", data_size as usize)?;
    let compressed_page_size = page_size(idx, "compressed data page", cl)?;

    let col_start = file_pos(file)?;
    let data_offset = col_start;
    let header = PageHeader {
        type_: PageType::DATA_PAGE,
        uncompressed_page_size,
        compressed_page_size,
        crc: None,
        data_page_header: Some(DataPageHeader {
            num_values: num_rows as i32,
            encoding: Encoding::PLAIN,
            definition_level_encoding: Encoding::RLE,
            repetition_level_encoding: Encoding::RLE,
            statistics: None,
        }),
        index_page_header: None,
        dictionary_page_header: None,
        data_page_header_v2: None,
    };
    write_header(file, &header)?;
    file.write_all(buf_com.as_slice())?;

    let column_bytes = file_pos(file)? - col_start;
    Ok(ColumnChunkStats {
        num_values: num_rows as i64,
        total_uncompressed_size: data_size as i64,
        total_compressed_size: column_bytes as i64,
        data_page_offset: data_offset as i64,
        dictionary_page_offset: None,
    })
}

/// (c) RLE_DICTIONARY + UNCOMPRESSED, `BYTE_ARRAY` only.
fn write_dictionary_uncompressed<P: ValueProvider + ?Sized>(
    file: &mut File,
    column: &ColumnState,
    idx: usize,
    num_rows: u32,
    provider: &mut P,
    buf_unc: &mut ByteBuffer,
    buf_com: &mut ByteBuffer,
) -> Result<ColumnChunkStats> {
    if column.schema.physical_type != PhysicalType::ByteArray {
        return Err(ParquetError::UnsupportedPhysicalType {
            column: idx,
            message: "dictionary encoding is only supported for BYTE_ARRAY columns".to_string(),
        });
    }
    if !provider.has_byte_array_dictionary() {
        return Err(ParquetError::UnsupportedPhysicalType {
            column: idx,
            message: "value provider does not implement byte array dictionary support"
                .to_string(),
        });
    }

    let col_start = file_pos(file)?;

    // dictionary page -------------------------------------------------
    let dictionary_page_offset = file_pos(file)?;
    let dict_size = provider.size_byte_array_dictionary(idx);
    let num_dict_values = provider.num_values_byte_array_dictionary(idx);
    let dict_page_bytes = page_size(idx, "dictionary page", dict_size as usize)?;
    let dict_num_values = page_size(idx, "dictionary cardinality", num_dict_values as usize)?;

    let dict_header = PageHeader {
        type_: PageType::DICTIONARY_PAGE,
        uncompressed_page_size: dict_page_bytes,
        compressed_page_size: dict_page_bytes,
        crc: None,
        data_page_header: None,
        index_page_header: None,
        dictionary_page_header: Some(DictionaryPageHeader {
            num_values: dict_num_values,
            encoding: Encoding::PLAIN,
            is_sorted: None,
        }),
        data_page_header_v2: None,
    };
    write_header(file, &dict_header)?;

    let cb_start = file_pos(file)?;
    provider.write_byte_array_dictionary(file, idx)?;
    let cb_end = file_pos(file)?;
    check_written(idx, Stage::Dictionary, dict_size, (cb_end - cb_start) as usize)?;

    // data page: RLE/bit-packed indices ------------------------------
    let data_offset = file_pos(file)?;

    let idx_size = 4usize * num_rows as usize;
    buf_unc.resize(idx_size);
    buf_unc.reset();
    provider.write_dictionary_indices(buf_unc, idx)?;
    check_written(idx, Stage::Dictionary, idx_size as u32, buf_unc.tell())?;

    let indices: Vec<u32> = buf_unc
        .as_slice()
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let width = bit_width(num_dict_values);
    let max_size = hybrid_rle::max_size(indices.len(), width);
    let packed = buf_com.reserve_exact(max_size);
    let data_size = hybrid_rle::encode(&indices, width, packed);
    buf_com.set_len(data_size);
    // +1 accounts for the leading bit_width byte (§9 open questions).
    let index_page_bytes = page_size(idx, "dictionary index page", data_size + 1)?;

    let header = PageHeader {
        type_: PageType::DATA_PAGE,
        uncompressed_page_size: index_page_bytes,
        compressed_page_size: index_page_bytes,
        crc: None,
        data_page_header: Some(DataPageHeader {
            num_values: num_rows as i32,
            encoding: Encoding::RLE_DICTIONARY,
            definition_level_encoding: Encoding::RLE,
            repetition_level_encoding: Encoding::RLE,
            statistics: None,
        }),
        index_page_header: None,
        dictionary_page_header: None,
        data_page_header_v2: None,
    };
    write_header(file, &header)?;
    file.write_all(&[width])?;
    file.write_all(buf_com.as_slice())?;

    let column_bytes = file_pos(file)? - col_start;
    Ok(ColumnChunkStats {
        num_values: num_rows as i64,
        total_uncompressed_size: column_bytes as i64,
        total_compressed_size: column_bytes as i64,
        data_page_offset: data_offset as i64,
        dictionary_page_offset: Some(dictionary_page_offset as i64),
    })
}
