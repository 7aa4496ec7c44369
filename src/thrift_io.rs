//! The Thrift Compact Protocol framer (§4.2): serializes `PageHeader` and
//! `FileMetaData` in the Thrift Compact encoding. Not reimplemented here —
//! `parquet_format_async_temp` carries the generated (de)serialization code; this
//! module is the thin adapter the column and file writers call through.
//! Contract: `write_to_thrift(struct, writer) -> bytes_written` is
//! deterministic and self-delimiting.

use std::io::Write;

use parquet_format_async_temp::thrift::protocol::{TCompactOutputProtocol, TOutputProtocol};
use parquet_format_async_temp::{FileMetaData, PageHeader};

use crate::error::Result;

/// The handful of Thrift structs this writer serializes. Only `PageHeader`
/// (once per page) and `FileMetaData` (once, for the footer) need this;
/// everything else (`SchemaElement`, `ColumnMetaData`, `RowGroup`, `KeyValue`)
/// is serialized as part of `FileMetaData`.
pub trait ThriftStruct {
    fn write_to_out_protocol(&self, o_prot: &mut dyn TOutputProtocol) -> parquet_format_async_temp::thrift::Result<usize>;
}

macro_rules! impl_thrift_struct {
    ($type:ty) => {
        impl ThriftStruct for $type {
            fn write_to_out_protocol(
                &self,
                o_prot: &mut dyn TOutputProtocol,
            ) -> parquet_format_async_temp::thrift::Result<usize> {
                // resolves to the inherent method generated for this struct,
                // not a recursive call into this trait impl.
                self.write_to_out_protocol(o_prot)
            }
        }
    };
}

impl_thrift_struct!(PageHeader);
impl_thrift_struct!(FileMetaData);

/// Serializes `value` via the Thrift Compact Protocol directly into `writer`,
/// returning the number of bytes written. The framer's in-memory transport is
/// owned by `TCompactOutputProtocol` itself and is not reused across calls —
/// unlike the source's shared `TMemoryBuffer`, writing straight to `writer`
/// needs no drain-and-reset step.
pub fn write_to_thrift<T, W>(value: &T, writer: &mut W) -> Result<usize>
where
    T: ThriftStruct,
    W: Write,
{
    let mut protocol = TCompactOutputProtocol::new(writer);
    let written = value.write_to_out_protocol(&mut protocol)?;
    protocol.flush()?;
    Ok(written)
}
