//! The flat, all-`REQUIRED` schema this writer supports: a root element with
//! `num_children = N`, followed by `N` leaf columns (§3 data model). There is
//! no support for nested, repeated, or optional fields — every leaf is
//! `REQUIRED` and the writer never emits definition or repetition levels.

use parquet_format_async_temp::{ConvertedType, FieldRepetitionType, IntType, LogicalType, SchemaElement, StringType, Type};

use crate::error::{ParquetError, Result};

/// The physical (on-disk) type of a column, matching the subset of
/// `parquet_format_async_temp::Type` this writer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Double,
    ByteArray,
}

impl From<PhysicalType> for Type {
    fn from(t: PhysicalType) -> Type {
        match t {
            PhysicalType::Boolean => Type::BOOLEAN,
            PhysicalType::Int32 => Type::INT32,
            PhysicalType::Double => Type::DOUBLE,
            PhysicalType::ByteArray => Type::BYTE_ARRAY,
        }
    }
}

/// A logical type annotation on top of a physical type (§4.6). Only the two
/// variants the mapping table names are supported; anything else is an
/// `UnsupportedLogicalType` error at schema-construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalTypeAnnotation {
    /// Maps to `BYTE_ARRAY` / `UTF8`.
    String,
    /// Maps to `INT32` / `INT_32`. `bit_width` must be 32 and `is_signed` must be true.
    Integer { bit_width: u8, is_signed: bool },
}

impl LogicalTypeAnnotation {
    /// Resolves the `(physical_type, converted_type, thrift LogicalType)` triple
    /// this annotation maps onto, or an `UnsupportedLogicalType` error.
    pub fn resolve(&self) -> Result<(PhysicalType, ConvertedType, LogicalType)> {
        match *self {
            LogicalTypeAnnotation::String => Ok((
                PhysicalType::ByteArray,
                ConvertedType::UTF8,
                LogicalType::STRING(StringType {}),
            )),
            LogicalTypeAnnotation::Integer {
                bit_width,
                is_signed,
            } => {
                if !is_signed {
                    return Err(ParquetError::UnsupportedLogicalType(
                        "unsigned integers are not implemented".to_string(),
                    ));
                }
                if bit_width != 32 {
                    return Err(ParquetError::UnsupportedLogicalType(
                        "only 32 bit integers are implemented".to_string(),
                    ));
                }
                Ok((
                    PhysicalType::Int32,
                    ConvertedType::INT_32,
                    LogicalType::INTEGER(IntType {
                        bit_width: 32,
                        is_signed: true,
                    }),
                ))
            }
        }
    }
}

/// One leaf column of the flat schema, built incrementally by
/// `ParquetWriter::schema_add_column*` and converted to a Thrift
/// `SchemaElement` when the file is closed.
#[derive(Debug, Clone)]
pub struct SchemaColumn {
    pub name: String,
    pub physical_type: PhysicalType,
    pub converted_type: Option<ConvertedType>,
    pub logical_type: Option<LogicalType>,
}

impl SchemaColumn {
    pub fn to_thrift(&self) -> SchemaElement {
        SchemaElement {
            type_: Some(self.physical_type.into()),
            type_length: None,
            repetition_type: Some(FieldRepetitionType::REQUIRED),
            name: self.name.clone(),
            num_children: None,
            converted_type: self.converted_type,
            scale: None,
            precision: None,
            field_id: None,
            logical_type: self.logical_type.clone(),
        }
    }
}

/// Builds `schemas[0]`, the synthetic root `SchemaElement` with
/// `num_children` set to the number of leaves (invariant 1, §3).
pub fn root_element(num_children: i32) -> SchemaElement {
    SchemaElement {
        type_: None,
        type_length: None,
        repetition_type: None,
        name: "schema".to_string(),
        num_children: Some(num_children),
        converted_type: None,
        scale: None,
        precision: None,
        field_id: None,
        logical_type: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_resolves_to_byte_array_utf8() {
        let (physical, converted, _) = LogicalTypeAnnotation::String.resolve().unwrap();
        assert_eq!(physical, PhysicalType::ByteArray);
        assert_eq!(converted, ConvertedType::UTF8);
    }

    #[test]
    fn signed_32_bit_integer_resolves_to_int32() {
        let (physical, converted, _) = LogicalTypeAnnotation::Integer {
            bit_width: 32,
            is_signed: true,
        }
        .resolve()
        .unwrap();
        assert_eq!(physical, PhysicalType::Int32);
        assert_eq!(converted, ConvertedType::INT_32);
    }

    #[test]
    fn unsigned_integer_is_unsupported() {
        let err = LogicalTypeAnnotation::Integer {
            bit_width: 32,
            is_signed: false,
        }
        .resolve();
        assert!(err.is_err());
    }

    #[test]
    fn non_32_bit_integer_is_unsupported() {
        let err = LogicalTypeAnnotation::Integer {
            bit_width: 64,
            is_signed: true,
        }
        .resolve();
        assert!(err.is_err());
    }
}
