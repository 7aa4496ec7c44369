// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The compression codecs this core supports: `UNCOMPRESSED` and `SNAPPY`.
//! Other `parquet-format` codecs exist but are out of scope for this writer.

use parquet_format_async_temp::CompressionCodec;

use crate::error::{ParquetError, Result};

/// Compression codec selectable on the writer, mirrored 1:1 onto
/// `parquet_format_async_temp::CompressionCodec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Uncompressed,
    Snappy,
}

impl From<Compression> for CompressionCodec {
    fn from(codec: Compression) -> Self {
        match codec {
            Compression::Uncompressed => CompressionCodec::UNCOMPRESSED,
            Compression::Snappy => CompressionCodec::SNAPPY,
        }
    }
}

impl std::convert::TryFrom<CompressionCodec> for Compression {
    type Error = ParquetError;

    fn try_from(codec: CompressionCodec) -> Result<Self> {
        match codec {
            CompressionCodec::UNCOMPRESSED => Ok(Compression::Uncompressed),
            CompressionCodec::SNAPPY => Ok(Compression::Snappy),
            other => Err(ParquetError::UnsupportedCompression(format!(
                "codec {:?} is not supported by this writer; only UNCOMPRESSED and SNAPPY are",
                other
            ))),
        }
    }
}

#[cfg(feature = "snappy")]
mod snappy_codec {
    use snap::raw::{max_compress_len, Encoder};

    use crate::error::Result;

    /// Raw (frame-less) Snappy compression, matching Parquet's `SNAPPY` codec.
    pub fn max_compressed_len(input_len: usize) -> usize {
        max_compress_len(input_len)
    }

    /// Compresses `input` into `output`, which must already have capacity for
    /// at least [`max_compressed_len`] bytes. Returns the number of bytes written.
    pub fn compress(input: &[u8], output: &mut [u8]) -> Result<usize> {
        let mut encoder = Encoder::new();
        Ok(encoder.compress(input, output)?)
    }
}

#[cfg(feature = "snappy")]
pub use snappy_codec::{compress as snappy_compress, max_compressed_len as snappy_max_compressed_len};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "snappy")]
    fn snappy_roundtrips() {
        use snap::raw::Decoder;

        let data: Vec<u8> = (0..1000u32).map(|x| (x % 251) as u8).collect();
        let mut compressed = vec![0u8; snappy_max_compressed_len(data.len())];
        let cl = snappy_compress(&data, &mut compressed).unwrap();
        compressed.truncate(cl);

        let decompressed = Decoder::new().decompress_vec(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn try_from_rejects_other_codecs() {
        use std::convert::TryFrom;
        assert!(Compression::try_from(CompressionCodec::GZIP).is_err());
    }
}
