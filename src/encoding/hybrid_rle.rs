//! Parquet's hybrid run-length / bit-packing encoding, used here to encode
//! dictionary indices (§4.3 of the column writer design).
//!
//! A run is either:
//! - a **bit-packed run**: header `(num_groups_of_8) << 1 | 1` (ULEB128),
//!   followed by `num_groups_of_8 * 8` values packed LSB-first at `bit_width`
//!   bits each, zero-padded in the last group;
//! - an **RLE run**: header `count << 1` (ULEB128), followed by the single
//!   repeated value in `ceil(bit_width / 8)` little-endian bytes.
//!
//! This encoder emits one run per call: an RLE run when the whole slice is a
//! single repeated value (the common case for a low-cardinality dictionary,
//! and the only shape that can represent `bit_width == 0`), and a single
//! bit-packed run spanning the whole slice otherwise. Either choice decodes
//! identically under the hybrid spec; a decoder does not need to know which
//! one the encoder picked.

use super::{ceil8, uleb128};

/// Upper bound, in bytes, on the encoded size of `n` values at `bit_width`
/// bits each. Used to pre-size the staging buffer before encoding.
pub fn max_size(n: usize, bit_width: u8) -> usize {
    // worst case: a bit-packed run, plus the largest possible ULEB128 header.
    10 + ceil8(n) * bit_width as usize
}

/// Encodes `values` (each `< 2^bit_width`) into `out`, returning the number
/// of bytes written. `out` must be at least [`max_size`] bytes.
pub fn encode(values: &[u32], bit_width: u8, out: &mut [u8]) -> usize {
    if bit_width == 0 {
        return encode_rle_run(values.len() as u64, 0, 0, out);
    }

    if let Some(&first) = values.first() {
        if values.iter().all(|&v| v == first) {
            return encode_rle_run(values.len() as u64, first, bit_width, out);
        }
    }

    encode_bitpacked_run(values, bit_width, out)
}

fn encode_rle_run(count: u64, value: u32, bit_width: u8, out: &mut [u8]) -> usize {
    let mut header = [0u8; 10];
    let header_len = uleb128::encode(count << 1, &mut header);
    out[..header_len].copy_from_slice(&header[..header_len]);

    let value_bytes = ceil8(bit_width as usize);
    let value_le = value.to_le_bytes();
    out[header_len..header_len + value_bytes].copy_from_slice(&value_le[..value_bytes]);

    header_len + value_bytes
}

fn encode_bitpacked_run(values: &[u32], bit_width: u8, out: &mut [u8]) -> usize {
    let num_groups = ceil8(values.len());

    let mut header = [0u8; 10];
    let header_len = uleb128::encode(((num_groups as u64) << 1) | 1, &mut header);
    out[..header_len].copy_from_slice(&header[..header_len]);

    let mut bit_buffer: u64 = 0;
    let mut bits_in_buffer: u32 = 0;
    let mut written = header_len;

    let padded = num_groups * 8;
    for i in 0..padded {
        let value = values.get(i).copied().unwrap_or(0);
        bit_buffer |= (value as u64) << bits_in_buffer;
        bits_in_buffer += bit_width as u32;
        while bits_in_buffer >= 8 {
            out[written] = (bit_buffer & 0xff) as u8;
            written += 1;
            bit_buffer >>= 8;
            bits_in_buffer -= 8;
        }
    }
    debug_assert_eq!(bits_in_buffer, 0, "groups of 8 always land byte-aligned");

    written
}

/// Decodes a single hybrid run produced by [`encode`] back into `num_values`
/// indices. Used by this crate's own tests to verify round-trip fidelity.
pub fn decode(data: &[u8], bit_width: u8, num_values: usize) -> Vec<u32> {
    let (header, header_len) = uleb128::decode(data);
    let is_bitpacked = header & 1 == 1;
    let data = &data[header_len..];

    if !is_bitpacked {
        let count = (header >> 1) as usize;
        let value_bytes = ceil8(bit_width as usize);
        let mut buf = [0u8; 4];
        buf[..value_bytes].copy_from_slice(&data[..value_bytes]);
        let value = u32::from_le_bytes(buf);
        return vec![value; count.min(num_values)];
    }

    let num_groups = (header >> 1) as usize;
    let padded = num_groups * 8;
    let mut values = Vec::with_capacity(padded);

    let mut bit_buffer: u64 = 0;
    let mut bits_in_buffer: u32 = 0;
    let mut byte_idx = 0;
    let mask = if bit_width == 32 {
        u32::MAX
    } else {
        (1u32 << bit_width) - 1
    };

    while values.len() < padded {
        while bits_in_buffer < bit_width as u32 && byte_idx < data.len() {
            bit_buffer |= (data[byte_idx] as u64) << bits_in_buffer;
            bits_in_buffer += 8;
            byte_idx += 1;
        }
        values.push((bit_buffer as u32) & mask);
        bit_buffer >>= bit_width as u32;
        bits_in_buffer = bits_in_buffer.saturating_sub(bit_width as u32);
    }

    values.truncate(num_values);
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(values: &[u32], bit_width: u8) {
        let mut out = vec![0u8; max_size(values.len(), bit_width)];
        let len = encode(values, bit_width, &mut out);
        let decoded = decode(&out[..len], bit_width, values.len());
        assert_eq!(decoded, values, "bit_width={}", bit_width);
    }

    #[test]
    fn all_zero_bit_width_zero() {
        // cardinality-1 dictionary: bit_width 0, RLE run of n zeros, no value bytes.
        let mut out = vec![0u8; max_size(5, 0)];
        let len = encode(&[0, 0, 0, 0, 0], 0, &mut out);
        let (header, header_len) = uleb128::decode(&out[..len]);
        assert_eq!(header, 5 << 1);
        assert_eq!(len, header_len, "no value bytes when bit_width is 0");
    }

    #[test]
    fn repeated_value_uses_rle_run() {
        roundtrip(&[3, 3, 3, 3, 3, 3], 2);
    }

    #[test]
    fn mixed_values_roundtrip_bitpacked() {
        roundtrip(&[0, 1, 0, 1], 1);
        roundtrip(&[0, 1, 2, 3, 1, 2, 0, 3, 3], 2);
        roundtrip(&[5, 200, 37, 0, 255, 1, 9, 9, 9, 9, 9, 9, 9], 8);
    }

    #[test]
    fn empty_input() {
        roundtrip(&[], 4);
    }

    #[test]
    fn single_value() {
        roundtrip(&[7], 4);
    }
}
