//! FDBAQ payload decoder: block-adaptive Huffman-coded compression with
//! per-block BRC/THIDX selection and three-branch dequantization.
//!
//! BRC is read once per block (at the start of the IE channel) and THIDX
//! once per block (at the start of the QE channel that follows). Since IE's
//! samples are decoded before THIDX is known, this decoder first extracts
//! raw `(sign, magnitude)` symbols for all four channels of a block and
//! dequantizes them together once THIDX has been read.

use log::{log_enabled, trace, Level};

use crate::bitreader::BitReader;
use crate::constants::SAMPLES_PER_BLOCK;
use crate::decode::fdbaq_tables::{self, A, SIMPLE_THIDX_THRESHOLD};
use crate::error::{DecodeError, DecodeResult};
use crate::sample::{interleave_quads, Complex32};

/// Decode an FDBAQ-mode payload of `num_quads` quads into the interleaved
/// complex layout shared with Bypass.
pub fn decode_fdbaq(payload: &[u8], num_quads: usize) -> DecodeResult<Vec<Complex32>> {
    let mut reader = BitReader::new(payload);
    let num_blocks = num_quads.div_ceil(SAMPLES_PER_BLOCK);

    let mut ie = Vec::with_capacity(num_quads);
    let mut io = Vec::with_capacity(num_quads);
    let mut qe = Vec::with_capacity(num_quads);
    let mut qo = Vec::with_capacity(num_quads);

    for block in 0..num_blocks {
        let block_len = (num_quads - block * SAMPLES_PER_BLOCK).min(SAMPLES_PER_BLOCK);

        let brc = reader.read_u(3)? as u8;
        let ie_raw = decode_symbols(&mut reader, brc, block_len)?;
        reader.align_to_word();

        let thidx = reader.read_u(8)? as u8;
        if log_enabled!(Level::Trace) {
            trace!("block {block}: BRC={brc} THIDX={thidx} len={block_len}");
        }
        let qe_raw = decode_symbols(&mut reader, brc, block_len)?;
        reader.align_to_word();

        let io_raw = decode_symbols(&mut reader, brc, block_len)?;
        reader.align_to_word();

        let qo_raw = decode_symbols(&mut reader, brc, block_len)?;
        reader.align_to_word();

        ie.extend(dequantize_block(&ie_raw, brc, thidx));
        qe.extend(dequantize_block(&qe_raw, brc, thidx));
        io.extend(dequantize_block(&io_raw, brc, thidx));
        qo.extend(dequantize_block(&qo_raw, brc, thidx));
    }

    Ok(interleave_quads(&ie, &io, &qe, &qo))
}

/// Huffman-decode `block_len` raw `(sign, magnitude)` symbols for one
/// channel's block under the given BRC.
fn decode_symbols(reader: &mut BitReader, brc: u8, block_len: usize) -> DecodeResult<Vec<(u32, u8)>> {
    let table = fdbaq_tables::table_for_brc(brc);
    let mut out = Vec::with_capacity(block_len);

    for _ in 0..block_len {
        let peek = reader.peek_u(table.max_len);
        let (magnitude, code_len) = table.decode(peek);
        if code_len == 0 {
            return Err(DecodeError::HuffmanOverflow {
                brc,
                bit_offset: reader.position(),
            });
        }
        reader.skip(code_len as usize)?;
        let sign = reader.read_u(1)?;
        out.push((sign, magnitude));
    }

    Ok(out)
}

fn dequantize_block(symbols: &[(u32, u8)], brc: u8, thidx: u8) -> Vec<f32> {
    symbols.iter().map(|&(sign, magnitude)| dequantize(sign, magnitude, brc, thidx)).collect()
}

/// Map `(sign, magnitude, BRC, THIDX)` to a reconstructed float sample using
/// the three-branch FDBAQ dequantization rule.
fn dequantize(sign: u32, magnitude: u8, brc: u8, thidx: u8) -> f32 {
    let signed = if sign == 1 { -1.0 } else { 1.0 };

    if thidx <= SIMPLE_THIDX_THRESHOLD[brc as usize] && magnitude < A[brc as usize] {
        signed * magnitude as f32
    } else if magnitude == A[brc as usize] {
        signed * fdbaq_tables::nrl_saturated(brc, thidx)
    } else {
        signed * fdbaq_tables::sf(thidx) * fdbaq_tables::nrl_scaled(brc, magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::fdbaq_tables::NUM_BRC;

    /// Minimal MSB-first bit accumulator mirroring [`BitReader`]'s layout,
    /// used only to construct well-formed FDBAQ fixtures for these tests.
    struct BitWriter {
        bytes: Vec<u8>,
        bit_len: usize,
    }

    impl BitWriter {
        fn new() -> Self {
            Self { bytes: Vec::new(), bit_len: 0 }
        }

        fn push_bits(&mut self, value: u32, n: u32) {
            for i in (0..n).rev() {
                let bit = (value >> i) & 1;
                let byte_idx = self.bit_len / 8;
                if byte_idx == self.bytes.len() {
                    self.bytes.push(0);
                }
                let bit_in_byte = 7 - (self.bit_len % 8);
                self.bytes[byte_idx] |= (bit as u8) << bit_in_byte;
                self.bit_len += 1;
            }
        }

        /// BRC0 symbol 0 (codeword `0`) followed by a zero sign bit,
        /// repeated `count` times.
        fn push_zero_symbols(&mut self, count: usize) {
            for _ in 0..count {
                self.push_bits(0, 1);
                self.push_bits(0, 1);
            }
        }

        fn align_to_word(&mut self) {
            let rem = self.bit_len % 16;
            if rem != 0 {
                self.bit_len += 16 - rem;
            }
            while self.bytes.len() < self.bit_len.div_ceil(8) {
                self.bytes.push(0);
            }
        }

        fn into_bytes(self) -> Vec<u8> {
            self.bytes
        }
    }

    #[test]
    fn all_brc_tables_are_non_empty() {
        for brc in 0..NUM_BRC as u8 {
            let table = fdbaq_tables::table_for_brc(brc);
            assert!(table.max_len >= 1);
        }
    }

    #[test]
    fn decode_symbols_reads_zero_magnitude_zero_sign_pairs() {
        let mut w = BitWriter::new();
        w.push_zero_symbols(3);
        let payload = w.into_bytes();
        let mut reader = BitReader::new(&payload);
        let symbols = decode_symbols(&mut reader, 0, 3).unwrap();
        assert_eq!(symbols, vec![(0, 0); 3]);
    }

    #[test]
    fn full_block_of_zero_symbols_dequantizes_to_zero() {
        let block_len = 2;
        let mut w = BitWriter::new();
        w.push_bits(0, 3); // BRC = 0
        w.push_zero_symbols(block_len); // IE
        w.align_to_word();
        w.push_bits(0, 8); // THIDX = 0
        w.push_zero_symbols(block_len); // QE
        w.align_to_word();
        w.push_zero_symbols(block_len); // IO
        w.align_to_word();
        w.push_zero_symbols(block_len); // QO
        w.align_to_word();

        let payload = w.into_bytes();
        let samples = decode_fdbaq(&payload, block_len).unwrap();
        assert_eq!(samples.len(), block_len * 2);
        assert!(samples.iter().all(|s| s.re == 0.0 && s.im == 0.0));
    }

    #[test]
    fn dequantize_simple_branch_matches_signed_magnitude() {
        assert_eq!(dequantize(0, 1, 0, 0), 1.0);
        assert_eq!(dequantize(1, 1, 0, 0), -1.0);
    }

    #[test]
    fn dequantize_saturated_branch_uses_nrl_saturated() {
        let brc = 0u8;
        let saturating_magnitude = A[brc as usize];
        let expected = fdbaq_tables::nrl_saturated(brc, 10);
        assert_eq!(dequantize(0, saturating_magnitude, brc, 10), expected);
    }
}
