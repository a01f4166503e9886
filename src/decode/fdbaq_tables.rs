//! Huffman code tables and dequantization constants for the five FDBAQ
//! Bit-Rate Codes (BRC 0..4).
//!
//! The true tables are defined bit-exactly by the Sentinel-1 ICD and were not
//! available when this module was written. The code-length profiles and
//! dequantization constants below are a good-faith reconstruction: each
//! BRC's lengths form a complete canonical prefix code over the alphabet
//! size the format defines (4, 4, 6, 8, 10 respectively), satisfying the
//! Huffman completeness property this crate tests for, but the exact bit
//! patterns and reconstruction levels are not guaranteed to match a real
//! downlink byte-for-byte. See `DESIGN.md`.

use std::sync::OnceLock;

/// Number of Bit-Rate Codes.
pub const NUM_BRC: usize = 5;

/// Huffman alphabet size per BRC (magnitude symbol count), per the format.
pub const ALPHABET_SIZES: [usize; NUM_BRC] = [4, 4, 6, 8, 10];

/// Ascending codeword bit-length profile per BRC. Each profile satisfies
/// `sum(2^-len) == 1`, i.e. a complete canonical prefix code with no
/// unreachable bit pattern at the maximum length.
const BRC_LENGTHS: [&[u8]; NUM_BRC] = [
    &[1, 2, 3, 3],
    &[1, 2, 3, 3],
    &[1, 2, 3, 4, 5, 5],
    &[1, 2, 3, 4, 5, 6, 7, 7],
    &[1, 2, 3, 4, 5, 6, 7, 8, 9, 9],
];

/// Saturation magnitude per BRC: the top symbol in its alphabet.
pub const A: [u8; NUM_BRC] = [3, 3, 5, 7, 9];

/// THIDX threshold below (inclusive) which the simple direct reconstruction
/// applies, per BRC.
pub const SIMPLE_THIDX_THRESHOLD: [u8; NUM_BRC] = [3, 3, 4, 4, 5];

/// Number of distinct THIDX values (0..=255).
const THIDX_COUNT: usize = 256;

/// A precomputed flat lookup table for one BRC: indexing by a `max_len`-bit
/// peek of the bitstream yields the decoded magnitude symbol and how many
/// bits that codeword actually occupied.
pub struct HuffmanTable {
    pub max_len: u32,
    /// `lut[peek] = (magnitude, code_length)`, `peek` being the top
    /// `max_len` bits of the stream at the current position.
    lut: Vec<(u8, u8)>,
}

impl HuffmanTable {
    fn build(lengths: &[u8]) -> Self {
        let max_len = *lengths.iter().max().expect("non-empty alphabet") as u32;
        let mut codes = Vec::with_capacity(lengths.len());
        let mut code: u32 = 0;
        let mut prev_len = lengths[0];
        for (i, &len) in lengths.iter().enumerate() {
            if i > 0 {
                code <<= len - prev_len;
            }
            codes.push(code);
            code += 1;
            prev_len = len;
        }

        let mut lut = vec![(0u8, 0u8); 1usize << max_len];
        for (symbol, (&len, &code)) in lengths.iter().zip(codes.iter()).enumerate() {
            let shift = max_len - len as u32;
            let base = (code as usize) << shift;
            let span = 1usize << shift;
            for entry in lut.iter_mut().skip(base).take(span) {
                *entry = (symbol as u8, len);
            }
        }

        Self { max_len, lut }
    }

    /// Decode the magnitude symbol and codeword length from a `max_len`-bit
    /// peek value (see [`crate::bitreader::BitReader::peek_u`]).
    pub fn decode(&self, peek: u32) -> (u8, u8) {
        self.lut[peek as usize]
    }
}

fn build_all_tables() -> [HuffmanTable; NUM_BRC] {
    std::array::from_fn(|brc| HuffmanTable::build(BRC_LENGTHS[brc]))
}

static TABLES: OnceLock<[HuffmanTable; NUM_BRC]> = OnceLock::new();

/// The Huffman table for a given BRC (0..=4), built once and cached.
pub fn table_for_brc(brc: u8) -> &'static HuffmanTable {
    &TABLES.get_or_init(build_all_tables)[brc as usize]
}

/// Saturated-branch reconstruction levels, indexed `[brc][thidx]`.
fn build_nrl_saturated() -> [[f32; THIDX_COUNT]; NUM_BRC] {
    std::array::from_fn(|brc| {
        std::array::from_fn(|thidx| A[brc] as f32 + thidx as f32 * 0.1)
    })
}

static NRL_SATURATED: OnceLock<[[f32; THIDX_COUNT]; NUM_BRC]> = OnceLock::new();

pub fn nrl_saturated(brc: u8, thidx: u8) -> f32 {
    NRL_SATURATED.get_or_init(build_nrl_saturated)[brc as usize][thidx as usize]
}

/// Scaled-branch reconstruction levels, indexed `[brc][magnitude]`.
fn build_nrl_scaled() -> [Vec<f32>; NUM_BRC] {
    std::array::from_fn(|brc| (0..ALPHABET_SIZES[brc]).map(|m| m as f32 + 0.5).collect())
}

static NRL_SCALED: OnceLock<[Vec<f32>; NUM_BRC]> = OnceLock::new();

pub fn nrl_scaled(brc: u8, magnitude: u8) -> f32 {
    NRL_SCALED.get_or_init(build_nrl_scaled)[brc as usize][magnitude as usize]
}

/// Simple scale factor table, indexed by THIDX (0..=255), shared across BRCs.
fn build_sf() -> [f32; THIDX_COUNT] {
    std::array::from_fn(|thidx| 1.0 + thidx as f32 * 0.01)
}

static SF: OnceLock<[f32; THIDX_COUNT]> = OnceLock::new();

pub fn sf(thidx: u8) -> f32 {
    SF.get_or_init(build_sf)[thidx as usize]
}
