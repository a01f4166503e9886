//! The complex sample type and channel-interleaving layout shared by the
//! Bypass and FDBAQ decoders.

use serde::{Deserialize, Serialize};

/// A single decoded I/Q sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex32 {
    pub re: f32,
    pub im: f32,
}

impl Complex32 {
    pub const ZERO: Complex32 = Complex32 { re: 0.0, im: 0.0 };

    pub fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// Interleave four per-quad channel buffers (I-Even, I-Odd, Q-Even, Q-Odd)
/// into the flat complex layout both payload decoders produce:
/// `(IE0+jQE0), (IO0+jQO0), (IE1+jQE1), (IO1+jQO1), ...`
pub fn interleave_quads(ie: &[f32], io: &[f32], qe: &[f32], qo: &[f32]) -> Vec<Complex32> {
    debug_assert_eq!(ie.len(), io.len());
    debug_assert_eq!(ie.len(), qe.len());
    debug_assert_eq!(ie.len(), qo.len());

    let mut out = Vec::with_capacity(ie.len() * 2);
    for i in 0..ie.len() {
        out.push(Complex32::new(ie[i], qe[i]));
        out.push(Complex32::new(io[i], qo[i]));
    }
    out
}

/// Convert a sign-magnitude pair, as produced by
/// [`crate::bitreader::BitReader::read_sign_magnitude`], into a signed
/// float: `(1 - 2*sign) * magnitude`.
pub fn sign_magnitude_to_f32(sign: u32, magnitude: u32) -> f32 {
    let signed = if sign == 1 { -1.0 } else { 1.0 };
    signed * magnitude as f32
}
