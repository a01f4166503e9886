//! Bypass payload decoder: fixed-width 10-bit sign-magnitude samples, no
//! compression.

use crate::bitreader::BitReader;
use crate::error::DecodeResult;
use crate::sample::{interleave_quads, sign_magnitude_to_f32, Complex32};

/// Bit width of one Bypass-mode sample: 1 sign bit + 9 magnitude bits.
const BYPASS_SAMPLE_BITS: u32 = 10;

/// Decode a Bypass-mode payload of `num_quads` quads into the interleaved
/// complex layout shared with FDBAQ.
pub fn decode_bypass(payload: &[u8], num_quads: usize) -> DecodeResult<Vec<Complex32>> {
    let mut reader = BitReader::new(payload);

    let ie = read_channel(&mut reader, num_quads)?;
    let io = read_channel(&mut reader, num_quads)?;
    let qe = read_channel(&mut reader, num_quads)?;
    let qo = read_channel(&mut reader, num_quads)?;

    Ok(interleave_quads(&ie, &io, &qe, &qo))
}

fn read_channel(reader: &mut BitReader, num_quads: usize) -> DecodeResult<Vec<f32>> {
    let mut out = Vec::with_capacity(num_quads);
    for _ in 0..num_quads {
        let (sign, magnitude) = reader.read_sign_magnitude(BYPASS_SAMPLE_BITS)?;
        out.push(sign_magnitude_to_f32(sign, magnitude));
    }
    reader.align_to_word();
    Ok(out)
}
