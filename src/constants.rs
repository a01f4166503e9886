//! Format constants derived from the Sentinel-1 SAR space packet definition.
//!
//! Sizes are kept next to the header types that define them so they cannot
//! drift out of sync with the parsers.

use crate::header::{PrimaryHeader, SecondaryHeader};

/// Radar reference clock, in Hz. All on-board timing fields are counts of
/// this clock and are converted to seconds on parse.
pub const F_REF_HZ: f64 = 37.53472224e6;

/// Size of the primary (CCSDS) header in bytes.
pub const PRIMARY_HEADER_SIZE: usize = PrimaryHeader::SIZE;

/// Size of the SAR secondary header in bytes.
pub const SECONDARY_HEADER_SIZE: usize = SecondaryHeader::SIZE;

/// Combined fixed-size header preceding every packet's variable-length
/// compressed sample payload.
pub const FIXED_HEADER_SIZE: usize = PRIMARY_HEADER_SIZE + SECONDARY_HEADER_SIZE;

/// Number of samples per FDBAQ / Bypass decode block.
pub const SAMPLES_PER_BLOCK: usize = 128;

/// Number of interleaved channels in a quad: I-Even, I-Odd, Q-Even, Q-Odd.
pub const CHANNELS_PER_QUAD: usize = 4;

/// Number of consecutive packets spanned by one sub-commutated ancillary
/// data block.
pub const SUBCOM_WORDS_PER_BLOCK: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_header_size_matches_spec() {
        assert_eq!(PRIMARY_HEADER_SIZE, 6);
        assert_eq!(SECONDARY_HEADER_SIZE, 62);
        assert_eq!(FIXED_HEADER_SIZE, 68);
    }
}
