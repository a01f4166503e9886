//! SAR secondary header (62 bytes / 496 bits, fixed for every packet).
//!
//! Raw integer fields are canonical; the scaled/typed accessors below are
//! pure functions of those raw fields, so re-deriving a parsed view twice
//! from the same raw header always yields the same value (the raw/parsed
//! idempotence property exercised in `tests/`).

use crate::bitreader::BitReader;
use crate::constants::F_REF_HZ;
use crate::error::DecodeError;
use crate::header::fields::{
    BaqMode, CalibrationType, EccNumber, Polarisation, RangeDecimation, SignalType, TemperatureCompensation,
    TestMode,
};
use serde::{Deserialize, Serialize};

/// The 62-byte SAR secondary header. Every field here is the raw integer or
/// bit exactly as it appears on the wire; call the accessor methods for the
/// scaled/typed view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SecondaryHeader {
    // --- Datation (48 bits) ---
    pub coarse_time: u32,
    pub fine_time: u16,

    // --- Fixed ancillary data (80 bits) ---
    pub sync_marker: u32,
    pub data_take_id: u32,
    pub ecc_number_raw: u8,
    pub test_mode_raw: u8,
    pub rx_channel_id: u8,

    // --- Counters (64 bits) ---
    pub space_packet_count: u32,
    pub pri_count: u32,

    // --- Sub-commutated ancillary data (22 bits) ---
    /// Position of this packet's ancillary data word within the 64-word
    /// ephemeris/attitude cycle, 1..=64. Wire-encoded as a 6-bit raw count
    /// where 0 means 64 (both span exactly 64 distinct values); translated
    /// to the logical 1..=64 value on parse. Not every ECC emits this
    /// counter.
    pub subcom_counter: u8,
    pub subcom_data_word: u16,

    // --- SAR/baseband configuration (17 bits) ---
    pub error_flag: bool,
    pub baq_mode_raw: u8,
    pub baq_block_length_raw: u8,

    // --- Timing (140 bits) ---
    pub swst_raw: u32,
    pub swl_raw: u32,
    pub pri_raw: u32,
    pub chirp_ramp_rate_sign: u8,
    pub chirp_ramp_rate_mag: u32,
    pub chirp_start_freq_sign: u8,
    pub chirp_start_freq_mag: u32,
    pub pulse_length_raw: u32,

    // --- Instrument configuration (43 bits) ---
    pub polarisation_raw: u8,
    pub temperature_compensation_raw: u8,
    pub sas_ssb_flag: bool,
    pub cal_mode_raw: u8,
    pub signal_type_raw: u8,
    pub swath_number: u8,
    pub num_quads: u16,
    pub range_decimation_raw: u8,

    // --- Beam addresses (32 bits) ---
    pub azimuth_beam_address: u16,
    pub elevation_beam_address: u16,
}

impl SecondaryHeader {
    /// Size of the secondary header in bytes.
    pub const SIZE: usize = 62;

    /// Bits consumed by the named fields above, before the trailing spare
    /// padding that fills the header out to 496 bits.
    const NAMED_FIELD_BITS: usize = 446;

    /// Total header size in bits.
    const TOTAL_BITS: usize = Self::SIZE * 8;

    /// Parse a secondary header from exactly [`Self::SIZE`] bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        debug_assert_eq!(bytes.len(), Self::SIZE);
        let mut r = BitReader::new(bytes);

        let coarse_time = r.read_u(32)?;
        let fine_time = r.read_u(16)? as u16;

        let sync_marker = r.read_u(32)?;
        let data_take_id = r.read_u(32)?;
        let ecc_number_raw = r.read_u(8)? as u8;
        let test_mode_raw = r.read_u(3)? as u8;
        let rx_channel_id = r.read_u(5)? as u8;

        let space_packet_count = r.read_u(32)?;
        let pri_count = r.read_u(32)?;

        let subcom_counter_raw = r.read_u(6)? as u8;
        let subcom_counter = if subcom_counter_raw == 0 { 64 } else { subcom_counter_raw };
        let subcom_data_word = r.read_u(16)? as u16;

        let error_flag = r.read_u(1)? == 1;
        let baq_mode_raw = r.read_u(5)? as u8;
        let baq_block_length_raw = r.read_u(8)? as u8;
        let _reserved = r.read_u(3)?;

        let swst_raw = r.read_u(24)?;
        let swl_raw = r.read_u(24)?;
        let pri_raw = r.read_u(24)?;
        let (chirp_ramp_rate_sign, chirp_ramp_rate_mag) = r.read_sign_magnitude(22)?;
        let (chirp_start_freq_sign, chirp_start_freq_mag) = r.read_sign_magnitude(22)?;
        let pulse_length_raw = r.read_u(24)?;

        let polarisation_raw = r.read_u(3)? as u8;
        let temperature_compensation_raw = r.read_u(2)? as u8;
        let sas_ssb_flag = r.read_u(1)? == 1;
        let cal_mode_raw = r.read_u(4)? as u8;
        let signal_type_raw = r.read_u(4)? as u8;
        let swath_number = r.read_u(8)? as u8;
        let num_quads = r.read_u(16)? as u16;
        let range_decimation_raw = r.read_u(5)? as u8;

        let azimuth_beam_address = r.read_u(16)? as u16;
        let elevation_beam_address = r.read_u(16)? as u16;

        debug_assert_eq!(r.position(), Self::NAMED_FIELD_BITS);
        r.skip(Self::TOTAL_BITS - Self::NAMED_FIELD_BITS)?;

        Ok(Self {
            coarse_time,
            fine_time,
            sync_marker,
            data_take_id,
            ecc_number_raw,
            test_mode_raw,
            rx_channel_id,
            space_packet_count,
            pri_count,
            subcom_counter,
            subcom_data_word,
            error_flag,
            baq_mode_raw,
            baq_block_length_raw,
            swst_raw,
            swl_raw,
            pri_raw,
            chirp_ramp_rate_sign,
            chirp_ramp_rate_mag,
            chirp_start_freq_sign,
            chirp_start_freq_mag,
            pulse_length_raw,
            polarisation_raw,
            temperature_compensation_raw,
            sas_ssb_flag,
            cal_mode_raw,
            signal_type_raw,
            swath_number,
            num_quads,
            range_decimation_raw,
            azimuth_beam_address,
            elevation_beam_address,
        })
    }

    /// On-board time as seconds since the mission epoch: coarse seconds plus
    /// a fine fraction counted in 1/2^16ths of a second.
    pub fn datation_seconds(&self) -> f64 {
        self.coarse_time as f64 + (self.fine_time as f64 / 65536.0)
    }

    pub fn ecc_number(&self) -> EccNumber {
        EccNumber::from_code(self.ecc_number_raw)
    }

    pub fn test_mode(&self) -> TestMode {
        TestMode::from_code(self.test_mode_raw)
    }

    pub fn baq_mode(&self) -> BaqMode {
        BaqMode::from_code(self.baq_mode_raw)
    }

    /// Decompressed block length in bytes implied by the raw BAQ block
    /// length code: `(code + 1) * 8`.
    pub fn baq_block_length_bytes(&self) -> u16 {
        (self.baq_block_length_raw as u16 + 1) * 8
    }

    /// Sampling window start time, in seconds, relative to the PRI epoch.
    pub fn swst_seconds(&self) -> f64 {
        self.swst_raw as f64 / F_REF_HZ
    }

    /// Sampling window length, in seconds.
    pub fn swl_seconds(&self) -> f64 {
        self.swl_raw as f64 / F_REF_HZ
    }

    /// Pulse repetition interval, in seconds.
    pub fn pri_seconds(&self) -> f64 {
        self.pri_raw as f64 / F_REF_HZ
    }

    /// Transmit pulse length, in seconds.
    pub fn pulse_length_seconds(&self) -> f64 {
        self.pulse_length_raw as f64 / F_REF_HZ
    }

    /// Chirp FM ramp rate, in Hz/s. Sign-magnitude scaled by
    /// `F_REF_HZ^2 / 2^21`.
    pub fn chirp_ramp_rate_hz_per_s(&self) -> f64 {
        let sign = if self.chirp_ramp_rate_sign == 1 { -1.0 } else { 1.0 };
        sign * self.chirp_ramp_rate_mag as f64 * (F_REF_HZ * F_REF_HZ) / 2f64.powi(21)
    }

    /// Chirp start frequency, in Hz. Sign-magnitude scaled by
    /// `F_REF_HZ / 2^14`.
    pub fn chirp_start_freq_hz(&self) -> f64 {
        let sign = if self.chirp_start_freq_sign == 1 { -1.0 } else { 1.0 };
        sign * self.chirp_start_freq_mag as f64 * F_REF_HZ / 2f64.powi(14)
    }

    pub fn polarisation(&self) -> Polarisation {
        Polarisation::from_code(self.polarisation_raw)
    }

    pub fn temperature_compensation(&self) -> TemperatureCompensation {
        TemperatureCompensation::from_code(self.temperature_compensation_raw)
    }

    /// The calibration sub-type, only meaningful (and only returned) when
    /// the SAS SSB flag marks this packet as carrying calibration data.
    pub fn calibration_type(&self) -> Option<CalibrationType> {
        self.sas_ssb_flag.then(|| CalibrationType::from_code(self.cal_mode_raw))
    }

    pub fn signal_type(&self) -> SignalType {
        SignalType::from_code(self.signal_type_raw)
    }

    pub fn range_decimation(&self) -> RangeDecimation {
        RangeDecimation::from_code(self.range_decimation_raw)
    }

    /// Whether this packet carries a valid sub-commutated ancillary data
    /// word (position 1..=64 in the ephemeris/attitude cycle). The 6-bit
    /// wire field always decodes to a value in this range, so this is
    /// `true` for every packet; whether the ECC in question actually
    /// populates the field with meaningful data is a property of
    /// [`Self::ecc_number`], not of this counter's bit pattern.
    pub fn has_subcom_word(&self) -> bool {
        (1..=64).contains(&self.subcom_counter)
    }
}
