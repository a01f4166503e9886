//! Enum mappings for the coded fields of the secondary header.
//!
//! Every mapping here follows the same pattern: a `from_code` constructor
//! that never fails. An out-of-range or undefined code is retained as
//! `Reserved(raw)` rather than rejected, so callers always get the raw
//! integer back even for codes this crate doesn't recognize.

use serde::{Deserialize, Serialize};

/// Baseband Data Compression mode (5-bit field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaqMode {
    Bypass,
    Baq3Bit,
    Baq4Bit,
    Baq5Bit,
    Fdbaq0,
    Fdbaq1,
    Fdbaq2,
    Reserved(u8),
}

impl BaqMode {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Bypass,
            3 => Self::Baq3Bit,
            4 => Self::Baq4Bit,
            5 => Self::Baq5Bit,
            12 => Self::Fdbaq0,
            13 => Self::Fdbaq1,
            14 => Self::Fdbaq2,
            other => Self::Reserved(other),
        }
    }

    /// Raw 5-bit code this value was parsed from (pure inverse of
    /// [`Self::from_code`], required by the raw↔parsed idempotence law).
    pub fn to_code(self) -> u8 {
        match self {
            Self::Bypass => 0,
            Self::Baq3Bit => 3,
            Self::Baq4Bit => 4,
            Self::Baq5Bit => 5,
            Self::Fdbaq0 => 12,
            Self::Fdbaq1 => 13,
            Self::Fdbaq2 => 14,
            Self::Reserved(raw) => raw,
        }
    }

    /// Whether this mode is one of the reserved BAQ 3/4/5-bit variants this
    /// crate declines to decode (an explicit non-goal).
    pub fn is_unsupported_baq(self) -> bool {
        matches!(self, Self::Baq3Bit | Self::Baq4Bit | Self::Baq5Bit)
    }

    pub fn is_fdbaq(self) -> bool {
        matches!(self, Self::Fdbaq0 | Self::Fdbaq1 | Self::Fdbaq2)
    }
}

/// Range decimation filter selection (5-bit RGDEC code). The sample rate
/// after decimation is `(l / m) * 4 * F_REF_HZ`. Code 2 is absent from the
/// defined set and always decodes as [`Self::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeDecimation {
    Known { code: u8, l: u32, m: u32 },
    Reserved(u8),
}

/// (code, l, m) table for the eleven defined RGDEC filters.
const RANGE_DECIMATION_TABLE: [(u8, u32, u32); 11] = [
    (0, 3, 4),
    (1, 2, 3),
    (3, 5, 9),
    (4, 4, 9),
    (5, 3, 8),
    (6, 1, 3),
    (7, 1, 4),
    (8, 3, 19),
    (9, 5, 32),
    (10, 3, 22),
    (11, 4, 33),
]; // Table per the ESA Sentinel-1 SAR space packet decimation-filter definition.

impl RangeDecimation {
    pub fn from_code(code: u8) -> Self {
        match RANGE_DECIMATION_TABLE.iter().find(|(c, _, _)| *c == code) {
            Some(&(code, l, m)) => Self::Known { code, l, m },
            None => Self::Reserved(code),
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            Self::Known { code, .. } => code,
            Self::Reserved(code) => code,
        }
    }

    /// Sample rate in Hz after range decimation, or `None` for a reserved
    /// code (there is no defined filter to derive a rate from).
    pub fn sample_rate_hz(self, f_ref_hz: f64) -> Option<f64> {
        match self {
            Self::Known { l, m, .. } => Some((l as f64 / m as f64) * 4.0 * f_ref_hz),
            Self::Reserved(_) => None,
        }
    }
}

/// Antenna polarisation (3-bit field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarisation {
    Hh,
    Hv,
    Vh,
    Vv,
    Reserved(u8),
}

impl Polarisation {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Hh,
            1 => Self::Hv,
            2 => Self::Vh,
            3 => Self::Vv,
            other => Self::Reserved(other),
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            Self::Hh => 0,
            Self::Hv => 1,
            Self::Vh => 2,
            Self::Vv => 3,
            Self::Reserved(raw) => raw,
        }
    }
}

/// Temperature compensation applied to the receive chain (2-bit field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureCompensation {
    None,
    HOnly,
    VOnly,
    Both,
}

impl TemperatureCompensation {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => Self::None,
            1 => Self::HOnly,
            2 => Self::VOnly,
            _ => Self::Both,
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::HOnly => 1,
            Self::VOnly => 2,
            Self::Both => 3,
        }
    }
}

/// Echo/noise/calibration signal type (4-bit field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    Echo,
    Noise,
    TxCalibration,
    RxCalibration,
    ElevationAntennaPattern,
    AzimuthAntennaPattern,
    Reserved(u8),
}

impl SignalType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Echo,
            1 => Self::Noise,
            8 => Self::TxCalibration,
            9 => Self::RxCalibration,
            10 => Self::ElevationAntennaPattern,
            12 => Self::AzimuthAntennaPattern,
            other => Self::Reserved(other),
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            Self::Echo => 0,
            Self::Noise => 1,
            Self::TxCalibration => 8,
            Self::RxCalibration => 9,
            Self::ElevationAntennaPattern => 10,
            Self::AzimuthAntennaPattern => 12,
            Self::Reserved(raw) => raw,
        }
    }

    pub fn is_echo(self) -> bool {
        matches!(self, Self::Echo)
    }
}

/// Calibration sub-fields, only meaningful when the SAS SSB flag marks this
/// packet as a calibration packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationType {
    TxCal,
    RxCal,
    ElevationPatternAux,
    AzimuthPatternAux,
    Reserved(u8),
}

impl CalibrationType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::TxCal,
            1 => Self::RxCal,
            2 => Self::ElevationPatternAux,
            3 => Self::AzimuthPatternAux,
            other => Self::Reserved(other),
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            Self::TxCal => 0,
            Self::RxCal => 1,
            Self::ElevationPatternAux => 2,
            Self::AzimuthPatternAux => 3,
            Self::Reserved(raw) => raw,
        }
    }
}

/// Instrument test mode (3-bit TSTMOD field). Code 0 is nominal
/// measurement; all other codes are defined test configurations, not
/// errors, so they are carried as `Test` rather than `Reserved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestMode {
    Measurement,
    Test(u8),
}

impl TestMode {
    pub fn from_code(code: u8) -> Self {
        if code == 0 {
            Self::Measurement
        } else {
            Self::Test(code)
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            Self::Measurement => 0,
            Self::Test(code) => code,
        }
    }
}

/// Engineering/Calibration Configuration (ECC) number (8-bit field),
/// identifying the acquisition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EccNumber {
    StripMap(u8),
    InterferometricWideSwath(u8),
    ExtraWideSwath(u8),
    WaveMode,
    NoiseCharacterisation,
    TxCalibration,
    ElevationNotch,
    Reserved(u8),
}

impl EccNumber {
    pub fn from_code(code: u8) -> Self {
        match code {
            1..=6 => Self::StripMap(code),
            8..=10 => Self::InterferometricWideSwath(code - 7),
            11..=15 => Self::ExtraWideSwath(code - 10),
            16 => Self::WaveMode,
            17 => Self::NoiseCharacterisation,
            18 => Self::TxCalibration,
            19 => Self::ElevationNotch,
            other => Self::Reserved(other),
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            Self::StripMap(n) => n,
            Self::InterferometricWideSwath(n) => n + 7,
            Self::ExtraWideSwath(n) => n + 10,
            Self::WaveMode => 16,
            Self::NoiseCharacterisation => 17,
            Self::TxCalibration => 18,
            Self::ElevationNotch => 19,
            Self::Reserved(raw) => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baq_mode_roundtrips() {
        for code in [0u8, 3, 4, 5, 12, 13, 14, 7, 31] {
            let mode = BaqMode::from_code(code);
            assert_eq!(mode.to_code(), code);
        }
    }

    #[test]
    fn baq_mode_classifies_unsupported_and_fdbaq() {
        assert!(BaqMode::from_code(3).is_unsupported_baq());
        assert!(!BaqMode::from_code(0).is_unsupported_baq());
        assert!(BaqMode::from_code(12).is_fdbaq());
        assert!(!BaqMode::from_code(0).is_fdbaq());
    }

    #[test]
    fn range_decimation_reserved_code_two() {
        assert_eq!(RangeDecimation::from_code(2), RangeDecimation::Reserved(2));
        assert_eq!(RangeDecimation::from_code(2).sample_rate_hz(1.0), None);
    }

    #[test]
    fn range_decimation_known_code_has_rate() {
        let rd = RangeDecimation::from_code(0);
        let rate = rd.sample_rate_hz(37.53472224e6).unwrap();
        assert!((rate - (3.0 / 4.0) * 4.0 * 37.53472224e6).abs() < 1e-6);
    }

    #[test]
    fn polarisation_roundtrips() {
        for code in 0u8..8 {
            assert_eq!(Polarisation::from_code(code).to_code(), code);
        }
    }

    #[test]
    fn ecc_number_roundtrips_known_ranges() {
        for code in [1u8, 6, 8, 10, 11, 15, 16, 17, 18, 19] {
            assert_eq!(EccNumber::from_code(code).to_code(), code);
        }
    }

    #[test]
    fn unknown_signal_type_is_reserved_but_retains_raw() {
        let st = SignalType::from_code(5);
        assert_eq!(st, SignalType::Reserved(5));
        assert_eq!(st.to_code(), 5);
    }
}
