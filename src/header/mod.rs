//! Fixed-size header parsing: the 6-byte CCSDS primary header and the
//! 62-byte SAR secondary header that together precede every packet's
//! compressed sample payload.

mod fields;
mod primary;
mod secondary;

pub use fields::{
    BaqMode, CalibrationType, EccNumber, Polarisation, RangeDecimation, SignalType, TemperatureCompensation,
    TestMode,
};
pub use primary::{PacketType, PrimaryHeader, SequenceFlags};
pub use secondary::SecondaryHeader;
