//! CCSDS primary header (6 bytes, fixed for every packet).

use crate::bitreader::BitReader;
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// Packet type bit: telemetry packets are always `0` for this downlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketType {
    Telemetry,
    /// Reserved for telecommand-style packets; never produced by the
    /// instrument downlink this crate decodes.
    Telecommand,
}

impl PacketType {
    fn from_bit(bit: u32) -> Self {
        if bit == 0 {
            Self::Telemetry
        } else {
            Self::Telecommand
        }
    }
}

/// CCSDS sequence flags (2 bits): whether this packet is a standalone unit
/// or part of a segmented group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceFlags {
    Continuation,
    FirstSegment,
    LastSegment,
    Unsegmented,
}

impl SequenceFlags {
    fn from_code(code: u32) -> Self {
        match code {
            0b00 => Self::Continuation,
            0b01 => Self::FirstSegment,
            0b10 => Self::LastSegment,
            0b11 => Self::Unsegmented,
            _ => unreachable!("2-bit field"),
        }
    }
}

/// The 6-byte CCSDS primary header preceding every packet's secondary
/// header and payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PrimaryHeader {
    /// CCSDS packet version number (3 bits), always 0 for this mission.
    pub version: u8,
    pub packet_type: PacketType,
    /// Whether a secondary header follows (always true for this downlink).
    pub secondary_header_flag: bool,
    /// 7-bit process identifier component of the 11-bit APID.
    pub process_id: u8,
    /// 4-bit packet category component of the 11-bit APID.
    pub packet_category: u8,
    pub sequence_flags: SequenceFlags,
    /// 14-bit packet sequence counter, wraps at 2^14.
    pub packet_sequence_count: u16,
    /// Packet data length minus one: payload bytes following this header
    /// equal `packet_data_length + 1` (the invariant the walker relies on).
    pub packet_data_length: u16,
}

impl PrimaryHeader {
    /// Size of the primary header in bytes.
    pub const SIZE: usize = 6;

    /// Parse a primary header from exactly [`Self::SIZE`] bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        debug_assert_eq!(bytes.len(), Self::SIZE);
        let mut r = BitReader::new(bytes);

        let version = r.read_u(3)? as u8;
        let packet_type = PacketType::from_bit(r.read_u(1)?);
        let secondary_header_flag = r.read_u(1)? == 1;
        let process_id = r.read_u(7)? as u8;
        let packet_category = r.read_u(4)? as u8;
        let sequence_flags = SequenceFlags::from_code(r.read_u(2)?);
        let packet_sequence_count = r.read_u(14)? as u16;
        let packet_data_length = r.read_u(16)? as u16;

        Ok(Self {
            version,
            packet_type,
            secondary_header_flag,
            process_id,
            packet_category,
            sequence_flags,
            packet_sequence_count,
            packet_data_length,
        })
    }

    /// Total number of payload bytes following this header, per the
    /// packet-data-length invariant (`packet_data_length + 1`).
    pub fn payload_len(&self) -> usize {
        self.packet_data_length as usize + 1
    }

    /// The 11-bit Application Process Identifier, reassembled from its two
    /// sub-fields.
    pub fn apid(&self) -> u16 {
        ((self.process_id as u16) << 4) | (self.packet_category as u16 & 0x0F)
    }
}
