//! Core decoder for Sentinel-1 Level 0 SAR downlink space packet files.
//!
//! This crate walks a concatenated stream of CCSDS-style space packets,
//! parses every primary/secondary header field, groups packets into
//! acquisition chunks, decodes Bypass/FDBAQ compressed sample payloads in
//! parallel, and reassembles the sub-commutated ephemeris block. It does not
//! do SAR image focusing, geolocation, caching, or presentation; those are
//! external collaborators built on top of this core.

pub mod bitreader;
pub mod chunk;
pub mod constants;
pub mod decode;
pub mod ephemeris;
pub mod error;
pub mod header;
pub mod metadata;
pub mod sample;
pub mod walker;

pub use chunk::{group_chunks, ChunkRange};
pub use decode::{decode_selection, BatchConfig, ComplexMatrix};
pub use ephemeris::{decode_ephemeris, EphemerisRecord, EphemerisTable, PodTimestamp};
pub use error::{DecodeError, DecodeResult};
pub use metadata::{MetadataTable, PacketMetadata};
pub use sample::Complex32;
pub use walker::{parse_metadata, PacketFile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_single_header_only_packet() {
        let secondary_len = header::SecondaryHeader::SIZE;
        let data_length_field = (secondary_len - 1) as u16;

        let mut primary = [0u8; 6];
        primary[0] = 0b0000_1000;
        primary[2] = 0b1100_0000;
        primary[4..6].copy_from_slice(&data_length_field.to_be_bytes());

        let mut data = Vec::new();
        data.extend_from_slice(&primary);
        data.extend_from_slice(&[0u8; 62]);

        let table = walker::parse_metadata_from_bytes(&data).unwrap();
        assert_eq!(table.len(), 1);

        let matrix = decode_selection(&table, &data, &[0], BatchConfig::default()).unwrap();
        assert_eq!(matrix.shape(), (1, 0));
    }
}
