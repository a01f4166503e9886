//! Packet Walker: locates packet boundaries in a Level 0 file using only the
//! primary header's length field, handing each packet's fixed headers to the
//! Field Decoder and recording the remainder as an opaque payload slice.

use std::fs::File;
use std::path::Path;

use log::warn;
use memmap2::{Mmap, MmapOptions};

use crate::constants::{PRIMARY_HEADER_SIZE, SECONDARY_HEADER_SIZE};
use crate::error::{DecodeError, DecodeResult};
use crate::header::{BaqMode, PrimaryHeader, RangeDecimation, SecondaryHeader};
use crate::metadata::{MetadataTable, PacketMetadata};

/// A memory-mapped Level 0 file. Held read-only for the lifetime of a decode;
/// payload slices borrowed from it must not outlive this value.
pub struct PacketFile {
    mmap: Mmap,
}

impl PacketFile {
    /// Open and memory-map a Level 0 file.
    pub fn open(path: impl AsRef<Path>) -> DecodeResult<Self> {
        let file = File::open(path)?;
        // Safety: the mapped file must not be mutated or truncated by
        // another process for the lifetime of this mapping. This crate
        // only ever reads Level 0 files that downstream callers treat as
        // immutable archival data.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Self { mmap })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Walk this file's packets and produce the full metadata table.
    pub fn parse_metadata(&self) -> DecodeResult<MetadataTable> {
        parse_metadata_from_bytes(self.as_bytes())
    }

    /// Borrow the compressed sample payload described by `meta`.
    pub fn payload<'a>(&'a self, meta: &PacketMetadata) -> &'a [u8] {
        let start = meta.payload_offset as usize;
        &self.as_bytes()[start..start + meta.payload_len]
    }
}

/// Open `path` and walk it end to end, producing one [`PacketMetadata`] row
/// per packet. This is the `parse_metadata` core operation from the external
/// interface.
pub fn parse_metadata(path: impl AsRef<Path>) -> DecodeResult<MetadataTable> {
    let file = PacketFile::open(path)?;
    file.parse_metadata()
}

/// Walk an in-memory byte buffer the same way [`parse_metadata`] walks a
/// file. Exposed directly so tests (and callers who already hold the bytes)
/// don't need a real file on disk.
pub fn parse_metadata_from_bytes(data: &[u8]) -> DecodeResult<MetadataTable> {
    let mut rows = Vec::new();
    let len = data.len() as u64;
    let mut offset: u64 = 0;

    while offset < len {
        let primary_end = offset + PRIMARY_HEADER_SIZE as u64;
        if primary_end > len {
            return Err(DecodeError::TruncatedFile {
                offset,
                expected_len: PRIMARY_HEADER_SIZE,
                available: (len - offset) as usize,
            });
        }
        let primary = PrimaryHeader::parse(&data[offset as usize..primary_end as usize])?;

        let payload_total_len = primary.payload_len();
        let packet_end = primary_end + payload_total_len as u64;
        if packet_end > len {
            return Err(DecodeError::TruncatedFile {
                offset: primary_end,
                expected_len: payload_total_len,
                available: (len - primary_end) as usize,
            });
        }

        if payload_total_len < SECONDARY_HEADER_SIZE {
            warn!(
                "packet at offset {offset} has payload of {payload_total_len} bytes, \
                 shorter than the {SECONDARY_HEADER_SIZE}-byte secondary header; skipping"
            );
            offset = packet_end;
            continue;
        }

        let secondary_start = primary_end as usize;
        let secondary_end = secondary_start + SECONDARY_HEADER_SIZE;
        let secondary = SecondaryHeader::parse(&data[secondary_start..secondary_end])?;
        warn_on_reserved_enum_values(&secondary, offset);

        let payload_offset = secondary_end as u64;
        let payload_len = payload_total_len - SECONDARY_HEADER_SIZE;

        rows.push(PacketMetadata {
            primary,
            secondary,
            payload_offset,
            payload_len,
        });
        offset = packet_end;
    }

    Ok(MetadataTable::new(rows))
}

/// Logs a non-fatal `warn!` for each coded field that decoded to a
/// `Reserved(raw)` value. These packets are still recorded in the metadata
/// table with their raw fields intact; only the anomaly is surfaced.
fn warn_on_reserved_enum_values(secondary: &SecondaryHeader, offset: u64) {
    if let BaqMode::Reserved(raw) = secondary.baq_mode() {
        warn!("packet at offset {offset} has reserved BAQ mode code {raw}");
    }
    if let RangeDecimation::Reserved(raw) = secondary.range_decimation() {
        warn!("packet at offset {offset} has reserved range decimation code {raw}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a minimal valid packet: primary header + secondary header +
    /// `sample_bytes`, all with the mostly-zero fields this test suite needs.
    fn build_packet(sample_bytes: &[u8]) -> Vec<u8> {
        let secondary_len = SECONDARY_HEADER_SIZE;
        let total_payload_len = secondary_len + sample_bytes.len();
        let data_length_field = (total_payload_len - 1) as u16;

        let mut primary = [0u8; PRIMARY_HEADER_SIZE];
        primary[0] = 0b0000_1000; // version=0, type=0, sec_hdr_flag=1
        primary[2] = 0b1100_0000; // sequence_flags = 0b11 (unsegmented), rest of seq count 0
        primary[4..6].copy_from_slice(&data_length_field.to_be_bytes());

        let mut packet = Vec::with_capacity(PRIMARY_HEADER_SIZE + total_payload_len);
        packet.extend_from_slice(&primary);
        packet.extend_from_slice(&[0u8; SECONDARY_HEADER_SIZE]);
        packet.extend_from_slice(sample_bytes);
        packet
    }

    #[test]
    fn single_header_only_packet_yields_one_row_with_empty_payload() {
        let data = build_packet(&[]);
        let table = parse_metadata_from_bytes(&data).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0).payload_len, 0);
    }

    #[test]
    fn two_packets_are_both_recovered() {
        let mut data = build_packet(&[0u8; 8]);
        data.extend(build_packet(&[0u8; 16]));
        let table = parse_metadata_from_bytes(&data).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).payload_len, 8);
        assert_eq!(table.row(1).payload_len, 16);
    }

    #[test]
    fn packet_boundary_closure_matches_file_size() {
        let mut data = build_packet(&[0u8; 4]);
        data.extend(build_packet(&[0u8; 100]));
        data.extend(build_packet(&[]));
        let total_len = data.len();
        let table = parse_metadata_from_bytes(&data).unwrap();
        let reconstructed: usize = table
            .iter()
            .map(|row| PRIMARY_HEADER_SIZE + SECONDARY_HEADER_SIZE + row.payload_len)
            .sum();
        assert_eq!(reconstructed, total_len);
    }

    #[test]
    fn truncated_file_mid_packet_is_an_error() {
        let mut data = build_packet(&[0u8; 10]);
        data.truncate(data.len() - 5);
        let err = parse_metadata_from_bytes(&data).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedFile { .. }));
    }
}
