//! Chunk Grouper: a single linear pass partitioning the metadata stream into
//! maximal acquisition-chunk runs.

use log::debug;

use crate::metadata::{MetadataTable, PacketMetadata};

/// A contiguous `[start, end)` range of packet-metadata rows sharing one
/// acquisition's constant parameters and monotonic counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub chunk_id: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl ChunkRange {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// The tuple of fields that must stay constant across a chunk.
#[derive(PartialEq)]
struct ChunkKey {
    signal_type: u8,
    swath_num: u8,
    num_quads: u16,
    baq_mode: u8,
    swst: u32,
    swl: u32,
    pri: u32,
    elevation_beam_address: u16,
}

impl ChunkKey {
    fn from_metadata(meta: &PacketMetadata) -> Self {
        Self {
            signal_type: meta.secondary.signal_type_raw,
            swath_num: meta.secondary.swath_number,
            num_quads: meta.secondary.num_quads,
            baq_mode: meta.secondary.baq_mode_raw,
            swst: meta.secondary.swst_raw,
            swl: meta.secondary.swl_raw,
            pri: meta.secondary.pri_raw,
            elevation_beam_address: meta.secondary.elevation_beam_address,
        }
    }
}

/// Partition `table` into maximal acquisition chunks. A new chunk starts
/// whenever the equivalence-relation tuple changes, the PRI count does not
/// increment by exactly 1 (mod 2^32), or the azimuth beam address fails to
/// strictly increase. Deterministic and idempotent for a fixed input table.
pub fn group_chunks(table: &MetadataTable) -> Vec<ChunkRange> {
    let mut chunks = Vec::new();
    if table.is_empty() {
        return chunks;
    }

    let mut chunk_id = 0;
    let mut start = 0;
    let mut current_key = ChunkKey::from_metadata(table.row(0));
    let mut prev_pri_count = table.row(0).secondary.pri_count;
    let mut prev_azimuth = table.row(0).secondary.azimuth_beam_address;

    for index in 1..table.len() {
        let meta = table.row(index);
        let key = ChunkKey::from_metadata(meta);
        let pri_count = meta.secondary.pri_count;
        let azimuth = meta.secondary.azimuth_beam_address;

        let pri_continues = pri_count == prev_pri_count.wrapping_add(1);
        let azimuth_increases = azimuth > prev_azimuth;

        if key != current_key || !pri_continues || !azimuth_increases {
            debug!("chunk {chunk_id} closed at row {index} (start={start}, end={index})");
            chunks.push(ChunkRange {
                chunk_id,
                start_index: start,
                end_index: index,
            });
            chunk_id += 1;
            start = index;
            current_key = key;
        }

        prev_pri_count = pri_count;
        prev_azimuth = azimuth;
    }

    chunks.push(ChunkRange {
        chunk_id,
        start_index: start,
        end_index: table.len(),
    });

    chunks
}
