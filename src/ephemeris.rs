//! Ephemeris Reassembler: collects the 64-word sub-commutated ancillary
//! block scattered across 64 consecutive packets and decodes the onboard
//! position/velocity/attitude/time record it carries.
//!
//! The table in the format definition groups fields by byte size without
//! spelling out every word boundary; this module resolves that into a
//! concrete sequential big-endian layout (positions, then velocities, then
//! quaternion, then angular rates, then a POD timestamp), matching the field
//! order and byte widths the format defines.

use byteorder::{BigEndian, ByteOrder};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::metadata::MetadataTable;

/// UTC timestamp carried in an ephemeris record's POD data stamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PodTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

/// One decoded ephemeris/attitude sample, reassembled from a 64-packet
/// sub-commutated run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisRecord {
    pub x_pos_m: f64,
    pub y_pos_m: f64,
    pub z_pos_m: f64,
    pub x_vel_mps: f32,
    pub y_vel_mps: f32,
    pub z_vel_mps: f32,
    pub quaternion: [f32; 4],
    pub angular_rate_rps: [f32; 3],
    pub timestamp: PodTimestamp,
    /// Row index of the run's first packet (sub-commutated counter = 1) in
    /// the source [`MetadataTable`].
    pub start_index: usize,
}

/// All ephemeris records recovered from a metadata table, plus a count of
/// runs that started but never completed (a gap, a disordered counter, or
/// truncation at end of file).
#[derive(Debug, Clone, Default)]
pub struct EphemerisTable {
    rows: Vec<EphemerisRecord>,
    pub skipped_runs: usize,
}

impl EphemerisTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &EphemerisRecord {
        &self.rows[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EphemerisRecord> {
        self.rows.iter()
    }
}

const WORDS_PER_RUN: usize = 64;

enum RunState {
    Idle,
    Accumulating { start_index: usize, next_expected: u8, words: Vec<u16> },
}

/// Scan `table` for complete 64-packet sub-commutated runs and decode each
/// into an [`EphemerisRecord`].
pub fn decode_ephemeris(table: &MetadataTable) -> EphemerisTable {
    let mut rows = Vec::new();
    let mut skipped_runs = 0usize;
    let mut state = RunState::Idle;

    for (index, meta) in table.iter().enumerate() {
        let counter = meta.secondary.subcom_counter;
        let word = meta.secondary.subcom_data_word;

        state = match state {
            RunState::Idle => {
                if counter == 1 {
                    RunState::Accumulating { start_index: index, next_expected: 2, words: vec![word] }
                } else {
                    RunState::Idle
                }
            }
            RunState::Accumulating { start_index, next_expected, mut words } => {
                if counter == next_expected {
                    words.push(word);
                    if words.len() == WORDS_PER_RUN {
                        rows.push(decode_record(start_index, &words));
                        RunState::Idle
                    } else {
                        RunState::Accumulating { start_index, next_expected: next_expected + 1, words }
                    }
                } else if counter == 1 {
                    debug!("ephemeris run starting at row {start_index} abandoned at row {index}: counter restarted at 1 after reaching {next_expected}");
                    skipped_runs += 1;
                    RunState::Accumulating { start_index: index, next_expected: 2, words: vec![word] }
                } else {
                    debug!(
                        "ephemeris run starting at row {start_index} abandoned at row {index}: expected counter {next_expected}, got {counter}"
                    );
                    skipped_runs += 1;
                    RunState::Idle
                }
            }
        };
    }

    if let RunState::Accumulating { start_index, next_expected, .. } = state {
        debug!("ephemeris run starting at row {start_index} truncated at end of file, expected counter {next_expected}");
        skipped_runs += 1;
    }

    EphemerisTable { rows, skipped_runs }
}

fn decode_record(start_index: usize, words: &[u16]) -> EphemerisRecord {
    debug_assert_eq!(words.len(), WORDS_PER_RUN);
    let mut block = [0u8; WORDS_PER_RUN * 2];
    for (i, &word) in words.iter().enumerate() {
        BigEndian::write_u16(&mut block[i * 2..i * 2 + 2], word);
    }

    let x_pos_m = BigEndian::read_f64(&block[0..8]);
    let y_pos_m = BigEndian::read_f64(&block[8..16]);
    let z_pos_m = BigEndian::read_f64(&block[16..24]);

    let x_vel_mps = BigEndian::read_f32(&block[24..28]);
    let y_vel_mps = BigEndian::read_f32(&block[28..32]);
    let z_vel_mps = BigEndian::read_f32(&block[32..36]);

    let quaternion = [
        BigEndian::read_f32(&block[36..40]),
        BigEndian::read_f32(&block[40..44]),
        BigEndian::read_f32(&block[44..48]),
        BigEndian::read_f32(&block[48..52]),
    ];

    let angular_rate_rps = [
        BigEndian::read_f32(&block[52..56]),
        BigEndian::read_f32(&block[56..60]),
        BigEndian::read_f32(&block[60..64]),
    ];

    let timestamp = PodTimestamp {
        year: BigEndian::read_u16(&block[64..66]),
        month: block[66],
        day: block[67],
        hour: block[68],
        minute: block[69],
        second: block[70],
        millisecond: BigEndian::read_u16(&block[72..74]),
    };

    EphemerisRecord {
        x_pos_m,
        y_pos_m,
        z_pos_m,
        x_vel_mps,
        y_vel_mps,
        z_vel_mps,
        quaternion,
        angular_rate_rps,
        timestamp,
        start_index,
    }
}
