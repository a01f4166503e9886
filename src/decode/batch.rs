//! Batch Executor: parallel fan-out of payload decoding across a worker
//! pool, assembling a dense row-major output matrix.

use rayon::prelude::*;

use crate::decode::{bypass::decode_bypass, fdbaq::decode_fdbaq};
use crate::error::DecodeError;
use crate::header::BaqMode;
use crate::metadata::MetadataTable;
use crate::sample::Complex32;

/// Tunable knobs for the Batch Executor.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Bounds the number of rows decoded in flight at once, to cap peak
    /// memory when a selection is very large. Does not affect the result.
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 256 }
    }
}

/// A dense `(num_packets, 2 * num_quads)` matrix of decoded complex samples,
/// plus any per-row decode failures.
#[derive(Debug, Clone)]
pub struct ComplexMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex32>,
    /// `(row index into the selection, error)` for rows that failed to
    /// decode. Those rows are left as zero in `data`.
    pub failed_rows: Vec<(usize, String)>,
}

impl ComplexMatrix {
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, index: usize) -> &[Complex32] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[Complex32] {
        &self.data
    }
}

/// Decode the payloads at `indices` into `table`, dispatching each row to
/// the Bypass or FDBAQ decoder based on its BAQ mode and writing results
/// into a pre-allocated dense matrix. Row *i* of the output always
/// corresponds to `indices[i]`, independent of task completion order.
///
/// All selected rows must share the same `num_quads`; a mismatch is
/// reported as [`DecodeError::InconsistentChunk`] rather than silently
/// truncating the output.
pub fn decode_selection(
    table: &MetadataTable,
    file_bytes: &[u8],
    indices: &[usize],
    config: BatchConfig,
) -> Result<ComplexMatrix, DecodeError> {
    let cols = if indices.is_empty() {
        0
    } else {
        2 * table.row(indices[0]).num_quads() as usize
    };
    let expected_num_quads = if indices.is_empty() { 0 } else { table.row(indices[0]).num_quads() };

    for (row, &idx) in indices.iter().enumerate() {
        let actual = table.row(idx).num_quads();
        if actual != expected_num_quads {
            return Err(DecodeError::InconsistentChunk {
                row,
                expected: expected_num_quads,
                actual,
            });
        }
    }

    let mut data = vec![Complex32::ZERO; indices.len() * cols];
    let mut failed_rows = Vec::new();

    for batch_start in (0..indices.len()).step_by(config.batch_size.max(1)) {
        let batch_end = (batch_start + config.batch_size.max(1)).min(indices.len());
        let batch_indices = &indices[batch_start..batch_end];

        let results: Vec<Result<Vec<Complex32>, DecodeError>> = batch_indices
            .par_iter()
            .map(|&idx| decode_row(table, file_bytes, idx))
            .collect();

        for (offset, result) in results.into_iter().enumerate() {
            let row = batch_start + offset;
            match result {
                Ok(samples) => {
                    data[row * cols..(row + 1) * cols].copy_from_slice(&samples);
                }
                Err(err) => {
                    failed_rows.push((row, err.to_string()));
                }
            }
        }
    }

    Ok(ComplexMatrix {
        rows: indices.len(),
        cols,
        data,
        failed_rows,
    })
}

fn decode_row(table: &MetadataTable, file_bytes: &[u8], idx: usize) -> Result<Vec<Complex32>, DecodeError> {
    let meta = table.row(idx);
    let payload = &file_bytes[meta.payload_offset as usize..meta.payload_offset as usize + meta.payload_len];
    let num_quads = meta.num_quads() as usize;

    match meta.baq_mode() {
        BaqMode::Bypass => decode_bypass(payload, num_quads),
        BaqMode::Fdbaq0 | BaqMode::Fdbaq1 | BaqMode::Fdbaq2 => decode_fdbaq(payload, num_quads),
        mode @ (BaqMode::Baq3Bit | BaqMode::Baq4Bit | BaqMode::Baq5Bit) => {
            Err(DecodeError::UnsupportedBaq { mode, row: idx })
        }
        mode @ BaqMode::Reserved(_) => Err(DecodeError::UnsupportedBaq { mode, row: idx }),
    }
}
