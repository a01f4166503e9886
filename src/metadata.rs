//! The per-packet metadata record and the table the Packet Walker produces.

use crate::header::{PrimaryHeader, SecondaryHeader};
use serde::{Deserialize, Serialize};

/// One parsed packet: its primary and secondary headers plus the location of
/// its compressed sample payload inside the source file.
///
/// Header fields are the raw canonical values (see [`SecondaryHeader`]);
/// scaled/typed views are derived on demand through the header accessors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PacketMetadata {
    pub primary: PrimaryHeader,
    pub secondary: SecondaryHeader,
    /// Absolute byte offset of the compressed sample payload (i.e. the
    /// packet bytes following the fixed 68-byte header pair) in the source
    /// file.
    pub payload_offset: u64,
    /// Length in bytes of the compressed sample payload.
    pub payload_len: usize,
}

impl PacketMetadata {
    pub fn num_quads(&self) -> u16 {
        self.secondary.num_quads
    }

    pub fn baq_mode(&self) -> crate::header::BaqMode {
        self.secondary.baq_mode()
    }
}

/// The full parsed packet stream, produced by [`crate::walker::parse_metadata`].
///
/// An array-of-structs table: each row is a self-contained [`PacketMetadata`].
/// Row indices are stable for the lifetime of the table and are what
/// [`crate::chunk`] and selections passed to [`crate::decode`] refer to.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    rows: Vec<PacketMetadata>,
}

impl MetadataTable {
    pub fn new(rows: Vec<PacketMetadata>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &PacketMetadata {
        &self.rows[index]
    }

    pub fn rows(&self) -> &[PacketMetadata] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PacketMetadata> {
        self.rows.iter()
    }
}

impl std::ops::Index<usize> for MetadataTable {
    type Output = PacketMetadata;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_reports_zero_len() {
        let table = MetadataTable::new(vec![]);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
    }
}
