//! Sample-payload decoding: Bypass and FDBAQ per-packet decoders plus the
//! parallel Batch Executor that dispatches between them.

pub mod batch;
pub mod bypass;
pub mod fdbaq;
mod fdbaq_tables;

pub use batch::{decode_selection, BatchConfig, ComplexMatrix};
