// src/error.rs
use std::fmt;

/// Fatal configuration errors. Everything recoverable (malformed attributes,
/// unresolved addresses, name conflicts) is reported as data in the output
/// bundle instead — a best-effort registry plus an audit trail beats aborting
/// a multi-hundred-record batch.
#[derive(Debug, PartialEq, Eq)]
pub enum InventoryError {
    /// Two category batches share a priority rank; merging would be
    /// order-dependent, so nothing is merged.
    DuplicateRank { rank: u32, first: String, second: String },
    /// No category batches were supplied.
    EmptyBatchList,
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRank { rank, first, second } => {
                write!(f, "duplicate priority rank {rank}: categories {first:?} and {second:?}")
            }
            Self::EmptyBatchList => write!(f, "no category batches supplied"),
        }
    }
}

impl std::error::Error for InventoryError {}
