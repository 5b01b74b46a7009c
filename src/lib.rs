// src/lib.rs
//
// Extraction + reconciliation core for monitoring-dashboard device exports.
// The caller splits a document into control-record fragments and hands them
// in per category; we hand back a canonical, address-keyed device registry
// plus an audit trail. No I/O happens in here — file discovery, encoding
// detection and CSV/JSON writing belong to the calling shell.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod core;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod registry;
pub mod report;

pub use error::InventoryError;
pub use extract::{AttrSet, Fragment, ResolveRules};
pub use pipeline::{build_inventory, CategoryBatch};
pub use registry::{ConflictEntry, DeviceRecord, Registry};
pub use report::{InventoryBundle, InventorySummary, UnresolvedEntry};
