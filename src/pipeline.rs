// src/pipeline.rs
//
// Batch orchestration: validate the priority configuration, then run every
// category's fragments through extraction and fold the results into one
// registry. Single-threaded and deterministic — fragment order within a
// category and the caller's category list drive everything, so re-running on
// unchanged input reproduces the bundle bit for bit.

use std::collections::HashMap;

use crate::error::InventoryError;
use crate::extract::{resolve_fragment, Fragment, Resolution, ResolveRules};
use crate::registry::Registry;
use crate::report::{InventoryBundle, InventorySummary};

/// One category dataset: a label, its priority rank (lower wins) and the
/// fragments split out of that category's export document.
#[derive(Debug, Clone)]
pub struct CategoryBatch {
    pub category: String,
    pub rank: u32,
    pub fragments: Vec<Fragment>,
}

impl CategoryBatch {
    pub fn new(category: impl Into<String>, rank: u32, fragments: Vec<Fragment>) -> CategoryBatch {
        CategoryBatch { category: category.into(), rank, fragments }
    }
}

/// Run the whole pipeline over one or more category batches.
///
/// Priority ranks are validated up front: a duplicate rank is the one fatal
/// configuration error, surfaced before anything is merged — guessing
/// priority would make the inventory depend on argument order.
pub fn build_inventory(
    batches: &[CategoryBatch],
    rules: &ResolveRules,
) -> Result<InventoryBundle, InventoryError> {
    validate_ranks(batches)?;

    let mut registry = Registry::new();
    let mut unresolved = Vec::new();
    let mut summary = InventorySummary::default();

    for batch in batches {
        logf!("Merge: category={} rank={} fragments={}",
            batch.category, batch.rank, batch.fragments.len());

        for fragment in &batch.fragments {
            summary.fragments_seen += 1;
            match resolve_fragment(fragment, rules) {
                Resolution::Device { name, address } => {
                    summary.resolved += 1;
                    registry.insert(&batch.category, batch.rank, name, address);
                }
                Resolution::Control => summary.controls_skipped += 1,
                Resolution::Unresolved(entry) => {
                    summary.unresolved += 1;
                    unresolved.push(entry);
                }
            }
        }
    }

    let (records, conflicts) = registry.into_parts();
    summary.conflicts = conflicts.len();

    Ok(InventoryBundle { records, conflicts, unresolved, summary })
}

fn validate_ranks(batches: &[CategoryBatch]) -> Result<(), InventoryError> {
    if batches.is_empty() {
        return Err(InventoryError::EmptyBatchList);
    }
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for batch in batches {
        if let Some(first) = seen.insert(batch.rank, batch.category.as_str()) {
            return Err(InventoryError::DuplicateRank {
                rank: batch.rank,
                first: first.to_string(),
                second: batch.category.clone(),
            });
        }
    }
    Ok(())
}
