// src/registry.rs
//
// Address-keyed reconciliation. One registry instance lives for one merge
// pass and is the only mutable state in the pipeline; every rejected
// duplicate with a differing name leaves a conflict entry behind, and
// conflict entries never touch the registry itself.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::addr;

/// Canonical output unit. Address shape is the strict dotted quad the
/// extractor produces; `origin_rank` is the priority rank of the category
/// that won the address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub name: String,
    pub address: String,
    pub category: String,
    pub origin_rank: u32,
}

/// Audit record for a rejected duplicate. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEntry {
    pub address: String,
    pub kept_name: String,
    pub rejected_name: String,
    pub rejected_category: String,
}

/// At most one record per address. Within a rank, first occurrence wins; a
/// numerically lower rank always wins over a higher one regardless of merge
/// arrival order. Manual overrides are just another category merged at the
/// lowest rank number.
#[derive(Debug, Default)]
pub struct Registry {
    by_addr: HashMap<String, usize>,
    records: Vec<DeviceRecord>,
    conflicts: Vec<ConflictEntry>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn conflicts(&self) -> &[ConflictEntry] { &self.conflicts }

    /// Merge one category's `(name, address)` stream in its natural order.
    pub fn merge<I>(&mut self, category: &str, rank: u32, records: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, address) in records {
            self.insert(category, rank, name, address);
        }
    }

    pub fn insert(&mut self, category: &str, rank: u32, name: String, address: String) {
        let Some(&slot) = self.by_addr.get(&address) else {
            self.by_addr.insert(address.clone(), self.records.len());
            self.records.push(DeviceRecord {
                name,
                address,
                category: category.to_string(),
                origin_rank: rank,
            });
            return;
        };

        let kept = &mut self.records[slot];
        if rank < kept.origin_rank {
            // Higher-priority category takes the address over.
            logd!("{}: {:?} ({} r{}) overrides {:?} ({} r{})",
                address, name, category, rank, kept.name, kept.category, kept.origin_rank);
            let old = std::mem::replace(kept, DeviceRecord {
                name,
                address,
                category: category.to_string(),
                origin_rank: rank,
            });
            let kept = &self.records[slot];
            if old.name != kept.name {
                self.conflicts.push(ConflictEntry {
                    address: kept.address.clone(),
                    kept_name: kept.name.clone(),
                    rejected_name: old.name,
                    rejected_category: old.category,
                });
            }
        } else if name != kept.name {
            self.conflicts.push(ConflictEntry {
                address: address.clone(),
                kept_name: kept.name.clone(),
                rejected_name: name,
                rejected_category: category.to_string(),
            });
        }
        // same name: silent, expected duplicate
    }

    /// Consume the registry, records stable-sorted by numeric per-segment
    /// address order.
    pub fn into_parts(self) -> (Vec<DeviceRecord>, Vec<ConflictEntry>) {
        let mut records = self.records;
        records.sort_by_key(|r| addr::sort_key(&r.address));
        (records, self.conflicts)
    }
}
