// src/report.rs
//
// Audit-side output. Nothing in here ever fails a batch; unresolved and
// conflicting records are collected for review while the canonical registry
// keeps whatever could be recovered.

use serde::Serialize;

use crate::extract::AttrSet;
use crate::registry::{ConflictEntry, DeviceRecord};

/// How much of the raw onclick handler to keep for audit. Full popup bodies
/// run to kilobytes of markup and drown the report.
const ONCLICK_SNIPPET_LEN: usize = 120;

/// A fragment no strategy could derive an address from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEntry {
    pub fragment_id: usize,
    pub raw_value: Option<String>,
    pub raw_title: Option<String>,
    pub raw_onclick_snippet: Option<String>,
}

impl UnresolvedEntry {
    pub fn from_attrs(fragment_id: usize, attrs: &AttrSet) -> UnresolvedEntry {
        UnresolvedEntry {
            fragment_id,
            raw_value: attrs.value.clone(),
            raw_title: attrs.title.clone(),
            raw_onclick_snippet: attrs.onclick.as_deref().map(snippet),
        }
    }
}

fn snippet(s: &str) -> String {
    if s.len() <= ONCLICK_SNIPPET_LEN {
        return s.to_string();
    }
    let mut cut = ONCLICK_SNIPPET_LEN;
    while !s.is_char_boundary(cut) { cut -= 1; }
    join!(&s[..cut], "…")
}

/// End-of-run counters, the same tallies the one-shot import scripts used to
/// print before this was a library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub fragments_seen: usize,
    pub controls_skipped: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub conflicts: usize,
}

/// Canonical output of one reconciliation run: records sorted by address
/// (numeric per segment), plus the audit trail. Serialization is the
/// caller's job.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryBundle {
    pub records: Vec<DeviceRecord>,
    pub conflicts: Vec<ConflictEntry>,
    pub unresolved: Vec<UnresolvedEntry>,
    pub summary: InventorySummary,
}
