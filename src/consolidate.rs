// src/consolidate.rs
//
// Fold a freshly extracted record set into the persisted one, then give
// the store its deterministic total order. Merging is total: it never
// fails, it only appends or overwrites non-blank field values.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::record::{is_blank, EventRecord};

/// Audit counters for one consolidation, surfaced in the run metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MergeStats {
    /// Incoming records with a new identity key.
    pub added: usize,
    /// Incoming records that matched an existing key.
    pub matched: usize,
    /// Field values overwritten with a different non-blank value.
    pub updated_fields: usize,
    /// `actual` values that went from blank to non-blank.
    pub newly_released_actual: usize,
}

/// Per-field last-non-blank-wins merge of `incoming` over `existing`.
/// Produces a new record value; blank incoming fields never erase.
pub fn merge_into(existing: &EventRecord, incoming: &EventRecord, stats: &mut MergeStats) -> EventRecord {
    let mut merged = existing.clone();

    for (name, value) in &incoming.fields {
        if is_blank(value) {
            continue;
        }
        let prev = merged.fields.get(name);
        if prev != Some(value) {
            stats.updated_fields += 1;
        }
        if name == "actual" && prev.is_none_or(is_blank) {
            stats.newly_released_actual += 1;
        }
        merged.fields.insert(name.clone(), value.clone());
    }

    merged
}

/// Merge `incoming` into `existing` by identity key.
/// New keys append; matched keys merge field-by-field. The result is not
/// yet sorted; callers follow up with [`sort_records`].
pub fn merge_records(existing: Vec<EventRecord>, incoming: Vec<EventRecord>) -> (Vec<EventRecord>, MergeStats) {
    let mut stats = MergeStats::default();
    let mut rows: Vec<EventRecord> = Vec::with_capacity(existing.len() + incoming.len());
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();

    // A well-formed store has unique keys; if a prior file does not,
    // the later row wins, same as the incoming fold below.
    for rec in existing {
        match index.get(&rec.key()) {
            Some(&i) => rows[i] = rec,
            None => {
                index.insert(rec.key(), rows.len());
                rows.push(rec);
            }
        }
    }

    for rec in incoming {
        match index.get(&rec.key()) {
            Some(&i) => {
                stats.matched += 1;
                rows[i] = merge_into(&rows[i], &rec, &mut stats);
            }
            None => {
                stats.added += 1;
                index.insert(rec.key(), rows.len());
                rows.push(rec);
            }
        }
    }

    (rows, stats)
}

/// Deterministic store order: epoch descending, then event_id descending.
/// Keys are unique per the store invariant, so the order is total.
pub fn sort_records(rows: &mut [EventRecord]) {
    rows.sort_unstable_by_key(|r| (Reverse(r.epoch), Reverse(r.event_id)));
}
