// src/extract/flatten.rs
//
// Walk the decoded day → event grouping into flat EventRecords.
// Events without a usable integer (id, epoch) pair are skipped and
// counted, never surfaced as errors. Dedupe within one document keeps
// the first occurrence of each identity key.

use chrono::{DateTime, SecondsFormat};
use serde_json::{Map, Value};

use crate::core::sanitize::strip_tags;
use crate::record::EventRecord;

/// Impact label → score table. Exact membership on the trimmed,
/// lower-cased label; anything else scores 0.
#[derive(Clone, Debug)]
pub struct ImpactTable(Vec<(String, u8)>);

impl ImpactTable {
    pub fn new(entries: Vec<(String, u8)>) -> Self {
        Self(entries)
    }

    pub fn score(&self, folded_label: &str) -> u8 {
        self.0
            .iter()
            .find(|(label, _)| label == folded_label)
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }
}

impl Default for ImpactTable {
    fn default() -> Self {
        Self(vec![(s!("high"), 3), (s!("medium"), 2), (s!("low"), 1)])
    }
}

/// Shape of the decoded tree and the impact table, passed explicitly so
/// several configurations can coexist (and so tests can rename keys).
#[derive(Clone, Debug)]
pub struct FlattenSpec {
    pub days_key: String,
    pub day_label_key: String,
    pub events_key: String,
    pub id_key: String,
    pub epoch_key: String,
    pub impact_key: String,
    pub impact_table: ImpactTable,
}

impl Default for FlattenSpec {
    fn default() -> Self {
        Self {
            days_key: s!("days"),
            day_label_key: s!("date"),
            events_key: s!("events"),
            id_key: s!("id"),
            epoch_key: s!("dateline"),
            impact_key: s!("impactName"),
            impact_table: ImpactTable::default(),
        }
    }
}

/// Flattened records plus the per-document skip counters.
#[derive(Debug, Default)]
pub struct FlattenOutcome {
    pub records: Vec<EventRecord>,
    /// Events without a usable integer (id, epoch) pair.
    pub missing_identity: usize,
    /// Later occurrences of an identity key already seen in this document.
    pub duplicates: usize,
}

pub fn flatten_events(tree: &Value, spec: &FlattenSpec) -> FlattenOutcome {
    let mut out = FlattenOutcome::default();
    let mut seen: std::collections::HashSet<(i64, i64)> = std::collections::HashSet::new();

    let days = match tree.get(&spec.days_key).and_then(Value::as_array) {
        Some(days) => days,
        None => return out,
    };

    for day in days {
        let day_label = day
            .get(&spec.day_label_key)
            .and_then(Value::as_str)
            .map(strip_tags)
            .unwrap_or_default();

        let events = match day.get(&spec.events_key).and_then(Value::as_array) {
            Some(events) => events,
            None => continue,
        };

        for ev in events {
            let obj = match ev.as_object() {
                Some(obj) => obj,
                None => {
                    out.missing_identity += 1;
                    continue;
                }
            };

            let id = obj.get(&spec.id_key).and_then(Value::as_i64);
            let epoch = obj.get(&spec.epoch_key).and_then(Value::as_i64);
            let (id, epoch) = match (id, epoch) {
                (Some(id), Some(epoch)) => (id, epoch),
                _ => {
                    out.missing_identity += 1;
                    continue;
                }
            };

            if !seen.insert((id, epoch)) {
                out.duplicates += 1;
                continue;
            }

            let impact = obj
                .get(&spec.impact_key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_lowercase();

            let mut fields = Map::new();
            fields.insert(s!("day_label"), Value::String(day_label.clone()));
            fields.insert(s!("datetime_utc"), epoch_to_rfc3339(epoch));
            fields.insert(s!("impact"), Value::String(impact.clone()));
            fields.insert(
                s!("impact_score"),
                Value::from(spec.impact_table.score(&impact)),
            );

            // remaining event fields pass through verbatim for audit
            for (k, v) in obj {
                if *k == spec.id_key || *k == spec.epoch_key || *k == spec.impact_key {
                    continue;
                }
                fields.insert(k.clone(), v.clone());
            }

            out.records.push(EventRecord { event_id: id, epoch, fields });
        }
    }

    out
}

/// RFC 3339 rendering of a unix epoch, null when out of range.
fn epoch_to_rfc3339(epoch: i64) -> Value {
    match DateTime::from_timestamp(epoch, 0) {
        Some(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => Value::Null,
    }
}
