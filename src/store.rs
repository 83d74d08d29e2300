// src/store.rs
//
// Persistence for the consolidated store: JSON array of records, the
// delimited mirror, the run-metadata sidecar, and the error side-channel.
// Every artifact goes through write_atomic, so a failed run leaves the
// previous files untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::consolidate::MergeStats;
use crate::csv::{self, Delim};
use crate::file::write_atomic;
use crate::params::{ERROR_FILENAME, EVENTS_JSON_FILENAME, EVENTS_TABLE_STEM, META_FILENAME};
use crate::record::EventRecord;

pub fn events_json_path(out_dir: &Path) -> PathBuf {
    out_dir.join(EVENTS_JSON_FILENAME)
}

pub fn events_table_path(out_dir: &Path, format: Delim) -> PathBuf {
    out_dir.join(format!("{}.{}", EVENTS_TABLE_STEM, format.ext()))
}

pub fn meta_path(out_dir: &Path) -> PathBuf {
    out_dir.join(META_FILENAME)
}

/// Load the previously persisted store.
///
/// Missing file → empty store (first run). Unreadable or non-array
/// contents → empty store with a warning; the next successful run
/// replaces the bad file wholesale. Rows without a usable integer
/// identity are excluded so the in-memory invariant holds.
pub fn load_records(path: &Path) -> Vec<EventRecord> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!("could not read existing store {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let rows: Vec<Value> = match serde_json::from_str(&text) {
        Ok(Value::Array(rows)) => rows,
        Ok(_) => {
            warn!("existing store {} is not an array; starting empty", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("existing store {} unreadable ({}); starting empty", path.display(), e);
            return Vec::new();
        }
    };

    let total = rows.len();
    let records: Vec<EventRecord> = rows
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    if records.len() < total {
        debug!("dropped {} store rows without usable identity", total - records.len());
    }
    records
}

pub fn save_records_json(path: &Path, rows: &[EventRecord]) -> io::Result<()> {
    let text = serde_json::to_string_pretty(rows).map_err(io::Error::other)?;
    write_atomic(path, &text)
}

pub fn save_records_table(path: &Path, rows: &[EventRecord], format: Delim) -> io::Result<()> {
    write_atomic(path, &csv::records_to_string(rows, format))
}

/// Run-metadata sidecar for audit/debugging.
#[derive(Debug, Serialize)]
pub struct RunMeta {
    pub generated_at_utc: String,
    pub input_document: String,
    pub marker: String,
    pub events_count: usize,
    pub output_events_json: String,
    pub output_events_table: String,
    pub dedupe_key: &'static str,
    pub merge_policy: &'static str,
    pub skipped_missing_identity: usize,
    pub duplicates_dropped: usize,
    #[serde(flatten)]
    pub merge: MergeStats,
}

pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn save_meta(path: &Path, meta: &RunMeta) -> io::Result<()> {
    let text = serde_json::to_string_pretty(meta).map_err(io::Error::other)?;
    write_atomic(path, &text)
}

/// Free-text failure trace at a fixed location next to the artifacts.
/// Best effort on purpose: the caller is already failing.
pub fn write_error_trace(out_dir: &Path, trace: &str) -> Option<PathBuf> {
    let path = out_dir.join(ERROR_FILENAME);
    if crate::file::ensure_directory(out_dir).is_err() {
        return None;
    }
    match fs::write(&path, trace) {
        Ok(()) => Some(path),
        Err(e) => {
            warn!("could not write error trace {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DEDUPE_KEY_DESC, MERGE_POLICY_DESC};
    use serde_json::json;

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_records(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn load_skips_rows_without_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let payload = json!([
            {"event_id": 1, "epoch": 10, "actual": "x"},
            {"event_id": 2, "actual": "no epoch"},
            {"event_id": "3", "epoch": 30},
            "not an object"
        ]);
        fs::write(&path, payload.to_string()).unwrap();

        let rows = load_records(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key(), (1, 10));
    }

    #[test]
    fn load_tolerates_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_records(&path).is_empty());
        fs::write(&path, "{\"an\": \"object\"}").unwrap();
        assert!(load_records(&path).is_empty());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut r = EventRecord::new(101, 1_700_000_000);
        r.fields.insert(s!("actual"), json!("3.1%"));
        save_records_json(&path, &[r.clone()]).unwrap();

        let rows = load_records(&path);
        assert_eq!(rows, vec![r]);
    }

    #[test]
    fn meta_serializes_flat_counters() {
        let meta = RunMeta {
            generated_at_utc: utc_now_iso(),
            input_document: s!("in.html"),
            marker: s!("m ="),
            events_count: 3,
            output_events_json: s!("a.json"),
            output_events_table: s!("a.csv"),
            dedupe_key: DEDUPE_KEY_DESC,
            merge_policy: MERGE_POLICY_DESC,
            skipped_missing_identity: 1,
            duplicates_dropped: 0,
            merge: MergeStats { added: 2, matched: 1, updated_fields: 4, newly_released_actual: 1 },
        };
        let v = serde_json::to_value(&meta).unwrap();
        assert_eq!(v["events_count"], 3);
        assert_eq!(v["added"], 2);
        assert_eq!(v["dedupe_key"], "(event_id, epoch)");
    }

    #[test]
    fn error_trace_lands_in_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_error_trace(dir.path(), "boom").unwrap();
        assert!(path.ends_with(ERROR_FILENAME));
        assert_eq!(fs::read_to_string(path).unwrap(), "boom");
    }
}
