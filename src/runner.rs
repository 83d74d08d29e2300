// src/runner.rs
//
// One document per invocation: read the snapshot, run the extract
// pipeline, fold the result into the persisted store, persist all
// artifacts atomically. No partial record set is ever written for a
// document that fails to decode.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::consolidate::{merge_records, sort_records};
use crate::error::{Error, Result};
use crate::extract::{extract_events, FlattenSpec};
use crate::params::Params;
use crate::store;

/// What a run produced, for the frontend to report.
#[derive(Debug)]
pub struct RunSummary {
    pub events_count: usize,
    pub files_written: Vec<PathBuf>,
}

pub fn run(params: &Params) -> Result<RunSummary> {
    if !params.input.exists() {
        return Err(Error::InputMissing(params.input.clone()));
    }
    let doc = fs::read_to_string(&params.input)?;
    info!("read {} ({} bytes)", params.input.display(), doc.len());

    let spec = FlattenSpec::default();
    let outcome = extract_events(&doc, &params.marker, &spec)?;
    info!(
        "extracted {} records ({} skipped without identity, {} duplicates)",
        outcome.records.len(),
        outcome.missing_identity,
        outcome.duplicates
    );

    let json_path = store::events_json_path(&params.out_dir);
    let existing = store::load_records(&json_path);
    info!("loaded {} existing records from {}", existing.len(), json_path.display());

    let (mut rows, stats) = merge_records(existing, outcome.records);
    sort_records(&mut rows);
    info!(
        "consolidated store: {} records ({} added, {} matched, {} fields updated)",
        rows.len(),
        stats.added,
        stats.matched,
        stats.updated_fields
    );

    let table_path = store::events_table_path(&params.out_dir, params.format);
    let meta_path = store::meta_path(&params.out_dir);

    store::save_records_json(&json_path, &rows)?;
    store::save_records_table(&table_path, &rows, params.format)?;

    let meta = store::RunMeta {
        generated_at_utc: store::utc_now_iso(),
        input_document: params.input.display().to_string(),
        marker: params.marker.clone(),
        events_count: rows.len(),
        output_events_json: json_path.display().to_string(),
        output_events_table: table_path.display().to_string(),
        dedupe_key: crate::params::DEDUPE_KEY_DESC,
        merge_policy: crate::params::MERGE_POLICY_DESC,
        skipped_missing_identity: outcome.missing_identity,
        duplicates_dropped: outcome.duplicates,
        merge: stats,
    };
    store::save_meta(&meta_path, &meta)?;

    Ok(RunSummary {
        events_count: rows.len(),
        files_written: vec![json_path, table_path, meta_path],
    })
}
