// src/params.rs
use std::path::PathBuf;

use crate::csv::Delim;

pub const DEFAULT_OUT_DIR: &str = "out/calendar";
pub const DEFAULT_INPUT_FILENAME: &str = "calendar_document.html";
pub const EVENTS_JSON_FILENAME: &str = "calendar_all_event.json";
pub const EVENTS_TABLE_STEM: &str = "calendar_all_event";
pub const META_FILENAME: &str = "events.meta.json";
pub const ERROR_FILENAME: &str = "extract_error.txt";

/// Assignment signature of the embedded component state in captured pages.
pub const DEFAULT_MARKER: &str = "window.calendarComponentStates[1] =";

pub const DEDUPE_KEY_DESC: &str = "(event_id, epoch)";
pub const MERGE_POLICY_DESC: &str =
    "merge by key; non-blank incoming fields overwrite, blank never erases";

#[derive(Clone, Debug)]
pub struct Params {
    pub input: PathBuf,        // captured HTML snapshot to read
    pub out_dir: PathBuf,      // artifact directory (store, mirror, meta, logs)
    pub marker: String,        // assignment signature to locate
    pub format: Delim,         // tabular mirror format
}

impl Params {
    pub fn new() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_INPUT_FILENAME),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            marker: s!(DEFAULT_MARKER),
            format: Delim::Csv,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
