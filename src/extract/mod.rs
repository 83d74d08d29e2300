// src/extract/mod.rs
//
// Document pipeline: locate → normalize → decode → flatten.
// Pure text-in, records-out; no I/O happens in here.

mod flatten;
mod locate;
mod normalize;

pub use flatten::{flatten_events, FlattenOutcome, FlattenSpec, ImpactTable};
pub use locate::{locate_literal, LiteralSpan};
pub use normalize::normalize_literal;

use serde_json::Value;

use crate::error::{Error, Result};

/// Strict decode of normalized text. No repair beyond the four rewrite
/// passes: whatever the decoder rejects is surfaced as-is, with the
/// decoder's position attached. No partial trees.
pub fn decode_literal(json_text: &str) -> Result<Value> {
    serde_json::from_str(json_text).map_err(|e| Error::Decode {
        line: e.line(),
        column: e.column(),
        source: e,
    })
}

/// Run the whole pipeline over one document.
/// Locate/decode failures are fatal for the document; identity skips and
/// intra-document duplicates come back in the outcome counters.
pub fn extract_events(doc: &str, marker: &str, spec: &FlattenSpec) -> Result<FlattenOutcome> {
    let span = locate_literal(doc, marker)?;
    log::debug!("literal span: {}..{} ({} bytes)", span.start, span.end, span.end - span.start);

    let normalized = normalize_literal(span.slice(doc));
    let tree = decode_literal(&normalized)?;

    Ok(flatten_events(&tree, spec))
}
