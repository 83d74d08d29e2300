// src/logging.rs
//
// File logging bootstrap. The library only speaks through the `log`
// facade; the binary calls init() once with the artifact directory.
// Logging failure must never fail a run; callers warn and move on.

use std::path::Path;
use std::sync::OnceLock;

use flexi_logger::{FileSpec, Logger, LoggerHandle};

static HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

/// Start a file logger under `<out_dir>/logs/`. Level comes from
/// `RUST_LOG` when set, otherwise "info". Idempotent; a second call is
/// a no-op.
pub fn init(out_dir: &Path) -> Result<(), String> {
    if HANDLE.get().is_some() {
        return Ok(());
    }

    let log_dir = out_dir.join("logs");
    let logger = Logger::try_with_env_or_str("info")
        .map_err(|e| format!("bad log spec: {e}"))?
        .log_to_file(FileSpec::default().directory(log_dir).basename("cal_scrape"))
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| format!("could not start logger: {e}"))?;

    let _ = HANDLE.set(logger);
    Ok(())
}
