//! Application initialization.
//!
//! Sets up the logger and locates the databases directory before any
//! database is opened.

mod logger;

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATABASES_DIR;

// Re-export public API
pub use logger::init_logger_with;

/// Resolves the directory databases are loaded from.
///
/// Uses `configured` when given (from `--databases-dir` or
/// `GEOIP_DATABASES_DIR`). Otherwise the directory is `data/databases` under
/// the parent of the executable's directory, the layout of an installed app
/// with its binary in `bin/`. Falls back to `data/databases` relative to the
/// working directory when the executable path is unavailable.
pub fn resolve_databases_dir(configured: Option<&Path>) -> PathBuf {
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }

    let app_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf));

    match app_dir {
        Some(app_dir) => app_dir.join(DEFAULT_DATABASES_DIR),
        None => {
            log::debug!("Executable path unavailable; using relative databases directory");
            PathBuf::from(DEFAULT_DATABASES_DIR)
        }
    }
}
