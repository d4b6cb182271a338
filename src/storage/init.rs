//! Storage initialization
//!
//! First-run setup: directories, settings and an empty invoice file.

use crate::config::paths::HoaPaths;
use crate::config::settings::Settings;
use crate::error::HoaError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone, so running it twice is harmless.
/// Returns true when settings were newly written.
pub fn initialize_storage(paths: &HoaPaths, settings: &Settings) -> Result<bool, HoaError> {
    paths.ensure_directories()?;

    if !paths.invoices_file().exists() {
        write_json_atomic(
            paths.invoices_file(),
            &serde_json::json!({ "invoices": [] }),
        )?;
    }

    if paths.is_initialized() {
        return Ok(false);
    }

    settings.save(paths)?;
    Ok(true)
}
