use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;

/// `user_data_{id}_{yyyy-MM-dd}.json`
pub fn export_file_name(user_id: &str, date: NaiveDate) -> String {
    let safe_id: String = user_id
        .trim()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect();
    format!("user_data_{safe_id}_{}.json", date.format("%Y-%m-%d"))
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
        }
    }
    let text = serde_json::to_string_pretty(value).context("failed to serialise export")?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Asks where to save and writes the file. `Ok(None)` when the user cancels.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_json(file_name: &str, value: &Value) -> Result<Option<PathBuf>> {
    let mut dialog = rfd::FileDialog::new()
        .set_file_name(file_name)
        .add_filter("JSON", &["json"]);
    if let Some(dir) = crate::platform::desktop::dirs::default_export_dir() {
        dialog = dialog.set_directory(dir);
    }
    let Some(path) = dialog.save_file() else {
        return Ok(None);
    };
    write_json(&path, value)?;
    tracing::info!(path = %path.display(), "exported user data");
    Ok(Some(path))
}

#[cfg(target_arch = "wasm32")]
pub fn save_json(_file_name: &str, _value: &Value) -> Result<Option<PathBuf>> {
    anyhow::bail!("la descarga de archivos no está disponible en esta plataforma")
}
