use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::{ProjectDirs, UserDirs};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "audit", "audit-console")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// Where the save dialog opens: the user's downloads, else home.
pub fn default_export_dir() -> Option<PathBuf> {
    let user_dirs = UserDirs::new()?;
    user_dirs
        .download_dir()
        .map(Path::to_path_buf)
        .or_else(|| Some(user_dirs.home_dir().to_path_buf()))
}
