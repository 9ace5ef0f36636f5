#[cfg(not(target_arch = "wasm32"))]
pub mod desktop;
pub mod export;
pub mod timer;

/// Yes/no prompt before destructive actions. Targets without a native dialog
/// refuse.
#[cfg(not(target_arch = "wasm32"))]
pub fn confirm(title: &str, description: &str) -> bool {
    desktop::dialogs::confirm(title, description)
}

#[cfg(target_arch = "wasm32")]
pub fn confirm(title: &str, _description: &str) -> bool {
    tracing::warn!(%title, "no confirmation dialog on this target; action refused");
    false
}
