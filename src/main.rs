mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod router;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use app::App;

fn main() {
    init_tracing();
    launch();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("tracing already initialised: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {}

#[cfg(feature = "desktop")]
fn launch() {
    let mut cfg = dioxus::desktop::Config::new().with_window(
        dioxus::desktop::WindowBuilder::new().with_title("Sistema de Auditoría"),
    );
    match platform::desktop::dirs::default_webview_data_dir() {
        Ok(dir) => cfg = cfg.with_data_directory(dir),
        Err(err) => tracing::warn!(error = %err, "using default webview data directory"),
    }
    dioxus::LaunchBuilder::desktop().with_cfg(cfg).launch(App);
}

#[cfg(not(feature = "desktop"))]
fn launch() {
    dioxus::launch(App);
}
