//! # Universal Calculator GUI Application
//!
//! Iced frontend over [`calc_core::UiState`]. The calculators render into
//! the headless document; this crate draws that document as widgets and
//! sends every click, keystroke and selection back into it.
//!
//! Runs natively (wgpu with tiny-skia fallback) and in the browser through
//! WebGPU. The web shell that hosts the WASM build lives in `assets/web`.

mod app;
mod assets;
mod render;
mod ui;

use calc_core::config::AppConfig;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use app::App;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .compact()
        .init();
}

fn main() -> iced::Result {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        rates_url = %config.rates_url,
        "Universal Calculator starting"
    );
    match assets::verify() {
        Ok(files) => debug!(files, "web shell embedded"),
        Err(err) => warn!(code = err.error_code(), "web shell out of date: {err}"),
    }

    iced::application(move || App::boot(config.clone()), App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window_size((1200.0, 800.0))
        .run()
}
