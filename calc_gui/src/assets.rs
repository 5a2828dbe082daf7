//! Embedded web shell.
//!
//! `assets/web` holds the page, stylesheet and service worker that host the
//! WASM build. They are compiled into the binary so the shell and the
//! offline manifest in [`calc_core::offline`] can be checked against each
//! other at startup.

use rust_embed::RustEmbed;

use calc_core::offline::{external_assets, shipped_assets, CACHE_NAME, PRECACHE_MANIFEST};
use calc_core::{CalcError, CalcResult};

#[derive(RustEmbed)]
#[folder = "assets/web"]
pub struct WebShell;

/// The worker script registers itself and is not pre-cached.
pub const SERVICE_WORKER: &str = "sw.js";

pub const PAGE: &str = "index.html";

const LIST_START: &str = "PRECACHE_URLS = ";

/// Precache list declared inside the service worker script.
pub fn worker_manifest() -> CalcResult<Vec<String>> {
    let source = worker_source()?;
    let start = source
        .find(LIST_START)
        .ok_or_else(|| CalcError::file_error("read", SERVICE_WORKER, "no precache list"))?
        + LIST_START.len();
    let end = source[start..]
        .find("];")
        .ok_or_else(|| CalcError::file_error("read", SERVICE_WORKER, "unterminated precache list"))?
        + start
        + 1;
    serde_json::from_str(&source[start..end])
        .map_err(|e| CalcError::file_error("parse", SERVICE_WORKER, e.to_string()))
}

fn worker_source() -> CalcResult<String> {
    embedded_text(SERVICE_WORKER)
}

fn embedded_text(path: &str) -> CalcResult<String> {
    let file = WebShell::get(path).ok_or_else(|| CalcError::file_error("read", path, "not embedded"))?;
    String::from_utf8(file.data.into_owned()).map_err(|e| CalcError::file_error("read", path, e.to_string()))
}

/// Cross-origin manifest entries the page never loads.
fn unloaded_assets(page: &str) -> Vec<&'static str> {
    external_assets()
        .filter(|url| !page.contains(&format!("src=\"{url}\"")))
        .collect()
}

/// Check the embedded shell against the offline manifest. Returns the
/// number of embedded files.
pub fn verify() -> CalcResult<usize> {
    for url in shipped_assets() {
        let path = url.trim_start_matches("./");
        if WebShell::get(path).is_none() {
            return Err(CalcError::file_error("embed", path, "listed in the precache manifest but missing"));
        }
    }

    let declared = worker_manifest()?;
    if declared != PRECACHE_MANIFEST {
        return Err(CalcError::file_error(
            "verify",
            SERVICE_WORKER,
            "precache list differs from the offline manifest",
        ));
    }
    if !worker_source()?.contains(CACHE_NAME) {
        return Err(CalcError::file_error("verify", SERVICE_WORKER, format!("cache name is not {CACHE_NAME}")));
    }
    if let Some(url) = unloaded_assets(&embedded_text(PAGE)?).first() {
        return Err(CalcError::file_error("verify", PAGE, format!("precaches {url} but never loads it")));
    }

    Ok(WebShell::iter().count())
}
