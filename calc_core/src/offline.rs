//! # Offline Manifest
//!
//! [`PRECACHE_MANIFEST`] lists every core asset the web build needs plus
//! the math typesetting library. The service worker shipped with the web
//! build carries the same list and does the caching: cache-first GETs,
//! background refresh, and the stale copy when the network is gone.
//! `calc_gui` checks its embedded shell against this module at startup.

/// Bump when the manifest changes so old caches are discarded.
pub const CACHE_NAME: &str = "universal-calc-v1";

pub const MATHJAX_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js";

/// Assets that must be cached for full offline operation.
pub const PRECACHE_MANIFEST: &[&str] = &[
    "./",
    "./index.html",
    "./style.css",
    "./calc_gui.js",
    "./calc_gui_bg.wasm",
    MATHJAX_URL,
];

/// Manifest entries produced by the wasm build rather than checked in.
pub const BUILD_ARTIFACTS: &[&str] = &["./calc_gui.js", "./calc_gui_bg.wasm"];

/// Manifest entries served from another origin. The page has to load each
/// of them itself, or precaching them buys nothing.
pub fn external_assets() -> impl Iterator<Item = &'static str> {
    PRECACHE_MANIFEST
        .iter()
        .copied()
        .filter(|url| url.starts_with("https://"))
}

/// Manifest entries checked in next to the page.
pub fn shipped_assets() -> impl Iterator<Item = &'static str> {
    PRECACHE_MANIFEST
        .iter()
        .copied()
        .filter(|url| url.starts_with("./") && *url != "./" && !BUILD_ARTIFACTS.contains(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_includes_typesetting_library() {
        assert!(PRECACHE_MANIFEST.contains(&MATHJAX_URL));
        assert!(BUILD_ARTIFACTS.iter().all(|a| PRECACHE_MANIFEST.contains(a)));
    }

    #[test]
    fn test_manifest_partitions() {
        assert_eq!(external_assets().collect::<Vec<_>>(), vec![MATHJAX_URL]);
        assert_eq!(shipped_assets().collect::<Vec<_>>(), vec!["./index.html", "./style.css"]);
    }
}
