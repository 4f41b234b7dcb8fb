// Version information for the Clinical Interest Mapper

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "tiered-queries",
    "per-axis-queries",
    "serpapi-search",
    "full-page-extraction",
    "closed-vocabulary-mapping",
    "keyword-mapping",
    "request-cancellation",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Clinical Interest Mapper {}", VERSION_NUMBER)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "features": FEATURES,
    })
}
