#[cfg(feature = "cli")]
pub mod cli;

/// Where a default authoring installation listens for API sessions.
pub const DEFAULT_WAAPI_URL: &str = "ws://127.0.0.1:8080/waapi";
