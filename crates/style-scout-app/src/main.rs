#![warn(missing_docs)]
//! # style-scout-app binary
//!
//! Headless entry point for style-scout. The interactive shell embedding the
//! controller lives outside this workspace; this binary reports the runtime
//! configuration the shell will inherit.

use style_scout_app::logging::{initialize_logger, log_info};
use style_scout_app::{analyze_endpoint_from_env, app_version};

/// CLI entry point.
fn main() {
    if let Err(error) = initialize_logger() {
        eprintln!("failed to initialize run logger: {error}");
        std::process::exit(1);
    }

    let endpoint = analyze_endpoint_from_env();
    log_info(
        "bootstrap",
        "startup",
        &format!("version={} analyze_endpoint={endpoint}", app_version()),
    );

    println!("style-scout-app {}", app_version());
    println!("analyze_endpoint={endpoint} (STYLE_SCOUT_ANALYZE_ENDPOINT)");
}
