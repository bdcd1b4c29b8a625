//! Logging setup shared by the server and client binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Directives are generated for the server and client library crates as well as
/// the binary itself. `RUST_LOG` overrides the generated filter entirely.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "officeverse-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use officeverse_shared::logger::setup_logger;
///
/// setup_logger("officeverse-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_directives(binary_name: &str, level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    format!(
        "officeverse_server={level},officeverse_client={level},{binary_target}={level},tower_http={level}"
    )
}
