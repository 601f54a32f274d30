//! Process-wide logging setup shared by every warden binary.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide structured logging.
///
/// `RUST_LOG` takes precedence over `default_level`. Safe to call multiple
/// times; subsequent calls are no-ops.
pub fn init(default_level: &str) {
    tracing::init(default_level);
}
