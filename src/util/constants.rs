// Platkit - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Platkit";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Platkit";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Line reading
// =============================================================================

/// Default line buffer capacity in bytes, terminator slot included.
/// A line longer than `capacity - 1` bytes is returned in pieces.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// Smallest configurable capacity that can still hold one byte of content.
pub const MIN_LINE_CAPACITY: usize = 2;

/// Hard upper bound on line capacity (prevents configuration mistakes).
pub const ABSOLUTE_MAX_LINE_CAPACITY: usize = 1024 * 1024; // 1 MB

// =============================================================================
// Fatal path
// =============================================================================

/// Exit status used when the fatal path terminates the process itself.
pub const EXIT_FAILURE: i32 = 1;

/// Appended to the diagnostic log when a fatal error occurs while another
/// one is already being handled.
pub const RECURSIVE_ERROR_MARKER: &str = "PLATKIT *** RECURSIVE ERROR ***\n";

// =============================================================================
// Configuration
// =============================================================================

/// Name of the optional configuration file (lives next to the config dir).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log level when neither RUST_LOG, --debug, nor config specify one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
