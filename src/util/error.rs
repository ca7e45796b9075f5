// Platkit - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Only the outer surfaces (config, opening files) return these; allocation
// and mid-stream read failures go through `Diagnostics::fatal` instead.

use std::collections::TryReserveError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all recoverable Platkit operations.
#[derive(Debug)]
pub enum PlatkitError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Memory could not be obtained.
    Memory(MemoryError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for PlatkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Memory(e) => write!(f, "Memory error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PlatkitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Memory(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Memory errors
// ---------------------------------------------------------------------------

/// Reasons a checked allocation can fail. Rendered into the fatal message.
#[derive(Debug)]
pub enum MemoryError {
    /// The allocator refused the request.
    Exhausted {
        requested: usize,
        source: TryReserveError,
    },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { requested, source } => {
                write!(f, "cannot allocate {requested} bytes: {source}")
            }
        }
    }
}

impl std::error::Error for MemoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Exhausted { source, .. } => Some(source),
        }
    }
}

impl From<MemoryError> for PlatkitError {
    fn from(e: MemoryError) -> Self {
        Self::Memory(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for PlatkitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for Platkit results.
pub type Result<T> = std::result::Result<T, PlatkitError>;
