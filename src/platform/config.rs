// Platkit - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Platkit data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/platkit/ or %APPDATA%\Platkit\)
    pub config_dir: PathBuf,

    /// Data directory for diagnostic logs.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[diagnostics]` section.
    pub diagnostics: DiagnosticsSection,
    /// `[input]` section.
    pub input: InputSection,
    /// `[random]` section.
    pub random: RandomSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[diagnostics]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiagnosticsSection {
    /// Diagnostic log file path (empty = no log file).
    pub log_file: Option<String>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Line buffer capacity in bytes.
    pub line_capacity: Option<usize>,
}

/// `[random]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RandomSection {
    /// Fixed seed; the current time is used when absent.
    pub seed: Option<u64>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Diagnostic log file path.
    pub diagnostic_log: Option<PathBuf>,
    /// Line buffer capacity in bytes.
    pub line_capacity: usize,
    /// Fixed random seed.
    pub random_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            diagnostic_log: None,
            line_capacity: constants::DEFAULT_LINE_CAPACITY,
            random_seed: None,
        }
    }
}

/// Read and parse a config file without validating values.
pub fn read_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Validate raw values against named constants, accumulating warnings.
/// Invalid values fall back to their defaults.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Diagnostics: log_file --
    if let Some(file) = raw.diagnostics.log_file {
        if !file.is_empty() {
            config.diagnostic_log = Some(PathBuf::from(file));
        }
    }

    // -- Input: line_capacity --
    if let Some(capacity) = raw.input.line_capacity {
        if (constants::MIN_LINE_CAPACITY..=constants::ABSOLUTE_MAX_LINE_CAPACITY)
            .contains(&capacity)
        {
            config.line_capacity = capacity;
        } else {
            warnings.push(format!(
                "[input] line_capacity = {capacity} is out of range ({}-{}). Using default ({}).",
                constants::MIN_LINE_CAPACITY,
                constants::ABSOLUTE_MAX_LINE_CAPACITY,
                constants::DEFAULT_LINE_CAPACITY,
            ));
        }
    }

    config.random_seed = raw.random.seed;

    (config, warnings)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let raw = match read_config_file(&config_path) {
        Ok(raw) => raw,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, warnings) = validate(raw);
    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }
    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> RawConfig {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_empty_config_gives_defaults() {
        let (config, warnings) = validate(parse(""));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_all_sections_accepted() {
        let (config, warnings) = validate(parse(
            r#"
            [logging]
            level = "debug"

            [diagnostics]
            log_file = "/var/log/platkit.log"

            [input]
            line_capacity = 4096

            [random]
            seed = 42

            [unknown]
            ignored = true
            "#,
        ));
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.diagnostic_log,
            Some(PathBuf::from("/var/log/platkit.log"))
        );
        assert_eq!(config.line_capacity, 4096);
        assert_eq!(config.random_seed, Some(42));
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let (config, warnings) = validate(parse(
            r#"
            [logging]
            level = "loud"

            [input]
            line_capacity = 1
            "#,
        ));
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.log_level, None);
        assert_eq!(config.line_capacity, constants::DEFAULT_LINE_CAPACITY);
    }

    #[test]
    fn test_empty_log_file_means_none() {
        let (config, _) = validate(parse("[diagnostics]\nlog_file = \"\"\n"));
        assert_eq!(config.diagnostic_log, None);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_parse_error_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[input\nline_capacity = ",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config parse error"));
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[random]\nseed = 7\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.random_seed, Some(7));
    }
}
