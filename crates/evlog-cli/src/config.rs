//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log file used when a command is given no path.
    pub log_path: PathBuf,
    /// Field delimiter for CSV export.
    pub csv_delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: data_dir.join("events.log"),
            csv_delimiter: ',',
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (EVLOG_*)
        figment = figment.merge(Env::prefixed("EVLOG_"));

        figment.extract()
    }

    /// The explicit path if given, else the configured log.
    pub fn resolve_log_path(&self, path: Option<&Path>) -> PathBuf {
        path.map_or_else(|| self.log_path.clone(), Path::to_path_buf)
    }
}

/// Returns the platform-specific config directory for evlog.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("evlog"))
}

/// Returns the platform-specific data directory for evlog.
///
/// On Linux: `~/.local/share/evlog`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("evlog"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_evlog() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "evlog");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_log() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.log_path, data_dir.join("events.log"));
        assert_eq!(config.csv_delimiter, ',');
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_path = \"/tmp/custom.log\"\ncsv_delimiter = \";\"").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.log_path, PathBuf::from("/tmp/custom.log"));
        assert_eq!(config.csv_delimiter, ';');
    }

    #[test]
    fn test_resolve_log_path_prefers_argument() {
        let config = Config {
            log_path: PathBuf::from("/default.log"),
            csv_delimiter: ',',
        };
        assert_eq!(
            config.resolve_log_path(Some(Path::new("given.log"))),
            PathBuf::from("given.log")
        );
        assert_eq!(config.resolve_log_path(None), PathBuf::from("/default.log"));
    }
}
