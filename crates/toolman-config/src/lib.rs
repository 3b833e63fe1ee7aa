//! Configuration for the toolman CLI
//!
//! The configuration file is optional. When it is absent every setting falls
//! back to its default, so a fresh machine only needs `go` on `PATH`.
//!
//! Lookup order for the file:
//! 1. `$TOOLMAN_CONFIG` (tests / isolated runs)
//! 2. `~/.config/toolman/toolman.toml` (`%APPDATA%\toolman\toolman.toml` on Windows)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use which::which;

/// Program invoked as `<installer> install <tool>` when nothing else is configured
pub const DEFAULT_INSTALLER: &str = "go";

/// Environment variable pointing at an alternative configuration file
pub const CONFIG_ENV: &str = "TOOLMAN_CONFIG";

/// Environment variable overriding the configured installer program
pub const INSTALLER_ENV: &str = "TOOLMAN_INSTALLER";

/// Error type for configuration loading and installer resolution
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`Config`]
    #[error("cannot parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// The installer program could not be located
    #[error("installer '{program}' not found: {source}")]
    InstallerNotFound {
        program: String,
        #[source]
        source: which::Error,
    },
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Program used to install tools (default: `go`)
    pub installer: Option<String>,
    /// Optional log file; every console message is mirrored there
    pub log_file: Option<String>,
}

impl Config {
    /// Location of the configuration file
    pub fn path() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir().map(|home| {
            home.join(".config")
                .join("toolman")
                .join("toolman.toml")
        });

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir().map(|dir| dir.join("toolman").join("toolman.toml"));

        default
    }

    /// Load the configuration from [`Config::path`], or defaults if there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load the configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Installer program name, honoring `$TOOLMAN_INSTALLER`
    pub fn installer_program(&self) -> String {
        select_installer(std::env::var(INSTALLER_ENV).ok(), self.installer.as_deref())
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

/// Locate `program` on `PATH`, or check it directly when it is a path
pub fn resolve_program(program: &str) -> Result<PathBuf, ConfigError> {
    which(program).map_err(|source| ConfigError::InstallerNotFound {
        program: program.to_string(),
        source,
    })
}

fn select_installer(env_value: Option<String>, configured: Option<&str>) -> String {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            configured
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_INSTALLER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let config = Config::load_from(&temp_dir.path().join("absent.toml"));
        assert!(matches!(config, Ok(ref c) if *c == Config::default()));
    }

    #[test]
    fn test_load_from_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("toolman.toml");
        assert!(fs::write(
            &path,
            "installer = \"/usr/local/go/bin/go\"\nlog_file = \"/tmp/toolman.log\"\n"
        )
        .is_ok());

        let config = Config::load_from(&path).unwrap_or_default();
        assert_eq!(config.installer.as_deref(), Some("/usr/local/go/bin/go"));
        assert_eq!(
            config.log_file_path(),
            Some(PathBuf::from("/tmp/toolman.log"))
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("toolman.toml");
        assert!(fs::write(&path, "installer = [").is_ok());

        let err = Config::load_from(&path);
        assert!(matches!(err, Err(ConfigError::Parse { .. })));
        assert!(err.is_err_and(|e| {
            e.to_string().starts_with("cannot parse config file ")
                && std::error::Error::source(&e).is_some()
        }));
    }

    #[test]
    fn test_select_installer_precedence() {
        assert_eq!(select_installer(None, None), "go");
        assert_eq!(select_installer(None, Some("go1.22")), "go1.22");
        assert_eq!(
            select_installer(Some("gotip".to_string()), Some("go1.22")),
            "gotip"
        );
        assert_eq!(select_installer(Some("  ".to_string()), Some(" ")), "go");
    }

    #[test]
    fn test_resolve_program_missing() {
        let err = resolve_program("toolman-no-such-installer");
        assert!(matches!(err, Err(ConfigError::InstallerNotFound { ref program, .. }) if program == "toolman-no-such-installer"));
        assert!(err.is_err_and(|e| e
            .to_string()
            .starts_with("installer 'toolman-no-such-installer' not found: ")));
    }

    #[test]
    fn test_blank_log_file_is_ignored() {
        let config = Config {
            log_file: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.log_file_path(), None);
    }
}
