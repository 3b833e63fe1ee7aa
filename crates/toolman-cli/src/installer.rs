//! Sequential tool installation via `<installer> install <tool>`
//!
//! Installs run one after another, never in parallel: `go install`
//! invocations share the module and build caches. The first failure stops
//! the walk; tools after it are not attempted.

use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use toolman_config::{resolve_program, Config, ConfigError};
use toolman_logger as logger;

/// Subcommand passed to the installer program
pub const INSTALL_SUBCOMMAND: &str = "install";

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("unable to install {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to install {tool}: `{command}` {status}")]
    Failed {
        tool: String,
        command: String,
        status: ExitStatus,
    },

    #[error("unable to install: {0}")]
    Installer(#[from] ConfigError),
}

/// Runs the external installer for each tool
#[derive(Debug, Clone)]
pub struct Installer {
    program: String,
}

impl Installer {
    pub fn new(program: impl Into<String>) -> Self {
        Installer {
            program: program.into(),
        }
    }

    /// Installer configured by `toolman.toml` / `$TOOLMAN_INSTALLER`, `go` by default
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.installer_program())
    }

    /// Install `tools` in order, stopping at the first failure
    ///
    /// Output of the installer goes straight to this process' stdout/stderr.
    /// Returns the number of installed tools.
    pub fn install_all(&self, tools: &[String]) -> Result<usize, InstallError> {
        if tools.is_empty() {
            logger::info("No tools to install");
            return Ok(0);
        }

        let program = resolve_program(&self.program)?;
        logger::debug(&format!("Using installer: {}", program.display()));

        for tool in tools {
            logger::status(&format!("installing {}", tool));

            let mut cmd = Command::new(&program);
            cmd.arg(INSTALL_SUBCOMMAND).arg(tool);
            logger::step(&format!("Running: {:?}", cmd));

            let status = cmd.status().map_err(|source| InstallError::Spawn {
                tool: tool.clone(),
                source,
            })?;

            if !status.success() {
                return Err(InstallError::Failed {
                    tool: tool.clone(),
                    command: format!("{} {} {}", self.program, INSTALL_SUBCOMMAND, tool),
                    status,
                });
            }
        }

        logger::info(&format!("Installed {} tools", tools.len()));
        Ok(tools.len())
    }
}
