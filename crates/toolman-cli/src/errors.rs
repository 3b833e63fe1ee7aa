//! Centralized error type for the toolman CLI
//!
//! Errors from the manifest, config and installer layers are wrapped here so
//! that `main` can report any failure as a single line.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use toolman_config::ConfigError;
use toolman_manifest::ManifestError;

use crate::installer::InstallError;

#[derive(Error, Debug)]
pub enum ToolmanError {
    #[error("unable to get current working directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("{context} {}: {source}", .path.display())]
    File {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
