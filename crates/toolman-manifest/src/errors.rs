use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, editing or writing the tools manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot open tools file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse tools file: {0}")]
    Parse(String),

    #[error("already tracking: {0}")]
    AlreadyTracked(String),

    #[error("please don't add an empty tool path")]
    EmptyPath,

    #[error("cannot unquote value {literal}: {reason}")]
    Decode { literal: String, reason: String },

    #[error("cannot write tools file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
