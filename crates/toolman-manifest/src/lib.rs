//! toolman manifest management
//!
//! The manifest is a Go source file (`tools.go`) whose anonymous imports name
//! the tools a project depends on. This crate holds the in-memory document
//! model and every operation on it except parsing, which lives in
//! `toolman-ast`.

pub mod editor;
pub mod errors;
pub mod extractor;
pub mod literal;
pub mod manifest_writer;
pub mod types;

pub use errors::ManifestError;
pub use manifest_writer::persist;
pub use types::{ImportEntry, ManifestDocument, ANONYMOUS_ALIAS};
