use smallvec::SmallVec;

use crate::errors::ManifestError;
use crate::literal;

/// Alias used for tool imports: side-effect only, no usable name is bound
pub const ANONYMOUS_ALIAS: &str = "_";

/// A single import spec of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportEntry {
    /// `_`, `.` or a package name; `None` for a plain import
    pub alias: Option<String>,
    /// The path literal exactly as written, quotes included
    pub path: String,
    /// Own-line comments directly above the spec inside an import group
    pub leading_comments: SmallVec<[String; 1]>,
    /// Comment on the same line after the spec
    pub trailing_comment: Option<String>,
}

impl ImportEntry {
    /// Build the `_ "<path>"` entry used to track a tool
    pub fn anonymous(path: &str) -> Self {
        ImportEntry {
            alias: Some(ANONYMOUS_ALIAS.to_string()),
            path: literal::quote(path),
            ..Default::default()
        }
    }

    /// The import path with quotes and escapes removed
    pub fn unquoted_path(&self) -> Result<String, ManifestError> {
        literal::unquote(&self.path)
    }

    /// Render the spec itself, e.g. `_ "example.com/tool" // comment`
    pub fn spec(&self) -> String {
        let mut out = String::new();
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push(' ');
        }
        out.push_str(&self.path);
        if let Some(comment) = &self.trailing_comment {
            out.push(' ');
            out.push_str(comment);
        }
        out
    }
}

/// In-memory model of a tools manifest
///
/// The source is split around its import block: `head` holds everything up to
/// the first import (build constraints, directives, package clause), `tail`
/// everything after the last one. Only the imports are edited; head and tail
/// are written back verbatim apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestDocument {
    pub(crate) head: String,
    pub(crate) imports: Vec<ImportEntry>,
    pub(crate) dangling_comments: Vec<String>,
    pub(crate) tail: String,
}

impl ManifestDocument {
    pub fn from_parts(
        head: impl Into<String>,
        imports: Vec<ImportEntry>,
        dangling_comments: Vec<String>,
        tail: impl Into<String>,
    ) -> Self {
        ManifestDocument {
            head: head.into(),
            imports,
            dangling_comments,
            tail: tail.into(),
        }
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn imports(&self) -> &[ImportEntry] {
        &self.imports
    }

    /// Sort imports by their quoted path literal (stable)
    pub fn sort_imports(&mut self) {
        self.imports.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Whether any import resolves to `path`, whatever its alias
    pub fn is_tracking(&self, path: &str) -> bool {
        self.imports
            .iter()
            .any(|entry| entry.unquoted_path().is_ok_and(|p| p == path))
    }
}
