//! Canonical rendering and persistence of the tools manifest
//!
//! Rendering follows gofmt conventions for the parts that toolman edits:
//! a single import is written on one line, several imports go into one
//! parenthesized group with tab indentation, declarations are separated by
//! one blank line and the file ends with exactly one newline.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::types::ManifestDocument;

impl ManifestDocument {
    /// Serialize the document to text
    ///
    /// Deterministic, and a fixed point of parse-then-render.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let head = self.head.trim_end();
        out.push_str(head);

        if let Some(block) = self.render_imports() {
            if !head.is_empty() {
                out.push_str(self.head_separator());
            }
            out.push_str(&block);
        }

        let tail = self.tail.trim();
        if !tail.is_empty() {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(tail);
        }

        out.push('\n');
        out
    }

    /// A comment that sits right above the imports stays attached to them
    fn head_separator(&self) -> &'static str {
        let trailing = &self.head[self.head.trim_end().len()..];
        let last_line = self.head.trim_end().lines().last().unwrap_or_default().trim();
        let is_comment = last_line.starts_with("//") || last_line.ends_with("*/");
        if is_comment && trailing.matches('\n').count() == 1 {
            "\n"
        } else {
            "\n\n"
        }
    }

    fn render_imports(&self) -> Option<String> {
        match self.imports.as_slice() {
            [] if self.dangling_comments.is_empty() => None,
            [only] if only.leading_comments.is_empty() && self.dangling_comments.is_empty() => {
                Some(format!("import {}", only.spec()))
            }
            entries => {
                let mut block = String::from("import (\n");
                for entry in entries {
                    for comment in &entry.leading_comments {
                        block.push('\t');
                        block.push_str(comment);
                        block.push('\n');
                    }
                    block.push('\t');
                    block.push_str(&entry.spec());
                    block.push('\n');
                }
                for comment in &self.dangling_comments {
                    block.push('\t');
                    block.push_str(comment);
                    block.push('\n');
                }
                block.push(')');
                Some(block)
            }
        }
    }
}

/// Write the rendered manifest to `output_path`, replacing any previous content
pub fn persist(document: &ManifestDocument, output_path: &Path) -> Result<(), ManifestError> {
    debug!("Writing tools file to: {:?}", output_path);

    let rendered = document.render();
    let write_error = |source| ManifestError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(output_path)
        .map_err(write_error)?;
    file.write_all(rendered.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;

    info!(
        "Tools file written to {:?} ({} imports)",
        output_path,
        document.imports.len()
    );
    Ok(())
}
