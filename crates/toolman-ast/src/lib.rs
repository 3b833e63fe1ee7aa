//! tools.go parsing using ast-grep
//!
//! The manifest is parsed with the tree-sitter Go grammar. Only the parts
//! toolman cares about are lifted into a [`ManifestDocument`]:
//! 1. everything up to the first import declaration (the head),
//! 2. the import specs, with their comments, merged into one list,
//! 3. everything after the last import declaration (the tail).
//!
//! Anything the Go parser would reject at this level (syntax errors, a
//! missing package clause, imports after other declarations) is a
//! [`ManifestError::Parse`].
mod imports;

use ast_grep_core::source::StrDoc;
use ast_grep_core::{AstGrep, Node};
use ast_grep_language::Go;
use std::fs;
use std::path::Path;
use toolman_manifest::{ManifestDocument, ManifestError};
use tracing::debug;

pub(crate) type GoNode<'r> = Node<'r, StrDoc<Go>>;

/// Read and parse the tools file at `path`
pub fn read_manifest(path: &Path) -> Result<ManifestDocument, ManifestError> {
    debug!("Reading tools file: {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content)
}

/// Parse tools file content into a document
pub fn parse_manifest(content: &str) -> Result<ManifestDocument, ManifestError> {
    let sg = AstGrep::new(content, Go);
    let root = sg.root();

    if let Some((offset, what)) = find_syntax_error(&root) {
        return Err(parse_error(content, offset, &what));
    }

    let children: Vec<GoNode<'_>> = root
        .children()
        .filter(|child| !is_terminator(&child.kind()))
        .collect();

    let package_idx = match children.iter().position(|child| child.kind() != "comment") {
        Some(idx) if children[idx].kind() == "package_clause" => idx,
        Some(idx) => {
            return Err(parse_error(
                content,
                children[idx].range().start,
                "expected 'package'",
            ));
        }
        None => return Err(parse_error(content, content.len(), "expected 'package'")),
    };

    let mut seen_declaration = false;
    for child in &children[package_idx + 1..] {
        match &*child.kind() {
            "comment" => {}
            "import_declaration" if seen_declaration => {
                return Err(parse_error(
                    content,
                    child.range().start,
                    "imports must appear before other declarations",
                ));
            }
            "import_declaration" => {}
            "package_clause" => {
                return Err(parse_error(
                    content,
                    child.range().start,
                    "unexpected second package clause",
                ));
            }
            _ => seen_declaration = true,
        }
    }

    let document = imports::split_document(content, &children[package_idx..]);
    debug!(
        "Parsed tools file with {} imports",
        document.imports().len()
    );
    Ok(document)
}

fn is_terminator(kind: &str) -> bool {
    matches!(kind, "\n" | ";" | "\0" | "")
}

/// First `ERROR` node, or node inserted by error recovery (zero width), in the tree
fn find_syntax_error(node: &GoNode<'_>) -> Option<(usize, String)> {
    let kind = node.kind();
    let range = node.range();
    if kind == "ERROR" {
        return Some((range.start, "syntax error".to_string()));
    }
    if range.is_empty() && kind != "source_file" {
        return Some((range.start, format!("syntax error: missing {}", kind)));
    }
    node.children().find_map(|child| find_syntax_error(&child))
}

fn parse_error(content: &str, offset: usize, message: &str) -> ManifestError {
    let offset = offset.min(content.len());
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) + 1;
    ManifestError::Parse(format!("tools.go:{}:{}: {}", line, column, message))
}
