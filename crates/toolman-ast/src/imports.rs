//! Lifting import declarations out of the Go syntax tree

use smallvec::SmallVec;
use toolman_manifest::{ImportEntry, ManifestDocument};
use tracing::debug;

use crate::GoNode;

/// Comments waiting for the next import spec to attach to
type PendingComments = SmallVec<[String; 1]>;

/// Split validated top-level nodes (starting at the package clause) into a document
pub(crate) fn split_document(content: &str, top_level: &[GoNode<'_>]) -> ManifestDocument {
    let first_import = top_level
        .iter()
        .position(|node| node.kind() == "import_declaration");
    let last_import = top_level
        .iter()
        .rposition(|node| node.kind() == "import_declaration");

    let package_end = top_level.first().map_or(0, |node| node.range().end);

    let (Some(first), Some(last)) = (first_import, last_import) else {
        // `package toolman // note` keeps its comment on the package line
        let head_end = match top_level.get(1) {
            Some(next) if next.kind() == "comment" && on_same_line(content, package_end, next) => {
                next.range().end
            }
            _ => package_end,
        };
        return ManifestDocument::from_parts(
            head_text(content, package_end, head_end),
            Vec::new(),
            Vec::new(),
            drop_terminator(&content[head_end..]),
        );
    };

    let head_end = top_level[first].range().start;
    let mut tail_start = top_level[last].range().end;

    let mut entries: Vec<ImportEntry> = Vec::new();
    let mut pending = PendingComments::new();
    let mut prev_import_end: Option<usize> = None;

    for node in &top_level[first..=last] {
        match &*node.kind() {
            "import_declaration" => {
                collect_declaration(content, node, &mut entries, &mut pending);
                prev_import_end = Some(node.range().end);
            }
            "comment" => {
                let attached = prev_import_end
                    .is_some_and(|end| attach_trailing(content, end, node, &mut entries));
                if !attached {
                    pending.push(node.text().to_string());
                }
                prev_import_end = None;
            }
            _ => {}
        }
    }

    // `import _ "x" // note` puts the comment after the declaration
    if let Some(next) = top_level.get(last + 1) {
        if next.kind() == "comment" && attach_trailing(content, tail_start, next, &mut entries) {
            tail_start = next.range().end;
        }
    }

    debug!(
        "Import block spans bytes {}..{} with {} specs",
        head_end,
        tail_start,
        entries.len()
    );

    ManifestDocument::from_parts(
        head_text(content, package_end, head_end),
        entries,
        pending.into_vec(),
        drop_terminator(&content[tail_start..]),
    )
}

/// Source up to `head_end`, minus an explicit `;` after the package clause
fn head_text(content: &str, package_end: usize, head_end: usize) -> String {
    let package_end = package_end.min(head_end);
    let mut head = content[..package_end].to_string();
    head.push_str(&drop_terminator(&content[package_end..head_end]));
    head
}

/// Remove a `;` that ends the previous declaration from the start of `text`
fn drop_terminator(text: &str) -> String {
    let rest = text.trim_start_matches([' ', '\t']);
    match rest.strip_prefix(';') {
        Some(after) => format!("{}{}", &text[..text.len() - rest.len()], after),
        None => text.to_string(),
    }
}

fn on_same_line(content: &str, prev_end: usize, node: &GoNode<'_>) -> bool {
    content
        .get(prev_end..node.range().start)
        .is_some_and(|between| !between.contains('\n'))
}

fn collect_declaration(
    content: &str,
    declaration: &GoNode<'_>,
    entries: &mut Vec<ImportEntry>,
    pending: &mut PendingComments,
) {
    for child in declaration.children() {
        match &*child.kind() {
            "import_spec" => entries.push(import_entry(&child, pending)),
            "import_spec_list" => {
                let mut prev_end: Option<usize> = None;
                for item in child.children() {
                    match &*item.kind() {
                        "import_spec" => {
                            entries.push(import_entry(&item, pending));
                            prev_end = Some(item.range().end);
                        }
                        "comment" => {
                            let attached = prev_end
                                .is_some_and(|end| attach_trailing(content, end, &item, entries));
                            if !attached {
                                pending.push(item.text().to_string());
                            }
                            prev_end = None;
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

fn import_entry(spec: &GoNode<'_>, pending: &mut PendingComments) -> ImportEntry {
    let alias = spec.field("name").map(|name| name.text().to_string());
    let path = spec
        .field("path")
        .map(|path| path.text().to_string())
        .unwrap_or_else(|| spec.text().trim().to_string());

    ImportEntry {
        alias,
        path,
        leading_comments: std::mem::take(pending),
        trailing_comment: None,
    }
}

/// Attach `comment` to the last entry when it sits on the same line as `prev_end`
fn attach_trailing(
    content: &str,
    prev_end: usize,
    comment: &GoNode<'_>,
    entries: &mut [ImportEntry],
) -> bool {
    if !on_same_line(content, prev_end, comment) {
        return false;
    }
    match entries.last_mut() {
        Some(entry) if entry.trailing_comment.is_none() => {
            entry.trailing_comment = Some(comment.text().to_string());
            true
        }
        _ => false,
    }
}
