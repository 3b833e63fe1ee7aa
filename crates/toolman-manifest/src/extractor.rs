//! Tracked tool extraction

use tracing::warn;

use crate::errors::ManifestError;
use crate::types::ManifestDocument;

impl ManifestDocument {
    /// List the tracked tool paths, sorted and deduplicated
    ///
    /// Imports are sorted in place first, so the result follows the same
    /// ordering as the written manifest. Hand-edited duplicates are collapsed.
    pub fn extract_paths(&mut self) -> Result<Vec<String>, ManifestError> {
        self.sort_imports();

        let mut paths: Vec<String> = Vec::with_capacity(self.imports.len());
        for entry in &self.imports {
            let path = entry.unquoted_path()?;
            if paths.contains(&path) {
                warn!("Duplicate import {:?} in tools file, installing it once", path);
                continue;
            }
            paths.push(path);
        }

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ManifestError;
    use crate::types::{ImportEntry, ManifestDocument};

    fn raw_entry(path: &str) -> ImportEntry {
        ImportEntry {
            alias: Some("_".to_string()),
            path: path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_paths_sorted() {
        let mut doc = ManifestDocument::from_parts(
            "package toolman",
            vec![
                raw_entry("\"example.com/b/tool\""),
                raw_entry("\"example.com/a/tool\""),
            ],
            Vec::new(),
            "",
        );

        let paths = doc.extract_paths().unwrap_or_default();
        assert_eq!(paths, vec!["example.com/a/tool", "example.com/b/tool"]);
        assert_eq!(doc.imports()[0].path, "\"example.com/a/tool\"");
    }

    #[test]
    fn test_extract_paths_collapses_duplicates() {
        let mut doc = ManifestDocument::from_parts(
            "package toolman",
            vec![
                raw_entry("\"example.com/a/tool\""),
                raw_entry("`example.com/a/tool`"),
                raw_entry("\"example.com/a/tool\""),
            ],
            Vec::new(),
            "",
        );

        let paths = doc.extract_paths().unwrap_or_default();
        assert_eq!(paths, vec!["example.com/a/tool"]);
    }

    #[test]
    fn test_extract_paths_decode_error() {
        let mut doc = ManifestDocument::from_parts(
            "package toolman",
            vec![raw_entry("\"example.com/\\q\"")],
            Vec::new(),
            "",
        );

        assert!(matches!(
            doc.extract_paths(),
            Err(ManifestError::Decode { .. })
        ));
    }

    #[test]
    fn test_extract_paths_empty() {
        let mut doc = ManifestDocument::from_parts("package toolman", Vec::new(), Vec::new(), "");
        assert!(doc.extract_paths().is_ok_and(|p| p.is_empty()));
    }
}
