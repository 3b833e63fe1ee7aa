//! Import set editing

use tracing::debug;

use crate::errors::ManifestError;
use crate::types::{ImportEntry, ManifestDocument};

impl ManifestDocument {
    /// Track a new tool: add `_ "<path>"` and re-sort every import
    ///
    /// Fails with [`ManifestError::AlreadyTracked`] when an import with the same
    /// path exists under any alias; the document is not touched in that case.
    pub fn add_entry(&mut self, path: &str) -> Result<(), ManifestError> {
        if path.is_empty() {
            return Err(ManifestError::EmptyPath);
        }
        if self.is_tracking(path) {
            return Err(ManifestError::AlreadyTracked(path.to_string()));
        }

        self.imports.push(ImportEntry::anonymous(path));
        self.sort_imports();

        debug!("Added import {:?} ({} imports)", path, self.imports.len());
        Ok(())
    }
}
