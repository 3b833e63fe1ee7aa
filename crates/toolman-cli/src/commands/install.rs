use std::path::Path;
use toolman_logger as logger;

use crate::errors::ToolmanError;
use crate::installer::Installer;

/// Install every tool tracked in the tools file
pub fn handle_install(path: &Path, installer: &Installer) -> Result<(), ToolmanError> {
    let mut document = toolman_ast::read_manifest(path)?;
    let tools = document.extract_paths()?;
    logger::debug(&format!("Tracked tools: {}", tools.join(", ")));

    installer.install_all(&tools)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use toolman_manifest::ManifestError;

    #[test]
    fn test_install_empty_manifest_succeeds() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("tools.go");
        assert!(fs::write(&path, "package toolman\n").is_ok());

        let installer = Installer::new("toolman-no-such-installer");
        assert!(handle_install(&path, &installer).is_ok());
    }

    #[test]
    fn test_install_reports_parse_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("tools.go");
        assert!(fs::write(&path, "import _ \"example.com/a/tool\"\n").is_ok());

        let installer = Installer::new("toolman-no-such-installer");
        let result = handle_install(&path, &installer);
        assert!(matches!(
            result,
            Err(ToolmanError::Manifest(ManifestError::Parse(_)))
        ));
    }

    #[test]
    fn test_install_reports_decode_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("tools.go");
        assert!(fs::write(&path, "package toolman\n\nimport _ \"example.com/\\q\"\n").is_ok());

        let installer = Installer::new("toolman-no-such-installer");
        let result = handle_install(&path, &installer);
        assert!(matches!(
            result,
            Err(ToolmanError::Manifest(ManifestError::Decode { .. }))
        ));
    }
}
