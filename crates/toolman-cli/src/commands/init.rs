use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use toolman_logger as logger;

use crate::errors::ToolmanError;

/// Content of a freshly initialized tools file
pub const TOOLS_TEMPLATE: &str = "// +build toolman
//go:generate go run github.com/execjosh/toolman

package toolman
";

/// Create a new tools file; an existing file is never touched
pub fn handle_init(path: &Path) -> Result<(), ToolmanError> {
    logger::debug("Handling init command");

    let file_error = |context: &'static str| {
        move |source| ToolmanError::File {
            context,
            path: path.to_path_buf(),
            source,
        }
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(file_error("cannot open tools file"))?;
    file.write_all(TOOLS_TEMPLATE.as_bytes())
        .map_err(file_error("cannot write tools file"))?;
    file.sync_all()
        .map_err(file_error("cannot close tools file"))?;

    logger::info(&format!("Created tools file: {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_uses_module_path() {
        assert!(TOOLS_TEMPLATE.contains("//go:generate go run github.com/execjosh/toolman\n"));
        assert!(TOOLS_TEMPLATE.starts_with("// +build toolman\n"));
    }

    #[test]
    fn test_init_creates_template() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("tools.go");

        assert!(handle_init(&path).is_ok());
        assert_eq!(fs::read_to_string(&path).unwrap_or_default(), TOOLS_TEMPLATE);
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("tools.go");
        assert!(fs::write(&path, "package mine\n").is_ok());

        let result = handle_init(&path);
        assert!(matches!(
            result,
            Err(ToolmanError::File { context, .. }) if context == "cannot open tools file"
        ));
        assert_eq!(fs::read_to_string(&path).unwrap_or_default(), "package mine\n");
    }
}
