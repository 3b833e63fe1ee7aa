use std::path::Path;
use toolman_logger as logger;

use crate::errors::ToolmanError;
use crate::installer::Installer;

/// Track `tool` in the tools file, write it back, then install only that tool
///
/// The edit is written before installing; a failed install leaves the tool tracked.
pub fn handle_add(path: &Path, tool: &str, installer: &Installer) -> Result<(), ToolmanError> {
    logger::debug(&format!("Adding tool: {}", tool));

    let mut document = toolman_ast::read_manifest(path)?;
    document.add_entry(tool)?;
    toolman_manifest::persist(&document, path)?;

    installer.install_all(&[tool.to_string()])?;
    Ok(())
}
