pub mod add;
pub mod init;
pub mod install;

use toolman_config::Config;
use toolman_logger as logger;

use crate::common::{Mode, RunConfig};
use crate::errors::ToolmanError;
use crate::installer::Installer;

/// Dispatch one run: open, parse, (edit, write), install
pub fn run(run_config: &RunConfig, settings: &Config) -> Result<(), ToolmanError> {
    let path = run_config.manifest_path.as_path();
    logger::debug(&format!("Tools file: {}", path.display()));

    match &run_config.mode {
        Mode::Init => init::handle_init(path),
        Mode::Add(tool) => add::handle_add(path, tool, &Installer::from_config(settings)),
        Mode::Install => install::handle_install(path, &Installer::from_config(settings)),
    }
}
