pub mod launch;
pub mod resolve;
pub mod schemes;

pub use launch::launch_command;
pub use resolve::resolve_command;
pub use schemes::schemes_command;

use anyhow::{Context, Result};
use modrun_core::{ProvisionService, Settings};

/// Build the provision service from the nearest settings file
pub(crate) fn service_from_cwd() -> Result<ProvisionService> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let settings = Settings::discover(&cwd).context("Failed to load settings")?;
    Ok(ProvisionService::new(settings))
}
