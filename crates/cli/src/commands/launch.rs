use anyhow::{Context, Result, bail};
use tracing::debug;

use modrun_core::{JavaPlatform, LaunchBuilder, PlatformBuilder, RunOptions};

use crate::display::print_descriptor_breakdown;

use super::service_from_cwd;

pub fn launch_command(
    specs: &[String],
    dry_run: bool,
    start_level: Option<u32>,
    define: &[String],
    vm_arguments: Vec<String>,
) -> Result<()> {
    let service = service_from_cwd()?;
    let resolution = service.resolve_all(specs)?;
    debug!("resolved {} references", resolution.references.len());

    let mut options = RunOptions::from_settings(service.settings());
    if let Some(level) = start_level {
        options.default_start_level = level;
    }
    for assignment in define {
        let Some((key, value)) = assignment.split_once('=') else {
            bail!("invalid -D value '{assignment}' (expected key=value)");
        };
        options
            .system_properties
            .push((key.to_string(), value.to_string()));
    }
    options.vm_arguments.extend(vm_arguments);

    let descriptor = LaunchBuilder::build(
        resolution.references,
        &resolution.environment,
        &options,
    );

    let platform = JavaPlatform::default();
    let command = platform.prepare(&descriptor)?;

    if dry_run {
        print_descriptor_breakdown(&descriptor);
        println!("\n🎯 Command to run:");
        println!("   {}", command.to_shell_command());
        return Ok(());
    }

    let shell_cmd = command.to_shell_command();
    println!("Running: {shell_cmd}");
    let status = command
        .execute()
        .with_context(|| format!("Failed to execute: {shell_cmd}"))?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
