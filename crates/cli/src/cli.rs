use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{launch_command, resolve_command, schemes_command};

#[derive(Parser, Debug)]
#[command(name = "modrun")]
#[command(version, about = "Provision and launch modular-component runtimes", long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand provisioning specs into bundle references
    #[command(visible_alias = "r")]
    Resolve {
        /// Provisioning specs, e.g. file:app.jar or dir:bundles!**/*.jar@3
        #[arg(required = true)]
        specs: Vec<String>,

        /// Print references as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Build the launch descriptor and start the platform
    #[command(visible_alias = "l")]
    Launch {
        /// Provisioning specs, e.g. file:app.jar or dir:bundles!**/*.jar@3
        #[arg(required = true)]
        specs: Vec<String>,

        /// Show the descriptor and final command without executing
        #[arg(short, long)]
        dry_run: bool,

        /// Start level for bundles that resolved without one
        #[arg(long)]
        start_level: Option<u32>,

        /// System property, key=value; overrides file-sourced assignments
        #[arg(short = 'D', value_name = "KEY=VALUE")]
        define: Vec<String>,

        /// Extra VM argument, repeatable
        #[arg(long = "vm", value_name = "ARG")]
        vm_arguments: Vec<String>,
    },
    /// List registered provisioning schemes
    Schemes,
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Resolve { specs, json } => resolve_command(&specs, json),
            Commands::Launch {
                specs,
                dry_run,
                start_level,
                define,
                vm_arguments,
            } => launch_command(&specs, dry_run, start_level, &define, vm_arguments),
            Commands::Schemes => schemes_command(),
        }
    }
}
