//! modrun-core - provision-resolution and launch-descriptor engine
//!
//! This crate provides functionality to:
//! - Parse compact provisioning specs (`scheme:path[@opt]...`) into
//!   structured references
//! - Expand file, directory, list, artifact, and feature schemes into
//!   ordered bundle references with layered option resolution
//! - Fold resolved references and run options into a platform-agnostic
//!   launch descriptor consumed by a pluggable platform builder
pub mod config;
pub mod error;
pub mod interfaces;
pub mod launch;
pub mod parser;
pub mod provision;
pub mod scanners;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Settings;
pub use interfaces::{JavaPlatform, PlatformBuilder, PlatformCommand};
pub use launch::{DEFAULT_START_LEVEL, LaunchBuilder, LaunchDescriptor, RunOptions};
pub use provision::{ProvisionService, Resolution, SchemeRegistry};
