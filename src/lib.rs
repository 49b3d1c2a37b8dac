//! Workspace umbrella for modrun; hosts the integration tests
pub use modrun_core::*;
