//! Seams to the external collaborators
//!
//! The engine never fetches artifacts or boots a runtime itself; it talks to
//! those collaborators through the traits defined here.

pub mod artifact_source;
pub mod platform;

pub use artifact_source::{ArtifactSource, Coordinate, LocalRepository, NullArtifactSource};
pub use platform::{JavaPlatform, PlatformBuilder, PlatformCommand};
