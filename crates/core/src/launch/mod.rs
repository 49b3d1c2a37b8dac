//! Assembly of the launch descriptor handed to a platform builder

pub mod builder;
pub mod classpath;
pub mod descriptor;

pub use builder::{DEFAULT_START_LEVEL, LaunchBuilder, RunOptions};
pub use classpath::ProjectNode;
pub use descriptor::LaunchDescriptor;
