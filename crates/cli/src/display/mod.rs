pub mod formatter;

pub use formatter::{print_descriptor_breakdown, print_reference_breakdown};
