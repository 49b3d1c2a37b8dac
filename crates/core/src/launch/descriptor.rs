use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::BundleReference;

/// The fully resolved launch request: ordered bundles, classpath, and VM
/// parameters
///
/// Built fresh per launch request and handed to a platform builder; never
/// mutated afterwards. Bundle order is the specification order, which some
/// runtime engines rely on for side-effecting initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    pub bundles: Vec<BundleReference>,
    pub classpath: Vec<PathBuf>,
    /// Ordered key/value pairs; collisions are resolved last-writer-wins at
    /// insertion time
    pub system_properties: Vec<(String, String)>,
    pub vm_arguments: Vec<String>,
}

impl LaunchDescriptor {
    /// Set a system property, overwriting an earlier value of the same key
    /// in place
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.system_properties.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.system_properties.push((key, value));
        }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.system_properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_property_last_writer_wins() {
        let mut descriptor = LaunchDescriptor::default();
        descriptor.set_property("a", "1");
        descriptor.set_property("b", "2");
        descriptor.set_property("a", "3");

        assert_eq!(descriptor.property("a"), Some("3"));
        let keys: Vec<&str> = descriptor
            .system_properties
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
