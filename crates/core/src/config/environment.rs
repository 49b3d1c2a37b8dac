use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Property assignments accumulated during one resolution pass
///
/// This is the one piece of mutable state a pass carries: list scanners write
/// `-Dkey=value` assignments here, the launch builder folds them into the
/// descriptor's system properties. Threading it explicitly keeps the side
/// effect out of process-wide state. Insertion order is preserved so later
/// layers can apply last-writer-wins deterministically.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentContext {
    properties: Vec<(String, String)>,
}

impl EnvironmentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, overwriting an earlier assignment of the same key in
    /// place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        debug!("property assignment: {}={}", key, value);
        if let Some(entry) = self.properties.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.properties.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Resolve `${name}` placeholders against the accumulated assignments,
    /// then the process environment; an unresolvable placeholder is left in
    /// place with a warning, never an error
    pub fn substitute(&self, input: &str) -> String {
        PLACEHOLDER
            .replace_all(input, |captures: &regex::Captures<'_>| {
                let name = &captures[1];
                if let Some(value) = self.get(name) {
                    value.to_string()
                } else if let Ok(value) = std::env::var(name) {
                    value
                } else {
                    warn!("unresolved placeholder '${{{}}}' in '{}'", name, input);
                    captures[0].to_string()
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut env = EnvironmentContext::new();
        env.set("first", "1");
        env.set("second", "2");
        env.set("first", "override");

        assert_eq!(env.get("first"), Some("override"));
        let keys: Vec<&str> = env.properties().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["first", "second"]);
    }

    #[test]
    fn test_substitute_from_assignments() {
        let mut env = EnvironmentContext::new();
        env.set("bundle.dir", "/opt/bundles");
        assert_eq!(
            env.substitute("${bundle.dir}/logging.jar"),
            "/opt/bundles/logging.jar"
        );
    }

    #[test]
    fn test_substitute_falls_back_to_process_env() {
        let env = EnvironmentContext::new();
        // PATH is set in any reasonable test environment
        let substituted = env.substitute("${PATH}");
        assert_ne!(substituted, "${PATH}");
    }

    #[test]
    fn test_unresolved_placeholder_is_left_in_place() {
        let env = EnvironmentContext::new();
        let input = "${modrun.test.definitely.unset.key}/x";
        assert_eq!(env.substitute(input), input);
    }
}
