use serde::{Deserialize, Serialize};

/// Parsed form of a provisioning spec string
///
/// Created once per input string by `parser::grammar::parse`, consumed by the
/// scheme's scanner, then discarded. `serialize` produces a string that parses
/// back to an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionSpec {
    pub scheme: String,
    pub path: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ProvisionSpec {
    /// Render back to the compact `scheme:path[!filter][@opt]...` form
    pub fn serialize(&self) -> String {
        let mut out = format!("{}:{}", self.scheme, self.path);
        if let Some(filter) = &self.filter {
            out.push('!');
            out.push_str(filter);
        }
        for option in &self.options {
            out.push('@');
            out.push_str(option);
        }
        out
    }
}

impl std::fmt::Display for ProvisionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.serialize())
    }
}
