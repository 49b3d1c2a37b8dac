use tracing::trace;

use crate::{
    error::{Error, Result},
    types::ProvisionSpec,
};

/// Scheme separator between the scheme prefix and the path
pub const SCHEME_SEPARATOR: char = ':';
/// Option separator between the path and each option segment
pub const OPTION_SEPARATOR: char = '@';
/// Filter separator between a container path and its glob filter
pub const FILTER_SEPARATOR: char = '!';

/// Registered scheme prefixes the grammar recognizes
///
/// Built from the scanner registry at startup and passed by reference into
/// every parse; the grammar itself keeps no state.
#[derive(Debug, Clone, Default)]
pub struct SchemeTable {
    entries: Vec<(String, bool)>,
}

impl SchemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, scheme: impl Into<String>, filter_capable: bool) {
        self.entries.push((scheme.into(), filter_capable));
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.entries.iter().any(|(s, _)| s == scheme)
    }

    pub fn filter_capable(&self, scheme: &str) -> bool {
        self.entries
            .iter()
            .any(|(s, capable)| s == scheme && *capable)
    }

    /// Comma-separated scheme list for error messages
    pub fn known(&self) -> String {
        self.entries
            .iter()
            .map(|(s, _)| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a raw provisioning spec string against the registered scheme table
///
/// Grammar: `scheme:path[!filter][@opt]...` where the filter suffix is only
/// recognized for filter-capable schemes. An unmatched scheme prefix is an
/// `UnsupportedScheme` error, distinct from the `MalformedSpec` raised for
/// grammar violations.
pub fn parse(raw: &str, table: &SchemeTable) -> Result<ProvisionSpec> {
    if raw.trim().is_empty() {
        return Err(Error::MalformedSpec(
            "provision spec must not be empty".to_string(),
        ));
    }

    let (scheme, rest) = match raw.split_once(SCHEME_SEPARATOR) {
        Some((scheme, rest)) => (scheme, rest),
        None => {
            return Err(Error::UnsupportedScheme {
                scheme: raw.to_string(),
                known: table.known(),
            });
        }
    };

    if !table.contains(scheme) {
        return Err(Error::UnsupportedScheme {
            scheme: scheme.to_string(),
            known: table.known(),
        });
    }

    if rest.is_empty() {
        return Err(Error::MalformedSpec(format!(
            "'{raw}': scheme '{scheme}' requires a path"
        )));
    }
    if rest.starts_with(OPTION_SEPARATOR) || rest.ends_with(OPTION_SEPARATOR) {
        return Err(Error::MalformedSpec(format!(
            "'{raw}': path must not start or end with '{OPTION_SEPARATOR}'"
        )));
    }

    let mut segments = rest.split(OPTION_SEPARATOR);
    let first = segments.next().unwrap_or_default();
    let options: Vec<String> = segments.map(str::to_string).collect();

    let (path, filter) = if table.filter_capable(scheme) {
        match first.split_once(FILTER_SEPARATOR) {
            Some((path, filter)) => (path, normalize_filter(filter)),
            None => (first, None),
        }
    } else {
        (first, None)
    };

    if path.is_empty() {
        return Err(Error::MalformedSpec(format!(
            "'{raw}': scheme '{scheme}' requires a path"
        )));
    }

    let spec = ProvisionSpec {
        scheme: scheme.to_string(),
        path: path.to_string(),
        options,
        filter,
    };
    trace!("parsed '{}' into {:?}", raw, spec);
    Ok(spec)
}

/// Empty or `/`-only filters mean "immediate children only", which is the
/// no-filter default
fn normalize_filter(filter: &str) -> Option<String> {
    if filter.chars().all(|c| c == '/') {
        None
    } else {
        Some(filter.to_string())
    }
}
