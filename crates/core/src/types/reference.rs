use serde::{Deserialize, Serialize};
use url::Url;

/// One resolvable bundle to install into the target runtime
///
/// Scanners produce references with the start/update flags already resolved
/// through the layered option lookup; the start level may stay `None` until
/// the launch builder applies the platform-wide default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleReference {
    pub location: Url,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_start: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_update: Option<bool>,
}

impl BundleReference {
    pub fn new(location: Url) -> Self {
        let name = derive_name(&location);
        Self {
            location,
            name,
            start_level: None,
            should_start: None,
            should_update: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Identity used for deduplication across one resolution pass
    pub fn dedup_key(&self) -> (String, String) {
        (self.location.to_string(), self.name.clone())
    }

    /// True once the start and update flags carry concrete values
    pub fn is_finalized(&self) -> bool {
        self.should_start.is_some() && self.should_update.is_some()
    }
}

/// Derive a display name from the last meaningful segment of the location
fn derive_name(location: &Url) -> String {
    if let Some(segments) = location.path_segments() {
        if let Some(last) = segments.filter(|s| !s.is_empty()).next_back() {
            return last.to_string();
        }
    }
    // Opaque URLs (artifact:, feature:) have no segment iterator
    let path = location.path();
    match path.rsplit('/').find(|s| !s.is_empty()) {
        Some(last) => last.to_string(),
        None => location.to_string(),
    }
}
