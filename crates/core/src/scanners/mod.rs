//! Scheme-specific reference scanners
//!
//! Each scanner turns the path of one parsed spec into bundle references,
//! finalizing install options through the layered resolver. Scanners keep no
//! instance state; everything request-scoped travels in the
//! `ResolveContext`.

pub mod artifact;
pub mod dir;
pub mod feature;
pub mod file;
pub mod list;

use std::path::Path;

use url::Url;

use crate::{
    error::{Error, Result},
    provision::{ProvisionService, ResolveContext},
    types::{BundleReference, OptionSet, ProvisionSpec},
};

pub use artifact::ArtifactScanner;
pub use dir::DirScanner;
pub use feature::FeatureScanner;
pub use file::FileScanner;
pub use list::ListScanner;

/// Hardcoded option defaults for one scheme, the last resolution layer
#[derive(Debug, Clone, Copy)]
pub struct SchemeDefaults {
    pub start_level: Option<u32>,
    pub start: bool,
    pub update: bool,
}

impl Default for SchemeDefaults {
    fn default() -> Self {
        Self {
            start_level: None,
            start: true,
            update: false,
        }
    }
}

/// One scheme's reference scanner
pub trait Scanner {
    /// Scheme prefix this scanner registers under
    fn scheme(&self) -> &'static str;

    /// One-line syntax summary, shown when listing schemes
    fn syntax(&self) -> &'static str;

    /// Whether the path part may carry a `!filter` suffix
    fn supports_filter(&self) -> bool {
        false
    }

    /// Hardcoded fallback options for this scheme
    fn defaults(&self) -> SchemeDefaults {
        SchemeDefaults::default()
    }

    /// Expand the spec into bundle references with finalized options
    fn scan(
        &self,
        spec: &ProvisionSpec,
        options: &OptionSet,
        service: &ProvisionService,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<BundleReference>>;
}

/// Turn a path-or-URL spec fragment into a bundle location
///
/// Anything that parses as a URL with a real scheme is taken verbatim;
/// everything else is a filesystem path, absolutized against the working
/// directory. The single-letter scheme guard keeps Windows drive prefixes
/// out of the URL branch.
pub(crate) fn location_url(path: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(path) {
        if url.scheme().len() > 1 {
            return Ok(url);
        }
    }

    let path = Path::new(path);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute).map_err(|_| {
        Error::MalformedSpec(format!(
            "'{}' is neither a URL nor a usable file path",
            path.display()
        ))
    })
}
