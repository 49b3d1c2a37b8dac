use url::Url;

use crate::{
    error::{Error, Result},
    provision::{ProvisionService, ResolveContext},
    types::{BundleReference, OptionSet, ProvisionSpec},
};

use super::Scanner;

/// Sentinel standing in for an unspecified feature version
///
/// Features deliberately do not resolve to the highest available version the
/// way artifact coordinates do; an unversioned feature name pins this
/// sentinel and lets the feature service pick.
pub const VERSION_UNSPECIFIED: &str = "0.0.0";

/// `feature:` — a comma-separated group of named features,
/// `name[/version][,name[/version]]...`
#[derive(Debug, Default)]
pub struct FeatureScanner;

impl Scanner for FeatureScanner {
    fn scheme(&self) -> &'static str {
        "feature"
    }

    fn syntax(&self) -> &'static str {
        "feature:name[/version][,name[/version]]...[@opt]..."
    }

    fn scan(
        &self,
        spec: &ProvisionSpec,
        options: &OptionSet,
        _service: &ProvisionService,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<BundleReference>> {
        let mut references = Vec::new();

        for token in spec.path.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(Error::MalformedSpec(format!(
                    "'{}': feature list must not contain empty entries",
                    spec.path
                )));
            }

            let (name, version) = match token.split_once('/') {
                Some((name, version)) => (name, version),
                None => (token, VERSION_UNSPECIFIED),
            };
            if name.is_empty() || version.is_empty() || version.contains('/') {
                return Err(Error::MalformedSpec(format!(
                    "'{token}': expected name[/version]"
                )));
            }

            let location = Url::parse(&format!("feature:{name}/{version}")).map_err(|e| {
                Error::MalformedSpec(format!("cannot build feature location '{token}': {e}"))
            })?;
            let mut reference = BundleReference::new(location).with_name(name);
            ctx.finalize(self.scheme(), &self.defaults(), options, &mut reference);
            references.push(reference);
        }

        Ok(references)
    }
}
