use crate::{
    error::Result,
    provision::{ProvisionService, ResolveContext},
    types::{BundleReference, OptionSet, ProvisionSpec},
};

use super::{Scanner, location_url};

/// `file:` — a single bundle at the given path or URL
#[derive(Debug, Default)]
pub struct FileScanner;

impl Scanner for FileScanner {
    fn scheme(&self) -> &'static str {
        "file"
    }

    fn syntax(&self) -> &'static str {
        "file:path-or-url[@opt]..."
    }

    fn scan(
        &self,
        spec: &ProvisionSpec,
        options: &OptionSet,
        _service: &ProvisionService,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<BundleReference>> {
        let mut reference = BundleReference::new(location_url(&spec.path)?);
        ctx.finalize(self.scheme(), &self.defaults(), options, &mut reference);
        Ok(vec![reference])
    }
}
