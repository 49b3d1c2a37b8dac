use tracing::debug;
use url::Url;

use crate::{
    error::{Error, Result},
    interfaces::artifact_source::{Coordinate, DEFAULT_ARCHIVE_TYPE},
    provision::{ProvisionService, ResolveContext},
    types::{BundleReference, OptionSet, ProvisionSpec},
};

use super::Scanner;

/// `artifact:` — a repository coordinate
/// `group/artifact[/version[/classifier[/type]]]`
///
/// An unspecified version resolves to the highest version the artifact
/// source knows about. This is deliberately different from the feature
/// scheme, which pins unspecified versions to a fixed sentinel.
#[derive(Debug, Default)]
pub struct ArtifactScanner;

impl ArtifactScanner {
    fn parse_coordinate(path: &str) -> Result<Coordinate> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 2 || segments.len() > 5 {
            return Err(Error::MalformedSpec(format!(
                "'{path}': expected group/artifact[/version[/classifier[/type]]]"
            )));
        }
        if segments.iter().take(2).any(|s| s.is_empty()) {
            return Err(Error::MalformedSpec(format!(
                "'{path}': group and artifact must not be empty"
            )));
        }

        let non_empty = |s: &&str| -> Option<String> {
            if s.is_empty() { None } else { Some(s.to_string()) }
        };
        Ok(Coordinate {
            group: segments[0].to_string(),
            artifact: segments[1].to_string(),
            version: segments.get(2).and_then(non_empty),
            classifier: segments.get(3).and_then(non_empty),
            archive_type: segments
                .get(4)
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_ARCHIVE_TYPE.to_string()),
        })
    }

    fn location(coordinate: &Coordinate) -> Result<Url> {
        let version = coordinate.version.as_deref().unwrap_or_default();
        let mut joined = format!(
            "{}/{}/{}",
            coordinate.group, coordinate.artifact, version
        );
        if let Some(classifier) = &coordinate.classifier {
            joined.push('/');
            joined.push_str(classifier);
        }
        joined.push('/');
        joined.push_str(&coordinate.archive_type);

        Url::parse(&format!("artifact:{joined}")).map_err(|e| {
            Error::MalformedSpec(format!("cannot build artifact location '{joined}': {e}"))
        })
    }
}

impl Scanner for ArtifactScanner {
    fn scheme(&self) -> &'static str {
        "artifact"
    }

    fn syntax(&self) -> &'static str {
        "artifact:group/artifact[/version[/classifier[/type]]][@opt]..."
    }

    fn scan(
        &self,
        spec: &ProvisionSpec,
        options: &OptionSet,
        _service: &ProvisionService,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<BundleReference>> {
        let mut coordinate = Self::parse_coordinate(&spec.path)?;

        if coordinate.version.is_none() {
            let versions = ctx
                .artifacts
                .versions(&coordinate.group, &coordinate.artifact)?;
            let highest = versions.into_iter().max().ok_or_else(|| {
                Error::ScanFailure(format!(
                    "no versions available for {}/{}",
                    coordinate.group, coordinate.artifact
                ))
            })?;
            debug!(
                "resolved {}/{} to highest version {}",
                coordinate.group, coordinate.artifact, highest
            );
            coordinate.version = Some(highest.to_string());
        }

        let name = format!(
            "{}-{}",
            coordinate.artifact,
            coordinate.version.as_deref().unwrap_or_default()
        );
        let mut reference =
            BundleReference::new(Self::location(&coordinate)?).with_name(name);
        ctx.finalize(self.scheme(), &self.defaults(), options, &mut reference);
        Ok(vec![reference])
    }
}
