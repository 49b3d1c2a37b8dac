use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    provision::{ProvisionService, ResolveContext},
    types::{BundleReference, OptionSet, ProvisionSpec},
};

use super::Scanner;

/// Prefix marking a property-assignment line
const PROPERTY_PREFIX: &str = "-D";
/// Prefix marking a comment line
const COMMENT_PREFIX: &str = "#";

/// `list:` — a composite list file, one entry per non-blank, non-comment
/// line
///
/// `-Dkey=value` lines are property assignments applied to the environment
/// context before the references that follow them are constructed; every
/// other line is a nested spec resolved through the dispatcher, defaulting
/// to the `file:` scheme when it carries no scheme of its own. The list's
/// own options serve as fallback for nested entries.
#[derive(Debug, Default)]
pub struct ListScanner;

impl Scanner for ListScanner {
    fn scheme(&self) -> &'static str {
        "list"
    }

    fn syntax(&self) -> &'static str {
        "list:list-file[@opt]..."
    }

    fn scan(
        &self,
        spec: &ProvisionSpec,
        options: &OptionSet,
        service: &ProvisionService,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<BundleReference>> {
        let contents = std::fs::read_to_string(&spec.path).map_err(|e| {
            Error::ScanFailure(format!("cannot read list file '{}': {e}", spec.path))
        })?;

        let mut references = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            if let Some(assignment) = line.strip_prefix(PROPERTY_PREFIX) {
                let (key, value) = assignment.split_once('=').ok_or_else(|| {
                    Error::MalformedSpec(format!(
                        "line {} of '{}': property assignment '{line}' needs key=value",
                        number + 1,
                        spec.path
                    ))
                })?;
                let value = ctx.environment.substitute(value);
                ctx.environment.set(key, value);
                continue;
            }

            trace!("nested entry at line {}: {}", number + 1, line);
            let nested = match service.resolve_nested(line, options, ctx) {
                Err(Error::UnsupportedScheme { .. }) => {
                    // Bare paths default to the file scheme
                    service.resolve_nested(&format!("file:{line}"), options, ctx)?
                }
                other => other?,
            };
            references.extend(nested);
        }

        debug!(
            "list '{}' produced {} references",
            spec.path,
            references.len()
        );
        Ok(references)
    }
}
