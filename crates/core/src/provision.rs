//! Dispatch of provisioning specs to the registered scheme scanners

use std::collections::HashSet;

use tracing::debug;

use crate::{
    config::{EnvironmentContext, OptionResolver, Settings, resolver::Flag},
    error::{Error, Result},
    interfaces::{ArtifactSource, LocalRepository, NullArtifactSource},
    parser::{SchemeTable, grammar, options},
    scanners::{
        ArtifactScanner, DirScanner, FeatureScanner, FileScanner, ListScanner, Scanner,
        SchemeDefaults,
    },
    types::{BundleReference, OptionSet},
};

/// Explicit scheme → scanner lookup, built once at startup and passed by
/// reference into the service
#[derive(Default)]
pub struct SchemeRegistry {
    scanners: Vec<Box<dyn Scanner>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the five built-in schemes
    pub fn with_default_scanners() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FileScanner));
        registry.register(Box::new(DirScanner));
        registry.register(Box::new(ListScanner));
        registry.register(Box::new(ArtifactScanner));
        registry.register(Box::new(FeatureScanner));
        registry
    }

    pub fn register(&mut self, scanner: Box<dyn Scanner>) {
        self.scanners.push(scanner);
    }

    pub fn get(&self, scheme: &str) -> Option<&dyn Scanner> {
        self.scanners
            .iter()
            .find(|s| s.scheme() == scheme)
            .map(|s| s.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Scanner> {
        self.scanners.iter().map(|s| s.as_ref())
    }

    /// Scheme table handed to the grammar
    pub fn table(&self) -> SchemeTable {
        let mut table = SchemeTable::new();
        for scanner in self.iter() {
            table.add(scanner.scheme(), scanner.supports_filter());
        }
        table
    }
}

/// Request-scoped state threaded through one resolution pass
///
/// A fresh context is created per `ProvisionService::resolve` call; nothing
/// in it survives across passes, which is what makes concurrent callers
/// safe.
pub struct ResolveContext<'a> {
    pub resolver: OptionResolver<'a>,
    pub environment: EnvironmentContext,
    pub artifacts: &'a dyn ArtifactSource,
}

impl ResolveContext<'_> {
    /// Run the layered option resolution for one reference
    ///
    /// The start and update flags always end up concrete; the start level
    /// may stay unset and is then filled in by the launch builder.
    pub fn finalize(
        &mut self,
        scheme: &str,
        defaults: &SchemeDefaults,
        options: &OptionSet,
        reference: &mut BundleReference,
    ) {
        reference.start_level = self
            .resolver
            .resolve_start_level(scheme, options.start_level, defaults.start_level)
            .value();
        reference.should_start = Some(self.resolver.resolve_flag(
            scheme,
            Flag::Start,
            options.should_start,
            defaults.start,
        ));
        reference.should_update = Some(self.resolver.resolve_flag(
            scheme,
            Flag::Update,
            options.should_update,
            defaults.update,
        ));
    }
}

/// Output of one resolution pass: the ordered, deduplicated references plus
/// the property assignments the pass accumulated
#[derive(Debug)]
pub struct Resolution {
    pub references: Vec<BundleReference>,
    pub environment: EnvironmentContext,
}

/// Maps provisioning specs to scanners and aggregates their output
pub struct ProvisionService {
    registry: SchemeRegistry,
    table: SchemeTable,
    settings: Settings,
    artifacts: Box<dyn ArtifactSource>,
}

impl ProvisionService {
    /// Service with the default scanners; the artifact source is backed by
    /// the configured repository when one is set
    pub fn new(settings: Settings) -> Self {
        let artifacts: Box<dyn ArtifactSource> = match &settings.repository {
            Some(root) => Box::new(LocalRepository::new(root.clone())),
            None => Box::new(NullArtifactSource),
        };
        Self::with_registry(SchemeRegistry::with_default_scanners(), settings, artifacts)
    }

    pub fn with_registry(
        registry: SchemeRegistry,
        settings: Settings,
        artifacts: Box<dyn ArtifactSource>,
    ) -> Self {
        let table = registry.table();
        Self {
            registry,
            table,
            settings,
            artifacts,
        }
    }

    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve a single spec string
    pub fn resolve(&self, raw: &str) -> Result<Resolution> {
        self.resolve_all(std::slice::from_ref(&raw))
    }

    /// Resolve several specs in one pass, sharing the environment context
    /// and deduplicating across all of them
    ///
    /// Install order is the concatenation order of the scanner outputs; the
    /// first failure aborts the whole pass.
    pub fn resolve_all<S: AsRef<str>>(&self, specs: &[S]) -> Result<Resolution> {
        let mut ctx = ResolveContext {
            resolver: OptionResolver::new(&self.settings),
            environment: EnvironmentContext::new(),
            artifacts: self.artifacts.as_ref(),
        };

        let mut references = Vec::new();
        for spec in specs {
            let expanded = self.resolve_nested(spec.as_ref(), &OptionSet::default(), &mut ctx)?;
            references.extend(expanded);
        }

        let references = dedup(references);
        debug!("resolution pass produced {} references", references.len());
        Ok(Resolution {
            references,
            environment: ctx.environment,
        })
    }

    /// Resolve one spec inside an ongoing pass; used by scanners that expand
    /// nested specs (list files)
    pub(crate) fn resolve_nested(
        &self,
        raw: &str,
        fallback: &OptionSet,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<BundleReference>> {
        let spec = grammar::parse(raw, &self.table)?;
        let scanner = self.registry.get(&spec.scheme).ok_or_else(|| {
            Error::UnsupportedScheme {
                scheme: spec.scheme.clone(),
                known: self.table.known(),
            }
        })?;
        let options = options::parse_segments(&spec.options)?.merge(*fallback);
        scanner.scan(&spec, &options, self, ctx)
    }
}

/// Drop later duplicates on `(location, name)`, keeping first-seen option
/// values
fn dedup(references: Vec<BundleReference>) -> Vec<BundleReference> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(references.len());
    for reference in references {
        if seen.insert(reference.dedup_key()) {
            kept.push(reference);
        } else {
            debug!("dropping duplicate reference {}", reference.location);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_spec_is_malformed_never_unsupported() {
        let service = ProvisionService::new(Settings::default());
        for raw in ["", "   ", "\t"] {
            assert!(
                matches!(service.resolve(raw), Err(Error::MalformedSpec(_))),
                "expected MalformedSpec for {raw:?}"
            );
        }
    }

    #[test]
    fn test_unknown_scheme_reports_registered_schemes() {
        let service = ProvisionService::new(Settings::default());
        match service.resolve("zip:/opt/a.zip") {
            Err(Error::UnsupportedScheme { scheme, known }) => {
                assert_eq!(scheme, "zip");
                for expected in ["file", "dir", "list", "artifact", "feature"] {
                    assert!(known.contains(expected), "'{known}' misses {expected}");
                }
            }
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicates_keep_first_seen_options() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("bundles.txt");
        fs::write(&list, "file:/opt/dup.jar@3\nfile:/opt/dup.jar@9@nostart\n").unwrap();

        let service = ProvisionService::new(Settings::default());
        let resolution = service
            .resolve(&format!("list:{}", list.display()))
            .unwrap();

        assert_eq!(resolution.references.len(), 1);
        assert_eq!(resolution.references[0].start_level, Some(3));
        assert_eq!(resolution.references[0].should_start, Some(true));
    }

    #[test]
    fn test_dedup_spans_multiple_specs() {
        let service = ProvisionService::new(Settings::default());
        let resolution = service
            .resolve_all(&["file:/opt/a.jar", "file:/opt/b.jar", "file:/opt/a.jar@9"])
            .unwrap();

        let names: Vec<&str> = resolution
            .references
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["a.jar", "b.jar"]);
        assert_eq!(resolution.references[0].start_level, None);
    }

    #[test]
    fn test_install_order_is_specification_order() {
        let service = ProvisionService::new(Settings::default());
        let resolution = service
            .resolve_all(&["file:/opt/z.jar", "file:/opt/a.jar", "feature:m"])
            .unwrap();

        let names: Vec<&str> = resolution
            .references
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["z.jar", "a.jar", "m"]);
    }

    #[test]
    fn test_settings_defaults_flow_through_resolution() {
        let mut settings = Settings::default();
        settings.scanners.insert(
            "file".to_string(),
            crate::config::ScannerDefaults {
                start_level: Some("11".to_string()),
                start: Some("false".to_string()),
                update: None,
            },
        );

        let service = ProvisionService::new(settings);
        let resolution = service.resolve("file:/opt/a.jar").unwrap();
        let reference = &resolution.references[0];
        assert_eq!(reference.start_level, Some(11));
        assert_eq!(reference.should_start, Some(false));

        // Explicit spec options still win over the configured defaults
        let resolution = service.resolve("file:/opt/a.jar@2").unwrap();
        assert_eq!(resolution.references[0].start_level, Some(2));
    }

    #[test]
    fn test_custom_scanner_registration() {
        struct NullScanner;
        impl Scanner for NullScanner {
            fn scheme(&self) -> &'static str {
                "null"
            }
            fn syntax(&self) -> &'static str {
                "null:anything"
            }
            fn scan(
                &self,
                _spec: &crate::types::ProvisionSpec,
                _options: &OptionSet,
                _service: &ProvisionService,
                _ctx: &mut ResolveContext<'_>,
            ) -> Result<Vec<BundleReference>> {
                Ok(Vec::new())
            }
        }

        let mut registry = SchemeRegistry::with_default_scanners();
        registry.register(Box::new(NullScanner));
        let service = ProvisionService::with_registry(
            registry,
            Settings::default(),
            Box::new(NullArtifactSource),
        );

        // Empty scanner output is zero references, not an error
        let resolution = service.resolve("null:whatever").unwrap();
        assert!(resolution.references.is_empty());
    }
}
