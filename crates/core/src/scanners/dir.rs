use std::path::Path;

use tracing::debug;
use url::Url;
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    parser::FilterMatcher,
    provision::{ProvisionService, ResolveContext},
    types::{BundleReference, OptionSet, ProvisionSpec},
};

use super::Scanner;

/// `dir:` — every file in a directory matching the optional `!filter` glob
///
/// Without a filter only immediate children are taken; `**` patterns recurse
/// into subdirectories. Entries are visited in file-name order so repeated
/// scans produce the same install order.
#[derive(Debug, Default)]
pub struct DirScanner;

impl Scanner for DirScanner {
    fn scheme(&self) -> &'static str {
        "dir"
    }

    fn syntax(&self) -> &'static str {
        "dir:directory[!filter][@opt]..."
    }

    fn supports_filter(&self) -> bool {
        true
    }

    fn scan(
        &self,
        spec: &ProvisionSpec,
        options: &OptionSet,
        _service: &ProvisionService,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Vec<BundleReference>> {
        let root = Path::new(&spec.path);
        if !root.is_dir() {
            return Err(Error::ScanFailure(format!(
                "'{}' is not a scannable directory",
                spec.path
            )));
        }
        let root = std::fs::canonicalize(root)?;

        let matcher = FilterMatcher::compile(spec.filter.as_deref())?;
        debug!(
            "scanning {:?} with filter '{}'",
            root,
            matcher.pattern()
        );

        let mut references = Vec::new();
        for entry in WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if !matcher.matches(&relative) {
                continue;
            }

            let location = Url::from_file_path(entry.path()).map_err(|_| {
                Error::ScanFailure(format!("unrepresentable entry path: {:?}", entry.path()))
            })?;
            let mut reference = BundleReference::new(location);
            ctx.finalize(self.scheme(), &self.defaults(), options, &mut reference);
            references.push(reference);
        }

        debug!("directory scan produced {} references", references.len());
        Ok(references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Settings, provision::ProvisionService};
    use std::fs;
    use tempfile::TempDir;

    fn seed_tree(root: &Path) {
        fs::write(root.join("a.jar"), b"a").unwrap();
        fs::write(root.join("b.jar"), b"b").unwrap();
        fs::write(root.join("notes.txt"), b"n").unwrap();
        fs::create_dir_all(root.join("sub/sub")).unwrap();
        fs::write(root.join("sub/c.jar"), b"c").unwrap();
        fs::write(root.join("sub/sub/d.jar"), b"d").unwrap();
    }

    fn names(service: &ProvisionService, spec: &str) -> Vec<String> {
        service
            .resolve(spec)
            .unwrap()
            .references
            .into_iter()
            .map(|r| r.name)
            .collect()
    }

    #[test]
    fn test_no_filter_takes_immediate_children() {
        let temp_dir = TempDir::new().unwrap();
        seed_tree(temp_dir.path());
        let service = ProvisionService::new(Settings::default());

        let found = names(&service, &format!("dir:{}", temp_dir.path().display()));
        assert_eq!(found, vec!["a.jar", "b.jar", "notes.txt"]);
    }

    #[test]
    fn test_recursive_filter_reaches_all_levels() {
        let temp_dir = TempDir::new().unwrap();
        seed_tree(temp_dir.path());
        let service = ProvisionService::new(Settings::default());

        let found = names(&service, &format!("dir:{}!**/*.jar", temp_dir.path().display()));
        assert_eq!(found, vec!["a.jar", "b.jar", "c.jar", "d.jar"]);
    }

    #[test]
    fn test_single_level_glob() {
        let temp_dir = TempDir::new().unwrap();
        seed_tree(temp_dir.path());
        let service = ProvisionService::new(Settings::default());

        let found = names(&service, &format!("dir:{}!*.jar", temp_dir.path().display()));
        assert_eq!(found, vec!["a.jar", "b.jar"]);
    }

    #[test]
    fn test_subdirectory_glob() {
        let temp_dir = TempDir::new().unwrap();
        seed_tree(temp_dir.path());
        let service = ProvisionService::new(Settings::default());

        let found = names(&service, &format!("dir:{}!sub/*", temp_dir.path().display()));
        assert_eq!(found, vec!["c.jar"]);
    }

    #[test]
    fn test_options_apply_to_every_entry() {
        let temp_dir = TempDir::new().unwrap();
        seed_tree(temp_dir.path());
        let service = ProvisionService::new(Settings::default());

        let resolution = service
            .resolve(&format!("dir:{}!*.jar@4@nostart", temp_dir.path().display()))
            .unwrap();
        for reference in &resolution.references {
            assert_eq!(reference.start_level, Some(4));
            assert_eq!(reference.should_start, Some(false));
        }
    }

    #[test]
    fn test_missing_directory_is_scan_failure() {
        let service = ProvisionService::new(Settings::default());
        assert!(matches!(
            service.resolve("dir:/definitely/not/there"),
            Err(Error::ScanFailure(_))
        ));
    }
}
