use std::path::PathBuf;

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};

/// Native archive type installed into the runtime when none is specified
pub const DEFAULT_ARCHIVE_TYPE: &str = "jar";

/// Parsed artifact coordinate: `group/artifact[/version[/classifier[/type]]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    pub archive_type: String,
}

impl Coordinate {
    /// File name of the artifact inside a repository version directory
    pub fn file_name(&self) -> Option<String> {
        let version = self.version.as_deref()?;
        let mut name = format!("{}-{}", self.artifact, version);
        if let Some(classifier) = &self.classifier {
            name.push('-');
            name.push_str(classifier);
        }
        name.push('.');
        name.push_str(&self.archive_type);
        Some(name)
    }
}

/// Retrieval collaborator queried by the artifact scanner
///
/// The engine only asks which versions exist and where a fully specified
/// coordinate lives locally; caching and transport are the collaborator's
/// business.
pub trait ArtifactSource {
    /// All versions available for the coordinate, in no particular order
    fn versions(&self, group: &str, artifact: &str) -> Result<Vec<Version>>;

    /// Local file for a fully specified coordinate
    fn fetch(&self, coordinate: &Coordinate) -> Result<PathBuf>;
}

/// Artifact source backed by a maven-style local repository layout:
/// `<root>/<group with '.' as '/'>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<type>`
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_dir(&self, group: &str, artifact: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in group.split('.') {
            dir.push(segment);
        }
        dir.push(artifact);
        dir
    }
}

impl ArtifactSource for LocalRepository {
    fn versions(&self, group: &str, artifact: &str) -> Result<Vec<Version>> {
        let dir = self.artifact_dir(group, artifact);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            match Version::parse(name) {
                Ok(version) => versions.push(version),
                Err(_) => trace!("skipping non-version directory '{}' in {:?}", name, dir),
            }
        }
        Ok(versions)
    }

    fn fetch(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        let (Some(version), Some(file_name)) =
            (coordinate.version.as_deref(), coordinate.file_name())
        else {
            return Err(Error::ScanFailure(format!(
                "cannot fetch {}/{} without a version",
                coordinate.group, coordinate.artifact
            )));
        };
        let path = self
            .artifact_dir(&coordinate.group, &coordinate.artifact)
            .join(version)
            .join(file_name);
        if !path.is_file() {
            return Err(Error::ScanFailure(format!(
                "artifact not present in repository: {}",
                path.display()
            )));
        }
        Ok(path)
    }
}

/// Placeholder source used when no repository is configured; every query is
/// a scan failure naming the missing configuration
#[derive(Debug, Clone, Default)]
pub struct NullArtifactSource;

impl ArtifactSource for NullArtifactSource {
    fn versions(&self, group: &str, artifact: &str) -> Result<Vec<Version>> {
        Err(Error::ScanFailure(format!(
            "no artifact repository configured (needed for {group}/{artifact})"
        )))
    }

    fn fetch(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        Err(Error::ScanFailure(format!(
            "no artifact repository configured (needed for {}/{})",
            coordinate.group, coordinate.artifact
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn seed_repository(root: &Path) {
        let dir = root.join("org/example/core");
        for version in ["1.0.0", "1.2.0", "0.9.1"] {
            let version_dir = dir.join(version);
            fs::create_dir_all(&version_dir).unwrap();
            fs::write(version_dir.join(format!("core-{version}.jar")), b"jar").unwrap();
        }
        // Non-version directory is skipped, not an error
        fs::create_dir_all(dir.join("maven-metadata")).unwrap();
    }

    #[test]
    fn test_versions_lists_parseable_directories() {
        let temp_dir = TempDir::new().unwrap();
        seed_repository(temp_dir.path());
        let repository = LocalRepository::new(temp_dir.path());

        let mut versions = repository.versions("org.example", "core").unwrap();
        versions.sort();
        assert_eq!(
            versions,
            vec![
                Version::parse("0.9.1").unwrap(),
                Version::parse("1.0.0").unwrap(),
                Version::parse("1.2.0").unwrap(),
            ]
        );
    }

    #[test]
    fn test_versions_for_unknown_artifact_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repository = LocalRepository::new(temp_dir.path());
        assert!(repository.versions("org.example", "missing").unwrap().is_empty());
    }

    #[test]
    fn test_fetch_resolves_repository_path() {
        let temp_dir = TempDir::new().unwrap();
        seed_repository(temp_dir.path());
        let repository = LocalRepository::new(temp_dir.path());

        let coordinate = Coordinate {
            group: "org.example".to_string(),
            artifact: "core".to_string(),
            version: Some("1.2.0".to_string()),
            classifier: None,
            archive_type: "jar".to_string(),
        };
        let path = repository.fetch(&coordinate).unwrap();
        assert!(path.ends_with("org/example/core/1.2.0/core-1.2.0.jar"));
    }

    #[test]
    fn test_fetch_missing_artifact_is_scan_failure() {
        let temp_dir = TempDir::new().unwrap();
        let repository = LocalRepository::new(temp_dir.path());

        let coordinate = Coordinate {
            group: "org.example".to_string(),
            artifact: "core".to_string(),
            version: Some("9.9.9".to_string()),
            classifier: None,
            archive_type: "jar".to_string(),
        };
        assert!(matches!(
            repository.fetch(&coordinate),
            Err(Error::ScanFailure(_))
        ));
    }

    #[test]
    fn test_classifier_in_file_name() {
        let coordinate = Coordinate {
            group: "org.example".to_string(),
            artifact: "core".to_string(),
            version: Some("1.0.0".to_string()),
            classifier: Some("sources".to_string()),
            archive_type: "jar".to_string(),
        };
        assert_eq!(
            coordinate.file_name().unwrap(),
            "core-1.0.0-sources.jar"
        );
    }
}
