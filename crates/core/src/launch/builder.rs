use tracing::debug;

use crate::{
    config::{EnvironmentContext, Settings},
    types::BundleReference,
};

use super::{classpath, classpath::ProjectNode, descriptor::LaunchDescriptor};

/// Start level assigned to bundles that resolved without one
pub const DEFAULT_START_LEVEL: u32 = 5;

/// Caller-level launch parameters folded into the descriptor
///
/// Values here are the last word: system properties from run options
/// overwrite same-keyed assignments picked up during scanning.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub default_start_level: u32,
    pub system_properties: Vec<(String, String)>,
    pub vm_arguments: Vec<String>,
    pub projects: Vec<ProjectNode>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            default_start_level: DEFAULT_START_LEVEL,
            system_properties: Vec::new(),
            vm_arguments: Vec::new(),
            projects: Vec::new(),
        }
    }
}

impl RunOptions {
    /// Seed run options from a settings file; CLI-level values are layered
    /// on top by the caller
    pub fn from_settings(settings: &Settings) -> Self {
        let mut system_properties: Vec<(String, String)> = settings
            .system_properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        // The settings map is unordered; sort for a stable descriptor
        system_properties.sort();

        Self {
            default_start_level: settings.default_start_level.unwrap_or(DEFAULT_START_LEVEL),
            system_properties,
            vm_arguments: settings.vm_arguments.clone(),
            projects: settings.projects.clone(),
        }
    }
}

/// Folds resolved references and run options into a launch descriptor
pub struct LaunchBuilder;

impl LaunchBuilder {
    /// Build the descriptor; reference order is preserved verbatim
    pub fn build(
        references: Vec<BundleReference>,
        environment: &EnvironmentContext,
        options: &RunOptions,
    ) -> LaunchDescriptor {
        let mut descriptor = LaunchDescriptor {
            vm_arguments: options.vm_arguments.clone(),
            classpath: classpath::assemble(&options.projects),
            ..Default::default()
        };

        for mut bundle in references {
            if bundle.start_level.is_none() {
                bundle.start_level = Some(options.default_start_level);
            }
            // Scanners finalize these; late registrations without them still
            // get the platform defaults
            bundle.should_start.get_or_insert(true);
            bundle.should_update.get_or_insert(false);
            descriptor.bundles.push(bundle);
        }

        // Scan-time assignments first, then run options, so the caller wins
        // ties
        for (key, value) in environment.properties() {
            descriptor.set_property(key.clone(), value.clone());
        }
        for (key, value) in &options.system_properties {
            descriptor.set_property(key.clone(), value.clone());
        }

        debug!(
            "descriptor: {} bundles, {} classpath entries, {} properties",
            descriptor.bundles.len(),
            descriptor.classpath.len(),
            descriptor.system_properties.len()
        );
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn reference(location: &str, start_level: Option<u32>) -> BundleReference {
        let mut reference = BundleReference::new(Url::parse(location).unwrap());
        reference.start_level = start_level;
        reference.should_start = Some(true);
        reference.should_update = Some(false);
        reference
    }

    #[test]
    fn test_install_order_is_preserved() {
        let references = vec![
            reference("file:///z.jar", Some(1)),
            reference("file:///a.jar", Some(2)),
        ];
        let descriptor = LaunchBuilder::build(
            references,
            &EnvironmentContext::new(),
            &RunOptions::default(),
        );
        let names: Vec<&str> = descriptor.bundles.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["z.jar", "a.jar"]);
    }

    #[test]
    fn test_missing_start_level_inherits_run_default() {
        let references = vec![reference("file:///a.jar", None)];
        let options = RunOptions {
            default_start_level: 9,
            ..Default::default()
        };
        let descriptor = LaunchBuilder::build(references, &EnvironmentContext::new(), &options);
        assert_eq!(descriptor.bundles[0].start_level, Some(9));
    }

    #[test]
    fn test_run_option_properties_overwrite_scanned_ones() {
        let mut environment = EnvironmentContext::new();
        environment.set("shared", "from-scan");
        environment.set("scan.only", "kept");

        let options = RunOptions {
            system_properties: vec![("shared".to_string(), "from-cli".to_string())],
            ..Default::default()
        };
        let descriptor = LaunchBuilder::build(Vec::new(), &environment, &options);

        assert_eq!(descriptor.property("shared"), Some("from-cli"));
        assert_eq!(descriptor.property("scan.only"), Some("kept"));
    }

    #[test]
    fn test_classpath_comes_from_project_graph() {
        let options = RunOptions {
            projects: vec![ProjectNode {
                output: "/out/app".into(),
                libraries: vec!["/lib/app.jar".into()],
                exports: Vec::new(),
            }],
            ..Default::default()
        };
        let descriptor = LaunchBuilder::build(Vec::new(), &EnvironmentContext::new(), &options);
        assert_eq!(
            descriptor.classpath,
            vec![
                std::path::PathBuf::from("/lib/app.jar"),
                std::path::PathBuf::from("/out/app"),
            ]
        );
    }

    #[test]
    fn test_from_settings_defaults() {
        let settings = Settings::default();
        let options = RunOptions::from_settings(&settings);
        assert_eq!(options.default_start_level, DEFAULT_START_LEVEL);
        assert!(options.system_properties.is_empty());
    }
}
