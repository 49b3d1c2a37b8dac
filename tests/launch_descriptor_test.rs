//! Integration test for launch descriptor assembly

use modrun_core::{
    LaunchBuilder, ProvisionService, RunOptions, Settings,
    launch::ProjectNode,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_descriptor_from_resolution_and_run_options() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let list = root.join("provision.txt");
    fs::write(
        &list,
        "-Druntime.console=true\n\
         -Druntime.log=info\n\
         file:/opt/core.jar@1\n\
         file:/opt/shell.jar\n",
    )
    .unwrap();

    let service = ProvisionService::new(Settings::default());
    let resolution = service
        .resolve(&format!("list:{}", list.display()))
        .unwrap();

    let options = RunOptions {
        default_start_level: 6,
        // CLI-level value must beat the list-file assignment
        system_properties: vec![("runtime.log".to_string(), "debug".to_string())],
        vm_arguments: vec!["-Xmx512m".to_string()],
        projects: vec![ProjectNode {
            output: PathBuf::from("/out/boot"),
            libraries: vec![PathBuf::from("/lib/framework.jar")],
            exports: vec![ProjectNode {
                output: PathBuf::from("/out/base"),
                ..Default::default()
            }],
        }],
    };

    let descriptor = LaunchBuilder::build(resolution.references, &resolution.environment, &options);

    // Install order preserved; unlevelled bundle got the run default
    assert_eq!(descriptor.bundles.len(), 2);
    assert_eq!(descriptor.bundles[0].name, "core.jar");
    assert_eq!(descriptor.bundles[0].start_level, Some(1));
    assert_eq!(descriptor.bundles[1].name, "shell.jar");
    assert_eq!(descriptor.bundles[1].start_level, Some(6));

    // Dependency-before-dependent classpath, libraries before outputs
    assert_eq!(
        descriptor.classpath,
        vec![
            PathBuf::from("/out/base"),
            PathBuf::from("/lib/framework.jar"),
            PathBuf::from("/out/boot"),
        ]
    );

    // Scan-time assignments kept, CLI overwrote the collision
    assert_eq!(descriptor.property("runtime.console"), Some("true"));
    assert_eq!(descriptor.property("runtime.log"), Some("debug"));

    assert_eq!(descriptor.vm_arguments, vec!["-Xmx512m".to_string()]);
}

#[test]
fn test_descriptor_serializes_for_inspection() {
    let service = ProvisionService::new(Settings::default());
    let resolution = service.resolve("file:/opt/a.jar@4").unwrap();
    let descriptor = LaunchBuilder::build(
        resolution.references,
        &resolution.environment,
        &RunOptions::default(),
    );

    let json = serde_json::to_string_pretty(&descriptor).unwrap();
    assert!(json.contains("\"a.jar\""));
    assert!(json.contains("\"start_level\": 4"));
}
