use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One node of the declared project graph used for classpath assembly
///
/// A node contributes its library paths and its own output path, and may
/// export further nodes it depends on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectNode {
    pub output: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<ProjectNode>,
}

/// Assemble the classpath from the project graph
///
/// Depth-first, dependency before dependent: a node's exports come first,
/// then its libraries, then its own output. Each physical path appears at
/// most once, at its first-visited position.
pub fn assemble(projects: &[ProjectNode]) -> Vec<PathBuf> {
    let mut entries = Vec::new();
    let mut visited = HashSet::new();
    for project in projects {
        visit(project, &mut entries, &mut visited);
    }
    entries
}

fn visit(node: &ProjectNode, entries: &mut Vec<PathBuf>, visited: &mut HashSet<PathBuf>) {
    for export in &node.exports {
        visit(export, entries, visited);
    }
    for library in &node.libraries {
        push_once(library, entries, visited);
    }
    push_once(&node.output, entries, visited);
}

fn push_once(path: &PathBuf, entries: &mut Vec<PathBuf>, visited: &mut HashSet<PathBuf>) {
    if visited.insert(path.clone()) {
        entries.push(path.clone());
    }
}
