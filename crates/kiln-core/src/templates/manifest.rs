//! Template pack manifest types and parsing

use serde::{Deserialize, Serialize};

/// Pack manifest (`template.yaml`)
///
/// Lists the payload files a pack carries. `files` is rendered when a new
/// project is created; `module_files` is the skeleton rendered when a
/// module is added to an existing project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackManifest {
    /// Display name of the pack
    pub name: String,

    /// Description of what the pack generates
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Pack-relative paths of the project payloads
    pub files: Vec<String>,

    /// Pack-relative paths of the module skeleton payloads
    #[serde(default)]
    pub module_files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let yaml = r#"
name: Default extension project
description: Maven multi-module extension project
version: 0.1.0
files:
  - pom.xml
  - repo/pom.xml
module_files:
  - module/pom.xml
"#;
        let manifest: PackManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.name, "Default extension project");
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.module_files, vec!["module/pom.xml"]);
    }

    #[test]
    fn test_module_files_default_empty() {
        let yaml = r#"
name: Minimal
description: One file
version: 0.1.0
files:
  - pom.xml
"#;
        let manifest: PackManifest = serde_yaml::from_str(yaml).unwrap();
        assert!(manifest.module_files.is_empty());
    }
}
