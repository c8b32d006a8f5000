//! Template pack loading
//!
//! A pack is a manifest plus payload files. The default pack is compiled
//! into the binary; a local directory can be supplied instead for pack
//! development.

use super::manifest::PackManifest;
use anyhow::{Context, Result};
use semver::Version;
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

const EMBEDDED_MANIFEST: &str = include_str!("../../templates/default/template.yaml");

const EMBEDDED_FILES: &[(&str, &str)] = &[
    ("pom.xml", include_str!("../../templates/default/pom.xml")),
    ("README.md", include_str!("../../templates/default/README.md")),
    (
        "repo/pom.xml",
        include_str!("../../templates/default/repo/pom.xml"),
    ),
    (
        "repo/src/main/amp/module.properties",
        include_str!("../../templates/default/repo/src/main/amp/module.properties"),
    ),
    (
        "repo/src/main/amp/config/module-context.xml",
        include_str!("../../templates/default/repo/src/main/amp/config/module-context.xml"),
    ),
    (
        "repo/src/main/amp/config/context/service-context.xml",
        include_str!("../../templates/default/repo/src/main/amp/config/context/service-context.xml"),
    ),
    (
        "repo/src/main/java/demo/DemoComponent.java",
        include_str!("../../templates/default/repo/src/main/java/demo/DemoComponent.java"),
    ),
    (
        "share/pom.xml",
        include_str!("../../templates/default/share/pom.xml"),
    ),
    (
        "share/src/main/amp/module.properties",
        include_str!("../../templates/default/share/src/main/amp/module.properties"),
    ),
    (
        "module/pom.xml",
        include_str!("../../templates/default/module/pom.xml"),
    ),
    (
        "module/src/main/amp/module.properties",
        include_str!("../../templates/default/module/src/main/amp/module.properties"),
    ),
    (
        "module/src/main/amp/config/module-context.xml",
        include_str!("../../templates/default/module/src/main/amp/config/module-context.xml"),
    ),
    (
        "module/src/main/amp/config/context/service-context.xml",
        include_str!("../../templates/default/module/src/main/amp/config/context/service-context.xml"),
    ),
];

/// A loaded template pack: manifest plus payload bytes keyed by
/// pack-relative path
pub struct TemplatePack {
    pub manifest: PackManifest,
    files: HashMap<String, Vec<u8>>,
}

impl TemplatePack {
    /// The built-in default pack
    pub fn embedded() -> Self {
        let manifest = serde_yaml::from_str(EMBEDDED_MANIFEST).expect("embedded manifest parses");
        let files = EMBEDDED_FILES
            .iter()
            .map(|(path, contents)| (path.to_string(), contents.as_bytes().to_vec()))
            .collect();
        Self { manifest, files }
    }

    /// Load a pack from a local directory containing `template.yaml`
    pub fn from_dir(root: &Path) -> Result<Self> {
        let manifest_path = root.join("template.yaml");
        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let manifest: PackManifest = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

        let mut files = HashMap::new();
        for rel in manifest.files.iter().chain(manifest.module_files.iter()) {
            let full = root.join(rel);
            let bytes = std::fs::read(&full)
                .with_context(|| format!("Failed to read {}", full.display()))?;
            files.insert(rel.clone(), bytes);
        }

        // Files on disk the manifest doesn't list won't be rendered.
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            if rel != "template.yaml" && !files.contains_key(rel.as_str()) {
                eprintln!(
                    "Warning: '{}' is not listed in {}",
                    rel,
                    manifest_path.display()
                );
            }
        }

        Ok(Self { manifest, files })
    }

    /// Look up one payload
    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|bytes| bytes.as_slice())
    }

    /// Project payloads in manifest order
    pub fn project_files(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.manifest
            .files
            .iter()
            .filter_map(move |path| self.files.get(path).map(|c| (path.as_str(), c.as_slice())))
    }

    /// Module skeleton payloads in manifest order
    pub fn module_files(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.manifest
            .module_files
            .iter()
            .filter_map(move |path| self.files.get(path).map(|c| (path.as_str(), c.as_slice())))
    }
}

/// Compare CLI version against pack version
/// Returns a warning message if the CLI is older than the pack expects
pub fn check_compatibility(
    cli_version: &str,
    pack_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = match Version::parse(cli_version) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let pack_ver = match Version::parse(pack_version) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    if cli_ver < pack_ver {
        Some(format!(
            "Warning: This template pack was designed for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            pack_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_pack_carries_every_listed_file() {
        let pack = TemplatePack::embedded();
        assert_eq!(pack.project_files().count(), pack.manifest.files.len());
        assert_eq!(
            pack.module_files().count(),
            pack.manifest.module_files.len()
        );
    }

    #[test]
    fn test_embedded_payloads_use_default_delimiters() {
        let pack = TemplatePack::embedded();
        let pom = std::str::from_utf8(pack.file("pom.xml").unwrap()).unwrap();
        assert!(pom.contains("@@groupId@@"));
        assert!(pom.contains("@@artifactId@@"));
    }

    #[test]
    fn test_from_dir_loads_listed_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("template.yaml"),
            "name: Test\ndescription: Test pack\nversion: 0.1.0\nfiles:\n  - pom.xml\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();

        let pack = TemplatePack::from_dir(dir.path()).unwrap();
        assert_eq!(pack.file("pom.xml"), Some(b"<project/>".as_slice()));
    }

    #[test]
    fn test_from_dir_fails_on_missing_listed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("template.yaml"),
            "name: Test\ndescription: Test pack\nversion: 0.1.0\nfiles:\n  - missing.xml\n",
        )
        .unwrap();

        assert!(TemplatePack::from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_cli_older_than_pack() {
        let warning = check_compatibility("0.1.0", "0.2.0", "cargo install kiln-tools --force");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer_than_pack() {
        assert!(check_compatibility("0.1.0", "0.1.0", "upgrade").is_none());
        assert!(check_compatibility("0.2.0", "0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_invalid_versions_skip_warning() {
        assert!(check_compatibility("invalid", "0.1.0", "upgrade").is_none());
    }
}
