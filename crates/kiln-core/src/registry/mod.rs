//! Registry of extension modules generated into a project
//!
//! Every sub-module a generation run produces is recorded as a seven-field
//! descriptor. The registry is seeded from the project's config store,
//! mutated only through [`ModuleRegistry::add`], and written back only by
//! an explicit [`ModuleRegistry::save`].

use crate::config::ConfigStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Config-store key the module list persists under
pub const REGISTRY_KEY: &str = "moduleRegistry";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error(
        "A complete module requires a groupId, artifactId, version, packaging, war, location and path"
    )]
    IncompleteModule,
}

/// How a module is packaged for the target webapp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    Amp,
    Jar,
}

/// Which webapp a module extends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum War {
    Repo,
    Share,
}

/// Where a module's artifact comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Remote,
    Local,
    Source,
}

impl Packaging {
    pub fn as_str(&self) -> &'static str {
        match self {
            Packaging::Amp => "amp",
            Packaging::Jar => "jar",
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Packaging {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "amp" => Ok(Packaging::Amp),
            "jar" => Ok(Packaging::Jar),
            _ => Err(()),
        }
    }
}

impl War {
    pub fn as_str(&self) -> &'static str {
        match self {
            War::Repo => "repo",
            War::Share => "share",
        }
    }
}

impl fmt::Display for War {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for War {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "repo" => Ok(War::Repo),
            "share" => Ok(War::Share),
            _ => Err(()),
        }
    }
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Remote => "remote",
            Location::Local => "local",
            Location::Source => "source",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "remote" => Ok(Location::Remote),
            "local" => Ok(Location::Local),
            "source" => Ok(Location::Source),
            _ => Err(()),
        }
    }
}

/// A registered module; all seven fields are mandatory
///
/// Two descriptors are the same module exactly when all seven fields are
/// equal; there is no synthetic id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: Packaging,
    pub war: War,
    pub location: Location,
    pub path: String,
}

impl ModuleDescriptor {
    /// Display name: colon-joined coordinates, path excluded
    pub fn display_name(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.packaging, self.war, self.location
        )
    }
}

/// Possibly-incomplete module input
///
/// Registry operations accept either a full descriptor or loose components
/// gathered from prompts; both arrive here, and [`normalize_module`]
/// decides whether they amount to a complete module.
#[derive(Debug, Clone, Default)]
pub struct ModuleSpec {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub war: Option<String>,
    pub location: Option<String>,
    pub path: Option<String>,
}

impl ModuleSpec {
    pub fn from_parts(
        group_id: Option<&str>,
        artifact_id: Option<&str>,
        version: Option<&str>,
        packaging: Option<&str>,
        war: Option<&str>,
        location: Option<&str>,
        path: Option<&str>,
    ) -> Self {
        Self {
            group_id: group_id.map(str::to_string),
            artifact_id: artifact_id.map(str::to_string),
            version: version.map(str::to_string),
            packaging: packaging.map(str::to_string),
            war: war.map(str::to_string),
            location: location.map(str::to_string),
            path: path.map(str::to_string),
        }
    }
}

impl From<&ModuleDescriptor> for ModuleSpec {
    fn from(module: &ModuleDescriptor) -> Self {
        Self {
            group_id: Some(module.group_id.clone()),
            artifact_id: Some(module.artifact_id.clone()),
            version: Some(module.version.clone()),
            packaging: Some(module.packaging.to_string()),
            war: Some(module.war.to_string()),
            location: Some(module.location.to_string()),
            path: Some(module.path.clone()),
        }
    }
}

impl From<ModuleDescriptor> for ModuleSpec {
    fn from(module: ModuleDescriptor) -> Self {
        Self::from(&module)
    }
}

/// Turn a spec into a descriptor, or `None` when any component is absent,
/// empty, or (for the enum fields) not a recognized value
pub fn normalize_module(spec: &ModuleSpec) -> Option<ModuleDescriptor> {
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }

    Some(ModuleDescriptor {
        group_id: present(&spec.group_id)?.to_string(),
        artifact_id: present(&spec.artifact_id)?.to_string(),
        version: present(&spec.version)?.to_string(),
        packaging: present(&spec.packaging)?.parse().ok()?,
        war: present(&spec.war)?.parse().ok()?,
        location: present(&spec.location)?.parse().ok()?,
        path: present(&spec.path)?.to_string(),
    })
}

/// A descriptor paired with its display name
#[derive(Debug)]
pub struct NamedModule<'a> {
    pub name: String,
    pub module: &'a ModuleDescriptor,
}

/// The module list for one generation session
///
/// Insertion order is preserved for display; adds are de-duplicated by
/// full-tuple value equality.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the registry from the config store; an absent or malformed
    /// entry yields an empty registry
    pub fn load(store: &dyn ConfigStore) -> Self {
        let modules = store
            .get(REGISTRY_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default();
        Self { modules }
    }

    /// The live backing sequence, not a defensive copy
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Every registered module with its display name
    pub fn named_modules(&self) -> Vec<NamedModule<'_>> {
        self.modules
            .iter()
            .map(|module| NamedModule {
                name: module.display_name(),
                module,
            })
            .collect()
    }

    /// Find a registered module equal to the input on all seven fields
    ///
    /// Incomplete input is not an error here: it normalizes to nothing and
    /// therefore matches nothing.
    pub fn find(&self, spec: impl Into<ModuleSpec>) -> Option<&ModuleDescriptor> {
        let wanted = normalize_module(&spec.into())?;
        self.modules.iter().find(|m| **m == wanted)
    }

    /// Register a module; adding an already-registered module is a no-op
    pub fn add(&mut self, spec: impl Into<ModuleSpec>) -> Result<(), RegistryError> {
        let module = normalize_module(&spec.into()).ok_or(RegistryError::IncompleteModule)?;
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
        Ok(())
    }

    /// Write the whole module list back to the config store
    pub fn save(&self, store: &mut dyn ConfigStore) {
        let value = serde_json::to_value(&self.modules).expect("module list serializes to JSON");
        store.set(REGISTRY_KEY, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfigStore;

    fn repo_module() -> ModuleDescriptor {
        ModuleDescriptor {
            group_id: "com.example".to_string(),
            artifact_id: "demo-repo".to_string(),
            version: "1.0.0-SNAPSHOT".to_string(),
            packaging: Packaging::Amp,
            war: War::Repo,
            location: Location::Source,
            path: "customizations/demo-repo".to_string(),
        }
    }

    #[test]
    fn test_add_appends_complete_module() {
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();
        assert_eq!(registry.modules().len(), 1);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();
        registry.add(repo_module()).unwrap();
        assert_eq!(registry.modules().len(), 1);
    }

    #[test]
    fn test_add_distinguishes_any_field() {
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();

        let mut share = repo_module();
        share.war = War::Share;
        registry.add(share).unwrap();

        assert_eq!(registry.modules().len(), 2);
    }

    #[test]
    fn test_add_incomplete_fails_and_leaves_registry_unchanged() {
        let mut registry = ModuleRegistry::new();
        let spec = ModuleSpec::from_parts(
            Some("com.example"),
            Some("demo-repo"),
            None,
            Some("amp"),
            Some("repo"),
            Some("source"),
            Some("customizations/demo-repo"),
        );

        assert_eq!(registry.add(spec), Err(RegistryError::IncompleteModule));
        assert!(registry.modules().is_empty());
    }

    #[test]
    fn test_add_rejects_empty_field() {
        let mut registry = ModuleRegistry::new();
        let spec = ModuleSpec::from_parts(
            Some(""),
            Some("demo-repo"),
            Some("1.0.0"),
            Some("amp"),
            Some("repo"),
            Some("source"),
            Some("customizations/demo-repo"),
        );
        assert_eq!(registry.add(spec), Err(RegistryError::IncompleteModule));
    }

    #[test]
    fn test_normalize_from_parts() {
        let spec = ModuleSpec::from_parts(
            Some("com.example"),
            Some("demo-repo"),
            Some("1.0.0-SNAPSHOT"),
            Some("amp"),
            Some("repo"),
            Some("source"),
            Some("customizations/demo-repo"),
        );
        assert_eq!(normalize_module(&spec), Some(repo_module()));
    }

    #[test]
    fn test_normalize_rejects_unknown_packaging() {
        let spec = ModuleSpec::from_parts(
            Some("com.example"),
            Some("demo-repo"),
            Some("1.0.0"),
            Some("war"),
            Some("repo"),
            Some("source"),
            Some("p"),
        );
        assert_eq!(normalize_module(&spec), None);
    }

    #[test]
    fn test_find_matches_full_descriptor() {
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();

        assert_eq!(registry.find(repo_module()), Some(&repo_module()));
    }

    #[test]
    fn test_find_incomplete_returns_none() {
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();

        let spec = ModuleSpec::from_parts(Some("com.example"), None, None, None, None, None, None);
        assert_eq!(registry.find(spec), None);
    }

    #[test]
    fn test_named_modules_format() {
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();

        let named = registry.named_modules();
        assert_eq!(named.len(), 1);
        assert_eq!(
            named[0].name,
            "com.example:demo-repo:1.0.0-SNAPSHOT:amp:repo:source"
        );
    }

    #[test]
    fn test_save_load_round_trip_through_config_store() {
        let mut store = JsonConfigStore::new();
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();
        registry.save(&mut store);

        let reloaded = ModuleRegistry::load(&store);
        assert_eq!(reloaded.modules(), registry.modules());
    }

    #[test]
    fn test_save_uses_exact_field_names() {
        let mut store = JsonConfigStore::new();
        let mut registry = ModuleRegistry::new();
        registry.add(repo_module()).unwrap();
        registry.save(&mut store);

        let value = store.get(REGISTRY_KEY).unwrap();
        let first = &value[0];
        assert_eq!(first["groupId"], "com.example");
        assert_eq!(first["artifactId"], "demo-repo");
        assert_eq!(first["version"], "1.0.0-SNAPSHOT");
        assert_eq!(first["packaging"], "amp");
        assert_eq!(first["war"], "repo");
        assert_eq!(first["location"], "source");
        assert_eq!(first["path"], "customizations/demo-repo");
    }

    #[test]
    fn test_load_ignores_malformed_registry_value() {
        let mut store = JsonConfigStore::new();
        store.set(REGISTRY_KEY, serde_json::json!("not a list"));

        let registry = ModuleRegistry::load(&store);
        assert!(registry.modules().is_empty());
    }
}
