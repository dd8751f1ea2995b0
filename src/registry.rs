//! Setting registry
//!
//! The registry is populated once at startup and is read-only afterwards.
//! It holds no interior mutability, so a `&SettingRegistry` (or an
//! `Arc<SettingRegistry>`) can be shared across threads freely.

use crate::config::Setting;
use crate::error::{Error, Result};
use crate::setter::TypedSetter;
use crate::store::ConfigStore;

use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;

/// Ordered table of setting definitions, keyed by unique name
///
/// # Example
///
/// ```rust
/// use settings_registry::{Setting, SettingRegistry, SettingsMap, validators};
///
/// let registry = SettingRegistry::builder()
///     .setting(Setting::string("vm-driver").options(&["kvm", "virtualbox"]))
///     .setting(Setting::int("cpus").validator(validators::is_positive))
///     .build()?;
///
/// let setting = registry.find_setting("cpus")?;
/// assert_eq!(setting.name, "cpus");
///
/// let mut store = SettingsMap::new();
/// registry.set_int(&mut store, "cpus", "4")?;
/// assert_eq!(store["cpus"].as_int(), Some(4));
/// # Ok::<(), settings_registry::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingRegistry {
    settings: Vec<Setting>,
    index: HashMap<String, usize>,
}

/// Shape of a definitions document: `{ "settings": [ ... ] }`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Definitions {
    #[serde(default)]
    settings: Vec<Setting>,
}

impl SettingRegistry {
    /// Create a new builder
    pub fn builder() -> SettingRegistryBuilder {
        SettingRegistryBuilder::new()
    }

    /// Build a registry from a list of settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Two settings share a name (`Error::DuplicateSetting`)
    /// - A definition fails `Setting::validate_schema` (`Error::InvalidSettingMetadata`)
    pub fn new(settings: impl IntoIterator<Item = Setting>) -> Result<Self> {
        let mut registry = Self::default();

        for setting in settings {
            setting
                .validate_schema()
                .map_err(|reason| Error::InvalidSettingMetadata {
                    key: setting.name.clone(),
                    reason,
                })?;

            if registry.index.contains_key(&setting.name) {
                return Err(Error::DuplicateSetting(setting.name));
            }

            registry
                .index
                .insert(setting.name.clone(), registry.settings.len());
            registry.settings.push(setting);
        }

        info!("Registered {} settings", registry.settings.len());
        Ok(registry)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Find a setting by exact, case-sensitive name.
    ///
    /// # Errors
    ///
    /// Returns `Error::SettingNotFound` if no setting has this name.
    pub fn find_setting(&self, name: &str) -> Result<&Setting> {
        self.get(name)
            .ok_or_else(|| Error::SettingNotFound(name.to_string()))
    }

    /// Find a setting by name, returning `None` if it is not registered
    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.index.get(name).map(|&i| &self.settings[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Setting names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.settings.iter().map(|s| s.name.as_str()).collect()
    }

    /// Settings in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Setting> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    // =========================================================================
    // Typed setter shorthands
    // =========================================================================

    /// Get a typed setter bound to this registry
    pub fn setter(&self) -> TypedSetter<'_> {
        TypedSetter::new(self)
    }

    /// Shorthand for `self.setter().set_string(..)`
    ///
    /// # Errors
    ///
    /// See [`TypedSetter::set_string`].
    pub fn set_string<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.setter().set_string(store, name, raw)
    }

    /// Shorthand for `self.setter().set_int(..)`
    ///
    /// # Errors
    ///
    /// See [`TypedSetter::set_int`].
    pub fn set_int<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.setter().set_int(store, name, raw)
    }

    /// Shorthand for `self.setter().set_bool(..)`
    ///
    /// # Errors
    ///
    /// See [`TypedSetter::set_bool`].
    pub fn set_bool<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.setter().set_bool(store, name, raw)
    }

    /// Shorthand for `self.setter().set_slice(..)`
    ///
    /// # Errors
    ///
    /// See [`TypedSetter::set_slice`].
    pub fn set_slice<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.setter().set_slice(store, name, raw)
    }

    // =========================================================================
    // Definition documents
    // =========================================================================

    /// Build a registry from a JSON document `{ "settings": [ ... ] }`
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialize` if the document is malformed, or any error
    /// from [`SettingRegistry::new`].
    pub fn from_json_str(content: &str) -> Result<Self> {
        let definitions: Definitions = serde_json::from_str(content)?;
        Self::from_definitions(definitions)
    }

    /// Build a registry from a TOML document with `[[settings]]` tables
    ///
    /// # Errors
    ///
    /// Returns `Error::Definitions` if the document is malformed, or any error
    /// from [`SettingRegistry::new`].
    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let definitions: Definitions =
            toml::from_str(content).map_err(|e| Error::Definitions(e.to_string()))?;
        Self::from_definitions(definitions)
    }

    /// Build a registry from a YAML document with a `settings:` sequence
    ///
    /// # Errors
    ///
    /// Returns `Error::Definitions` if the document is malformed, or any error
    /// from [`SettingRegistry::new`].
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let definitions: Definitions =
            serde_yaml::from_str(content).map_err(|e| Error::Definitions(e.to_string()))?;
        Self::from_definitions(definitions)
    }

    fn from_definitions(definitions: Definitions) -> Result<Self> {
        if definitions.settings.is_empty() {
            warn!("Definition document contains no settings");
        }
        for setting in definitions.settings.iter().filter(|s| s.kind.is_none()) {
            warn!(
                "Setting {} declares no kind, typed setters will not be cross-checked",
                setting.name
            );
        }
        Self::new(definitions.settings)
    }
}

impl<'a> IntoIterator for &'a SettingRegistry {
    type Item = &'a Setting;
    type IntoIter = std::slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.settings.iter()
    }
}

/// Builder for creating a `SettingRegistry` with a fluent API
#[derive(Debug, Default)]
pub struct SettingRegistryBuilder {
    settings: Vec<Setting>,
}

impl SettingRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a setting
    #[must_use]
    pub fn setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Register several settings
    #[must_use]
    pub fn settings(mut self, settings: impl IntoIterator<Item = Setting>) -> Self {
        self.settings.extend(settings);
        self
    }

    /// Build the registry
    ///
    /// # Errors
    ///
    /// See [`SettingRegistry::new`].
    pub fn build(self) -> Result<SettingRegistry> {
        SettingRegistry::new(self.settings)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingKind;

    fn registry() -> SettingRegistry {
        SettingRegistry::builder()
            .setting(Setting::string("vm-driver"))
            .setting(Setting::int("cpus"))
            .setting(Setting::bool("show-libmachine-logs"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_find_setting() {
        let registry = registry();
        let setting = registry.find_setting("vm-driver").unwrap();
        assert_eq!(setting.name, "vm-driver");
    }

    #[test]
    fn test_find_setting_not_found() {
        let registry = registry();
        let err = registry.find_setting("nonexistant").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = registry();
        assert!(registry.find_setting("VM-Driver").is_err());
        assert!(registry.find_setting("cpus ").is_err());
    }

    #[test]
    fn test_names_keep_registration_order() {
        let registry = registry();
        assert_eq!(
            registry.names(),
            vec!["vm-driver", "cpus", "show-libmachine-logs"]
        );
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(registry.contains("cpus"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = SettingRegistry::builder()
            .setting(Setting::int("cpus"))
            .setting(Setting::string("cpus"))
            .build();

        assert!(matches!(result, Err(Error::DuplicateSetting(name)) if name == "cpus"));
    }

    #[test]
    fn test_invalid_metadata_rejected() {
        let result = SettingRegistry::new([Setting::int("cpus").min(4).max(1)]);
        assert!(matches!(
            result,
            Err(Error::InvalidSettingMetadata { key, .. }) if key == "cpus"
        ));
    }

    #[test]
    fn test_from_json_str() {
        let registry = SettingRegistry::from_json_str(
            r#"{
                "settings": [
                    {"name": "vm-driver", "kind": "string", "options": ["kvm", "virtualbox"]},
                    {"name": "cpus", "kind": "int", "min": 1},
                    {"name": "legacy"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 3);
        let cpus = registry.find_setting("cpus").unwrap();
        assert_eq!(cpus.kind, Some(SettingKind::Int));
        assert_eq!(cpus.constraints.number.min, Some(1));
        assert_eq!(registry.find_setting("legacy").unwrap().kind, None);
    }

    #[test]
    fn test_from_json_str_malformed() {
        let result = SettingRegistry::from_json_str(r#"{"settings": [{"kind": "int"}]}"#);
        assert!(matches!(result, Err(Error::Serialize(_))));

        let result =
            SettingRegistry::from_json_str(r#"{"settings": [{"name": "x", "kind": "float"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_str_unknown_fields() {
        let result = SettingRegistry::from_json_str(
            r#"{"settings": [{"name": "cpus", "kind": "int", "maximum": 8}]}"#,
        );
        assert!(matches!(result, Err(Error::Serialize(e)) if e.to_string().contains("maximum")));

        let result = SettingRegistry::from_json_str(r#"{"setting": [{"name": "cpus"}]}"#);
        assert!(matches!(result, Err(Error::Serialize(_))));
    }

    #[test]
    fn test_empty_registry() {
        let registry = SettingRegistry::from_json_str("{}").unwrap();
        assert!(registry.is_empty());
        assert!(registry.find_setting("anything").is_err());
    }
}
