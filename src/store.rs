//! Configuration store trait and implementations

use crate::value::SettingValue;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Caller-owned mapping from setting name to value
///
/// The store performs no schema enforcement of its own; only writes made
/// through [`TypedSetter`](crate::TypedSetter) are validated. Implemented for
/// `HashMap` and `BTreeMap` so callers can pick their own ordering.
pub trait ConfigStore {
    /// Current value for a key
    fn get(&self, name: &str) -> Option<&SettingValue>;

    /// Insert or overwrite a key, returning the previous value
    fn insert(&mut self, name: &str, value: SettingValue) -> Option<SettingValue>;

    /// Remove a key, returning the previous value
    fn remove(&mut self, name: &str) -> Option<SettingValue>;

    /// Check if a key is present
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Default store type
pub type SettingsMap = HashMap<String, SettingValue>;

impl<S: BuildHasher> ConfigStore for HashMap<String, SettingValue, S> {
    fn get(&self, name: &str) -> Option<&SettingValue> {
        HashMap::get(self, name)
    }

    fn insert(&mut self, name: &str, value: SettingValue) -> Option<SettingValue> {
        HashMap::insert(self, name.to_string(), value)
    }

    fn remove(&mut self, name: &str) -> Option<SettingValue> {
        HashMap::remove(self, name)
    }
}

impl ConfigStore for BTreeMap<String, SettingValue> {
    fn get(&self, name: &str) -> Option<&SettingValue> {
        BTreeMap::get(self, name)
    }

    fn insert(&mut self, name: &str, value: SettingValue) -> Option<SettingValue> {
        BTreeMap::insert(self, name.to_string(), value)
    }

    fn remove(&mut self, name: &str) -> Option<SettingValue> {
        BTreeMap::remove(self, name)
    }
}

// =============================================================================
// Tests
// =============================================================================
