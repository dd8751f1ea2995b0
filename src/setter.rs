//! Typed setter
//!
//! The single path for turning a raw string into a validated, typed value in
//! a caller-owned store. Every entry point runs the same pipeline:
//!
//! 1. Look up the setting (`Error::SettingNotFound`)
//! 2. Reject a declared kind that differs from the entry point (`Error::TypeMismatch`)
//! 3. Run the setting's validators on the raw string (`Error::InvalidSettingValue`)
//! 4. Coerce the raw string into the requested kind (`Error::Parse`)
//! 5. Check constraints on the coerced value (`Error::InvalidSettingValue`)
//! 6. Write the value, then notify the setting's callbacks
//!
//! The store is only touched in step 6, so any error leaves it unchanged.

use crate::config::{Setting, SettingKind};
use crate::error::{Error, Result};
use crate::events;
use crate::registry::SettingRegistry;
use crate::store::ConfigStore;
use crate::value::SettingValue;

use log::debug;

/// Coerce a raw string into a value of the given kind
///
/// - `String`: stored verbatim
/// - `Int`: base-10 `i64`, optional sign, no surrounding whitespace
/// - `Bool`: `1`, `t`, `true`, `0`, `f`, `false` (case-insensitive)
/// - `Slice`: split on `,`; empty input is an empty list
///
/// # Errors
///
/// Returns `Error::Parse` with the raw input if it is not a valid literal.
pub fn coerce(kind: SettingKind, name: &str, raw: &str) -> Result<SettingValue> {
    let parse_error = |reason: String| Error::Parse {
        key: name.to_string(),
        kind: kind.to_string(),
        value: raw.to_string(),
        reason,
    };

    match kind {
        SettingKind::String => Ok(SettingValue::String(raw.to_string())),
        SettingKind::Int => raw
            .parse::<i64>()
            .map(SettingValue::Int)
            .map_err(|e| parse_error(e.to_string())),
        SettingKind::Bool => parse_bool(raw)
            .map(SettingValue::Bool)
            .ok_or_else(|| parse_error("expected true or false".to_string())),
        SettingKind::Slice => Ok(SettingValue::Slice(split_list(raw))),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(String::from).collect()
}

/// Applies raw string values to a store, validated against a registry
///
/// Holds only a borrow of the registry, so it is cheap to create per call
/// and can be used from several threads at once. Serializing writes to a
/// shared store is the caller's job.
#[derive(Debug, Clone, Copy)]
pub struct TypedSetter<'r> {
    registry: &'r SettingRegistry,
}

impl<'r> TypedSetter<'r> {
    pub fn new(registry: &'r SettingRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r SettingRegistry {
        self.registry
    }

    /// Store `raw` verbatim under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The setting is not registered
    /// - The setting declares a kind other than string
    /// - A validator or constraint rejects the value
    pub fn set_string<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.apply(store, name, raw, SettingKind::String)
    }

    /// Parse `raw` as a base-10 integer and store it under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The setting is not registered
    /// - The setting declares a kind other than int
    /// - A validator or constraint rejects the value
    /// - `raw` is not a valid integer literal (`Error::Parse`)
    pub fn set_int<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.apply(store, name, raw, SettingKind::Int)
    }

    /// Parse `raw` as a boolean literal and store it under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The setting is not registered
    /// - The setting declares a kind other than bool
    /// - A validator rejects the value
    /// - `raw` is not a boolean literal (`Error::Parse`)
    pub fn set_bool<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.apply(store, name, raw, SettingKind::Bool)
    }

    /// Split `raw` on commas and store the list under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The setting is not registered
    /// - The setting declares a kind other than slice
    /// - A validator or constraint rejects the value or one of its items
    pub fn set_slice<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        self.apply(store, name, raw, SettingKind::Slice)
    }

    /// Coerce `raw` using the setting's declared kind and store it.
    ///
    /// # Errors
    ///
    /// Returns `Error::KindNotDeclared` for settings without a kind, or any
    /// error the matching typed entry point returns.
    pub fn set<C: ConfigStore + ?Sized>(&self, store: &mut C, name: &str, raw: &str) -> Result<()> {
        let setting = self.registry.find_setting(name)?;
        let kind = setting
            .kind
            .ok_or_else(|| Error::KindNotDeclared(name.to_string()))?;
        self.write(store, setting, raw, kind)
    }

    /// Remove `name` from the store.
    ///
    /// Returns the removed value, or `None` if the key was not set.
    ///
    /// # Errors
    ///
    /// Returns `Error::SettingNotFound` if the setting is not registered.
    pub fn unset<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
    ) -> Result<Option<SettingValue>> {
        self.registry.find_setting(name)?;
        let removed = store.remove(name);
        debug!("Unset {name}");
        Ok(removed)
    }

    fn apply<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        name: &str,
        raw: &str,
        kind: SettingKind,
    ) -> Result<()> {
        let setting = self.registry.find_setting(name)?;

        if let Some(declared) = setting.kind {
            if declared != kind {
                debug!("Rejected {kind} value for {name}: setting is declared {declared}");
                return Err(Error::TypeMismatch {
                    key: name.to_string(),
                    expected: declared.to_string(),
                    actual: kind.to_string(),
                });
            }
        }

        self.write(store, setting, raw, kind)
    }

    fn write<C: ConfigStore + ?Sized>(
        &self,
        store: &mut C,
        setting: &Setting,
        raw: &str,
        kind: SettingKind,
    ) -> Result<()> {
        let name = setting.name.as_str();

        let value = Self::prepare(setting, raw, kind).inspect_err(|e| {
            debug!("Rejected value for {name}: {e}");
        })?;

        let old_value = store.insert(name, value.clone());
        debug!("Set {name} = {value}");

        events::notify(setting.callbacks(), name, old_value.as_ref(), &value);
        Ok(())
    }

    /// Validate and coerce without touching the store
    fn prepare(setting: &Setting, raw: &str, kind: SettingKind) -> Result<SettingValue> {
        let name = setting.name.as_str();
        let invalid = |reason: String| Error::InvalidSettingValue {
            key: name.to_string(),
            reason,
        };

        events::validate(setting.validators(), name, raw).map_err(invalid)?;
        let value = coerce(kind, name, raw)?;
        setting.check(&value).map_err(invalid)?;

        Ok(value)
    }
}

// =============================================================================
// Tests
// =============================================================================
