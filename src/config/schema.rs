//! Setting definitions
//!
//! # Overview
//!
//! A [`Setting`] is an immutable description of one configuration key:
//!
//! - **Name**: the unique, case-sensitive key it is stored under
//! - **Kind**: optionally, which of the four value kinds it holds
//! - **Constraints**: data-driven rules (`min`/`max`, `pattern`, `options`)
//!   checked against the coerced value
//! - **Validators**: closures checked against the raw string before coercion
//! - **Callbacks**: closures notified after a successful write
//!
//! ```rust
//! use settings_registry::{Setting, validators};
//!
//! let cpus = Setting::int("cpus")
//!     .description("Number of CPU cores to allocate")
//!     .min(1)
//!     .max(64);
//!
//! let driver = Setting::string("vm-driver")
//!     .options(&["kvm", "virtualbox", "xhyve"]);
//!
//! let registries = Setting::slice("insecure-registry")
//!     .validator(validators::each_item(validators::is_valid_cidr));
//!
//! assert!(cpus.validate_schema().is_ok());
//! assert!(driver.validate_schema().is_ok());
//! assert!(registries.validate_schema().is_ok());
//! ```
//!
//! ## Declared kind
//!
//! The kind is optional. A setting built with [`Setting::new`] accepts any
//! typed setter; a setting built with [`Setting::int`] and friends rejects
//! setters of a different kind.

use crate::events::{ChangeCallback, Validator};
use crate::value::SettingValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

// =============================================================================
// Setting Kinds
// =============================================================================

/// Kind of value a setting holds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    /// Stored verbatim
    String,
    /// Base-10 signed integer
    Int,
    /// Boolean literal
    Bool,
    /// Comma-separated list of strings
    Slice,
}

impl SettingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::String => "string",
            SettingKind::Int => "int",
            SettingKind::Bool => "bool",
            SettingKind::Slice => "slice",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Constraints
// =============================================================================

/// Constraints for Int settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NumberConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// Constraints for String settings and for each item of Slice settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TextConstraints {
    /// Regex pattern for validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Allowed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Data-driven constraints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SettingConstraints {
    #[serde(flatten)]
    pub number: NumberConstraints,

    #[serde(flatten)]
    pub text: TextConstraints,
}

impl SettingConstraints {
    pub fn is_empty(&self) -> bool {
        *self == SettingConstraints::default()
    }
}

// =============================================================================
// Setting
// =============================================================================

/// Definition of a single setting
///
/// Serializable so a registry can be described in a static document; the
/// closure validators and callbacks are attached in code and skipped by serde.
/// Deserializing rejects unknown fields, so a misspelled constraint is an
/// error rather than a silently missing rule.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "SettingDefinition")]
pub struct Setting {
    /// Unique, case-sensitive key
    pub name: String,

    /// Declared kind (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SettingKind>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Constraints checked against the coerced value
    #[serde(flatten)]
    pub constraints: SettingConstraints,

    #[serde(skip)]
    validators: Vec<Validator>,

    #[serde(skip)]
    callbacks: Vec<ChangeCallback>,

    #[serde(skip)]
    compiled_pattern: OnceLock<Regex>,
}

/// Document form of a [`Setting`], with every accepted field spelled out
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingDefinition {
    name: String,
    #[serde(default)]
    kind: Option<SettingKind>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    min: Option<i64>,
    #[serde(default)]
    max: Option<i64>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
}

impl From<SettingDefinition> for Setting {
    fn from(def: SettingDefinition) -> Self {
        let mut setting = Setting::new(def.name);
        setting.kind = def.kind;
        setting.description = def.description;
        setting.constraints = SettingConstraints {
            number: NumberConstraints {
                min: def.min,
                max: def.max,
            },
            text: TextConstraints {
                pattern: def.pattern,
                options: def.options,
            },
        };
        setting
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("constraints", &self.constraints)
            .field("validators", &self.validators.len())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl Setting {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a setting without a declared kind
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            description: None,
            constraints: SettingConstraints::default(),
            validators: Vec::new(),
            callbacks: Vec::new(),
            compiled_pattern: OnceLock::new(),
        }
    }

    /// Create a setting with the given declared kind
    pub fn of_kind(name: impl Into<String>, kind: SettingKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::new(name)
        }
    }

    /// Create a string setting
    pub fn string(name: impl Into<String>) -> Self {
        Self::of_kind(name, SettingKind::String)
    }

    /// Create an integer setting
    pub fn int(name: impl Into<String>) -> Self {
        Self::of_kind(name, SettingKind::Int)
    }

    /// Create a boolean setting
    pub fn bool(name: impl Into<String>) -> Self {
        Self::of_kind(name, SettingKind::Bool)
    }

    /// Create a string-list setting
    pub fn slice(name: impl Into<String>) -> Self {
        Self::of_kind(name, SettingKind::Slice)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set minimum value for Int settings
    #[must_use]
    pub fn min(mut self, val: i64) -> Self {
        self.constraints.number.min = Some(val);
        self
    }

    /// Set maximum value for Int settings
    #[must_use]
    pub fn max(mut self, val: i64) -> Self {
        self.constraints.number.max = Some(val);
        self
    }

    /// Set regex pattern for String values and Slice items
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.text.pattern = Some(pattern.into());
        self.compiled_pattern = OnceLock::new();
        self
    }

    /// Restrict String values and Slice items to a fixed set
    #[must_use]
    pub fn options(mut self, options: &[&str]) -> Self {
        self.constraints.text.options = Some(options.iter().map(|o| (*o).to_string()).collect());
        self
    }

    /// Append a validator run against the raw value before coercion
    #[must_use]
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str, &str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Append a callback run after the value is written
    #[must_use]
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, Option<&SettingValue>, &SettingValue) + Send + Sync + 'static,
    {
        self.callbacks.push(Arc::new(callback));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn callbacks(&self) -> &[ChangeCallback] {
        &self.callbacks
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check a coerced value against this setting's constraints
    ///
    /// Checks:
    /// - Int range (min/max)
    /// - Regex pattern for strings and every list item
    /// - Allowed options for strings and every list item
    ///
    /// Constraints that do not apply to the value's kind are ignored.
    pub fn check(&self, value: &SettingValue) -> Result<(), String> {
        match value {
            SettingValue::Int(n) => {
                if let Some(min) = self.constraints.number.min {
                    if *n < min {
                        return Err(format!("Value must be at least {min}"));
                    }
                }
                if let Some(max) = self.constraints.number.max {
                    if *n > max {
                        return Err(format!("Value must be at most {max}"));
                    }
                }
            }
            SettingValue::String(s) => {
                let re = self.pattern_regex()?;
                self.check_text(s, re.as_deref())?;
            }
            SettingValue::Slice(items) => {
                let re = self.pattern_regex()?;
                for item in items {
                    self.check_text(item, re.as_deref())
                        .map_err(|e| format!("Item '{item}': {e}"))?;
                }
            }
            SettingValue::Bool(_) => {}
        }
        Ok(())
    }

    fn check_text(&self, text: &str, re: Option<&Regex>) -> Result<(), String> {
        if let Some(re) = re {
            if !re.is_match(text) {
                return Err(format!("Value does not match pattern: {}", re.as_str()));
            }
        }
        if let Some(ref options) = self.constraints.text.options {
            if !options.iter().any(|o| o == text) {
                return Err(format!("Value must be one of: {}", options.join(", ")));
            }
        }
        Ok(())
    }

    /// Validate the definition itself
    ///
    /// Checks that:
    /// - The name is not empty
    /// - `min <= max`
    /// - The pattern is a valid, non-empty regex
    /// - Options are not empty
    /// - Constraints fit the declared kind
    pub fn validate_schema(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Setting name cannot be empty".to_string());
        }

        let number = &self.constraints.number;
        let text = &self.constraints.text;

        if let (Some(min), Some(max)) = (number.min, number.max) {
            if min > max {
                return Err(format!("min ({min}) cannot be greater than max ({max})"));
            }
        }

        if let Some(ref pattern) = text.pattern {
            if pattern.is_empty() {
                return Err("Pattern cannot be empty string".to_string());
            }
            self.pattern_regex()?;
        }

        if text.options.as_ref().is_some_and(Vec::is_empty) {
            return Err("Options cannot be empty".to_string());
        }

        let has_number = number.min.is_some() || number.max.is_some();
        let has_text = text.pattern.is_some() || text.options.is_some();
        match self.kind {
            Some(SettingKind::Int) if has_text => {
                Err("pattern/options do not apply to int settings".to_string())
            }
            Some(SettingKind::String | SettingKind::Slice) if has_number => {
                Err(format!("min/max do not apply to {} settings", self.kind_label()))
            }
            Some(SettingKind::Bool) if has_number || has_text => {
                Err("bool settings cannot carry constraints".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Compiled form of the pattern constraint
    ///
    /// Compiled on first use and cached. The cache is bypassed if the public
    /// `pattern` field was edited after it was filled.
    fn pattern_regex(&self) -> Result<Option<Cow<'_, Regex>>, String> {
        let Some(pattern) = self.constraints.text.pattern.as_deref() else {
            return Ok(None);
        };
        if let Some(re) = self.compiled_pattern.get().filter(|re| re.as_str() == pattern) {
            return Ok(Some(Cow::Borrowed(re)));
        }

        let re = Regex::new(pattern).map_err(|e| format!("Invalid regex pattern: {e}"))?;
        match self.compiled_pattern.set(re) {
            Ok(()) => Ok(self.compiled_pattern.get().map(Cow::Borrowed)),
            Err(re) => Ok(Some(Cow::Owned(re))),
        }
    }

    fn kind_label(&self) -> &'static str {
        self.kind.map_or("untyped", |k| k.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================
