//! # settings-registry
//!
//! A typed settings registry: declare named, validated settings once at
//! startup, then apply raw string values (from a command-line flag, a config
//! file, a prompt) to a caller-owned store with the right type coercion.
//!
//! ## Features
//!
//! - **Setting Registry**: Ordered, read-only table of setting definitions with case-sensitive lookup
//! - **Typed Setter**: `set_string`, `set_int`, `set_bool`, `set_slice` coerce and validate raw strings
//! - **Validation**: Closure validators on the raw input plus data-driven range, pattern and option constraints
//! - **Change Callbacks**: Per-setting hooks notified after a successful write
//! - **Definition Documents**: Build a registry from JSON, TOML (`toml` feature) or YAML (`yaml` feature)
//! - **Docs**: Generate a markdown reference of every setting
//!
//! ## Quick Start
//!
//! ```rust
//! use settings_registry::{Setting, SettingRegistry, SettingValue, SettingsMap, validators};
//!
//! let registry = SettingRegistry::builder()
//!     .setting(Setting::string("vm-driver").options(&["kvm", "virtualbox", "xhyve"]))
//!     .setting(Setting::int("cpus").validator(validators::is_positive))
//!     .setting(Setting::bool("show-libmachine-logs"))
//!     .setting(Setting::slice("insecure-registry"))
//!     .build()?;
//!
//! // The store belongs to the caller
//! let mut store = SettingsMap::new();
//! store.insert("cpus".into(), SettingValue::Int(12));
//!
//! registry.set_int(&mut store, "cpus", "22")?;
//! registry.set_bool(&mut store, "show-libmachine-logs", "true")?;
//! registry.set_slice(&mut store, "insecure-registry", "172.0.0.1/16,mycustom.registry.com/3030")?;
//!
//! assert_eq!(store["cpus"], SettingValue::Int(22));
//! assert_eq!(store["show-libmachine-logs"], SettingValue::Bool(true));
//! assert_eq!(
//!     store["insecure-registry"].as_slice(),
//!     Some(&["172.0.0.1/16".to_string(), "mycustom.registry.com/3030".to_string()][..])
//! );
//!
//! // Failures are returned, and leave the store untouched
//! assert!(registry.set_int(&mut store, "cpus", "not-a-number").is_err());
//! assert_eq!(store["cpus"], SettingValue::Int(22));
//! # Ok::<(), settings_registry::Error>(())
//! ```
//!
//! ## Declared Kinds
//!
//! Settings built with [`Setting::int`] (and friends) declare their kind, and
//! a typed setter of another kind is rejected with [`Error::TypeMismatch`].
//! Settings built with [`Setting::new`] declare nothing and accept whichever
//! setter the caller picks.
//!
//! ```rust
//! use settings_registry::{Error, Setting, SettingRegistry, SettingsMap};
//!
//! let registry = SettingRegistry::new([Setting::int("cpus"), Setting::new("anything")])?;
//! let mut store = SettingsMap::new();
//!
//! let err = registry.set_bool(&mut store, "cpus", "true").unwrap_err();
//! assert!(matches!(err, Error::TypeMismatch { .. }));
//!
//! registry.set_bool(&mut store, "anything", "true")?;
//! # Ok::<(), settings_registry::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! The registry is immutable once built and can be shared across threads
//! behind a plain reference or `Arc`. The store is the caller's: concurrent
//! writers must serialize access themselves (e.g. a `Mutex<SettingsMap>`).

// Core modules
mod error;
mod events;
mod registry;
mod setter;
mod store;
mod value;

// Grouped modules
pub mod config;
pub mod docs;

// Re-exports from core
pub use docs::{DocsConfig, generate_docs};
pub use error::{Error, Result};
pub use events::{ChangeCallback, Validator};
pub use registry::{SettingRegistry, SettingRegistryBuilder};
pub use setter::{TypedSetter, coerce};
pub use store::{ConfigStore, SettingsMap};
pub use value::SettingValue;

// Re-exports from config
pub use config::{
    NumberConstraints, Setting, SettingConstraints, SettingKind, TextConstraints, validators,
};
