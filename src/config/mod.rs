//! Setting definitions and validators
//!
//! This module contains the building blocks a registry is populated with:
//! - `Setting` - Immutable definition of one named setting
//! - `SettingKind` - The four value kinds a setting can hold
//! - `SettingConstraints` - Data-driven checks (range, pattern, options)
//! - `validators` - Stock validator functions

mod schema;
pub mod validators;

pub use schema::{NumberConstraints, Setting, SettingConstraints, SettingKind, TextConstraints};
