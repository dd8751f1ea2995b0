//! Documentation generator for a setting registry
//!
//! Generates a markdown reference from registered setting definitions.

use crate::config::{Setting, SettingKind};
use crate::registry::SettingRegistry;
use std::fmt::Write;

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Whether to group settings by kind
    pub group_by_kind: bool,
    /// Whether to sort settings by name instead of registration order
    pub sort_by_name: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn group_by_kind(mut self) -> Self {
        self.group_by_kind = true;
        self
    }

    #[must_use]
    pub fn sort_by_name(mut self) -> Self {
        self.sort_by_name = true;
        self
    }
}

/// Generate markdown documentation for every registered setting
#[must_use]
pub fn generate_docs(registry: &SettingRegistry, config: DocsConfig) -> String {
    let mut output = String::new();

    let title = config
        .title
        .unwrap_or_else(|| "Settings Reference".to_string());
    let _ = writeln!(output, "# {title}\n");

    if let Some(desc) = config.description {
        let _ = writeln!(output, "{desc}\n");
    }

    let mut settings: Vec<&Setting> = registry.iter().collect();
    if config.sort_by_name {
        settings.sort_by(|a, b| a.name.cmp(&b.name));
    }

    if config.group_by_kind {
        // stable sort keeps the order chosen above within each group
        settings.sort_by_key(|s| kind_rank(s.kind));

        let mut current: Option<Option<SettingKind>> = None;
        for setting in settings {
            if current != Some(setting.kind) {
                let _ = writeln!(output, "## {}\n", format_kind(setting.kind));
                current = Some(setting.kind);
            }
            format_setting(&mut output, setting);
        }
    } else {
        output.push_str("## Settings\n\n");
        for setting in settings {
            format_setting(&mut output, setting);
        }
    }

    output
}

fn format_setting(out: &mut String, setting: &Setting) {
    let _ = writeln!(out, "### `{}`\n", setting.name);

    if let Some(ref desc) = setting.description {
        let _ = writeln!(out, "{desc}\n");
    }

    out.push_str("| Property | Value |\n");
    out.push_str("|----------|-------|\n");
    let _ = writeln!(out, "| **Type** | {} |", format_kind(setting.kind));

    let number = &setting.constraints.number;
    match (number.min, number.max) {
        (Some(min), Some(max)) => {
            let _ = writeln!(out, "| **Range** | {min} - {max} |");
        }
        (Some(min), None) => {
            let _ = writeln!(out, "| **Minimum** | {min} |");
        }
        (None, Some(max)) => {
            let _ = writeln!(out, "| **Maximum** | {max} |");
        }
        (None, None) => {}
    }

    if let Some(ref pattern) = setting.constraints.text.pattern {
        let _ = writeln!(out, "| **Pattern** | `{pattern}` |");
    }

    if !setting.validators().is_empty() {
        let _ = writeln!(out, "| **Validators** | {} |", setting.validators().len());
    }

    out.push('\n');

    if let Some(ref options) = setting.constraints.text.options {
        out.push_str("**Options:**\n\n");
        for opt in options {
            let _ = writeln!(out, "- `{opt}`");
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}

fn kind_rank(kind: Option<SettingKind>) -> u8 {
    match kind {
        Some(SettingKind::String) => 0,
        Some(SettingKind::Int) => 1,
        Some(SettingKind::Bool) => 2,
        Some(SettingKind::Slice) => 3,
        None => 4,
    }
}

fn format_kind(kind: Option<SettingKind>) -> &'static str {
    match kind {
        Some(SettingKind::String) => "String",
        Some(SettingKind::Int) => "Integer",
        Some(SettingKind::Bool) => "Boolean",
        Some(SettingKind::Slice) => "List (Strings)",
        None => "Untyped",
    }
}

// =============================================================================
// Tests
// =============================================================================
