//! Documentation generator for the configuration keys
//!
//! Generates a markdown reference from the key registry and the help text.

use crate::config::{CoercionKind, KeyRegistry, KeySpec, Tier};
use crate::manager::{ConfigManager, HelpEntry};
use crate::storage::StorageBackend;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Configuration for docs generation
///
/// Protected keys are listed unless [`hide_protected`](Self::hide_protected)
/// is called.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Whether to list protected keys
    pub show_protected: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            show_protected: true,
        }
    }
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
    pub fn hide_protected(mut self) -> Self {
        self.show_protected = false;
        self
    }
}

/// Generate markdown documentation for every key in `registry`
///
/// Keys are grouped by tier, then sorted by name. Help text is matched by
/// lowercase key.
#[must_use]
pub fn generate_docs(
    registry: &KeyRegistry,
    help: &BTreeMap<String, HelpEntry>,
    config: DocsConfig,
) -> String {
    let mut output = String::new();

    let title = config
        .title
        .unwrap_or_else(|| "Configuration Reference".to_string());
    let _ = writeln!(output, "# {title}\n");

    if let Some(desc) = config.description {
        let _ = writeln!(output, "{desc}\n");
    }

    let tiers = [Tier::Public, Tier::Private, Tier::Protected];
    for tier in tiers
        .into_iter()
        .filter(|t| config.show_protected || *t != Tier::Protected)
    {
        let names = registry.keys_in(tier);
        if names.is_empty() {
            continue;
        }

        let _ = writeln!(output, "\n## {}\n", tier.name());
        for spec in names.into_iter().filter_map(|name| registry.get(name)) {
            format_key(&mut output, spec, help.get(spec.name));
        }
    }

    output
}

fn format_key(out: &mut String, spec: &KeySpec, help: Option<&HelpEntry>) {
    let _ = writeln!(out, "### `{}`\n", spec.name);

    if spec.tier == Tier::Protected {
        out.push_str("Protected • Never exposed outside the bot\n\n");
    }

    if let Some(help) = help.filter(|h| !h.description.is_empty()) {
        let _ = writeln!(out, "{}\n", help.description);
    }

    let default = help
        .and_then(|h| h.default.clone())
        .unwrap_or_else(|| format!("`{}`", format_value(&spec.default)));

    out.push_str("| Property | Value |\n");
    out.push_str("|----------|-------|\n");
    let _ = writeln!(out, "| **Type** | {} |", spec.kind.name());
    let _ = writeln!(out, "| **Default** | {default} |");
    out.push('\n');

    if let CoercionKind::Enum(kind) = spec.kind {
        out.push_str("**Options:**\n\n");
        for member in kind.members() {
            let _ = writeln!(out, "- `{}` - {member}", member.to_value());
        }
        out.push('\n');
    }

    if let Some(help) = help {
        if !help.examples.is_empty() {
            out.push_str("**Examples:**\n\n");
            for example in &help.examples {
                let _ = writeln!(out, "- {example}");
            }
            out.push('\n');
        }
        if !help.notes.is_empty() {
            out.push_str("**Notes:**\n\n");
            for note in &help.notes {
                let _ = writeln!(out, "- {note}");
            }
            out.push('\n');
        }
    }

    out.push_str("---\n\n");
}

fn format_value(v: &Value) -> String {
    match v {
        Value::String(s) => format!("\"{}\"", s.escape_debug()),
        _ => v.to_string(),
    }
}

impl<S: StorageBackend> ConfigManager<S> {
    /// Generate markdown documentation from this store's keys and help text
    #[must_use]
    pub fn generate_docs(&self, config: DocsConfig) -> String {
        generate_docs(&self.registry, &self.help_entries(), config)
    }
}

// =============================================================================
// Tests
// =============================================================================
