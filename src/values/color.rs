//! Color coercion
//!
//! Stored form is always `#rrggbb` (lowercase) once written through the
//! typed setter; reads parse it into a 24-bit integer.

use super::color_names::COLOR_NAMES;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\-+|. ]+").expect("separator pattern is valid"));

/// Parse a stored color (`#rrggbb` or `rrggbb`) into its integer code.
pub fn to_int(raw: &Value) -> Option<u32> {
    let hex = raw.as_str()?.trim_start_matches('#');
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Normalize user input into the stored `#rrggbb` form.
///
/// Accepts 3- or 6-digit hex (optionally `#`-prefixed) or a color name.
/// Names are matched after collapsing `-+|. ` runs into one space, then
/// again with the separators removed entirely.
pub fn normalize(input: &str) -> Option<String> {
    parse_hex(input)
        .or_else(|| lookup_name(input).map(str::to_string))
        .map(|hex| format!("#{hex}"))
}

fn parse_hex(input: &str) -> Option<String> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    let hex: String = if hex.chars().count() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_lowercase())
    } else {
        None
    }
}

/// Look up a color name, returning its six hex digits
pub fn lookup_name(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    let spaced = SEPARATORS.replace_all(&lowered, " ");
    find(&spaced).or_else(|| find(&SEPARATORS.replace_all(&spaced, "")))
}

fn find(name: &str) -> Option<&'static str> {
    COLOR_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
}
