//! Small utility helpers shared across the crate.

use std::env;

use crate::constants::UNNAMED_SLUG;

/// Return the first non-empty environment variable from `keys`, or `None`.
pub fn env_first(keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Ok(value) = env::var(key) {
            if !value.trim().is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Turn a free-form agent name into a file-system friendly stem.
///
/// Runs of non-alphanumeric characters collapse to a single `-`; leading and
/// trailing dashes are dropped.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        UNNAMED_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}
