//! Read-only view of the current configuration.
//!
//! [`Preview::of`] is recomputed from the live [`AgentConfig`] on every
//! frame, so edits made after the preview is shown appear immediately.

use crate::constants::{
    NO_DESCRIPTION, NO_PERSONALITY, UNDEFINED_CAPABILITY, UNDEFINED_GOAL, UNNAMED_AGENT,
};

use super::agents::AgentConfig;

/// What the preview pane should display.
#[derive(Debug, PartialEq, Eq)]
pub enum Preview<'a> {
    /// Preview has not been requested yet.
    Placeholder,
    Agent(AgentPreview<'a>),
}

/// Display strings for a shown preview, with empty values already replaced
/// by their fallbacks.
#[derive(Debug, PartialEq, Eq)]
pub struct AgentPreview<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub capabilities: Vec<&'a str>,
    pub personality: &'a str,
    pub goals: Vec<&'a str>,
}

impl<'a> Preview<'a> {
    pub fn of(config: &'a AgentConfig, shown: bool) -> Self {
        if !shown {
            return Preview::Placeholder;
        }
        Preview::Agent(AgentPreview {
            name: or_fallback(&config.name, UNNAMED_AGENT),
            description: or_fallback(&config.description, NO_DESCRIPTION),
            capabilities: config
                .capabilities
                .iter()
                .map(|c| or_fallback(c, UNDEFINED_CAPABILITY))
                .collect(),
            personality: or_fallback(&config.personality, NO_PERSONALITY),
            goals: config
                .goals
                .iter()
                .map(|g| or_fallback(g, UNDEFINED_GOAL))
                .collect(),
        })
    }
}

/// Only the empty string falls back; whitespace is shown as typed.
fn or_fallback<'a>(value: &'a str, fallback: &'static str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
