//! Agent configuration — the record the form edits and the preview shows.
//!
//! The configuration is a plain value.  Every edit is expressed as an
//! [`Update`] and applied with [`AgentConfig::apply`], which consumes the old
//! value and returns the next one.  Nothing else mutates it.

use serde::{Deserialize, Serialize};

/// A user-authored description of a conceptual agent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub description: String,
    /// Capabilities in insertion order; entries may be empty.
    pub capabilities: Vec<String>,
    pub personality: String,
    /// Goals in insertion order; entries may be empty.
    pub goals: Vec<String>,
}

/// The free-text scalar fields of an [`AgentConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarField {
    Name,
    Description,
    Personality,
}

/// The append-only list fields of an [`AgentConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListField {
    Capabilities,
    Goals,
}

/// A single edit to an [`AgentConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update {
    SetName(String),
    SetDescription(String),
    SetPersonality(String),
    AppendCapability,
    AppendGoal,
    SetCapabilityAt(usize, String),
    SetGoalAt(usize, String),
}

impl Update {
    /// Overwrite a scalar field.
    pub fn set(field: ScalarField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            ScalarField::Name => Update::SetName(value),
            ScalarField::Description => Update::SetDescription(value),
            ScalarField::Personality => Update::SetPersonality(value),
        }
    }

    /// Append an empty entry to a list field.
    pub fn append(field: ListField) -> Self {
        match field {
            ListField::Capabilities => Update::AppendCapability,
            ListField::Goals => Update::AppendGoal,
        }
    }

    /// Replace the entry at `index` in a list field.
    pub fn set_at(field: ListField, index: usize, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            ListField::Capabilities => Update::SetCapabilityAt(index, value),
            ListField::Goals => Update::SetGoalAt(index, value),
        }
    }
}

impl AgentConfig {
    /// Apply one update and return the resulting configuration.
    ///
    /// An index past the end of a list leaves the configuration unchanged.
    pub fn apply(mut self, update: Update) -> Self {
        match update {
            Update::SetName(value) => self.name = value,
            Update::SetDescription(value) => self.description = value,
            Update::SetPersonality(value) => self.personality = value,
            Update::AppendCapability => self.capabilities.push(String::new()),
            Update::AppendGoal => self.goals.push(String::new()),
            Update::SetCapabilityAt(index, value) => {
                if let Some(slot) = self.capabilities.get_mut(index) {
                    *slot = value;
                }
            }
            Update::SetGoalAt(index, value) => {
                if let Some(slot) = self.goals.get_mut(index) {
                    *slot = value;
                }
            }
        }
        self
    }

    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::Name => &self.name,
            ScalarField::Description => &self.description,
            ScalarField::Personality => &self.personality,
        }
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Capabilities => &self.capabilities,
            ListField::Goals => &self.goals,
        }
    }
}
