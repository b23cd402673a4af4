//! Focus targets — which input or button receives key presses.

use super::agents::{AgentConfig, ListField, ScalarField};

/// Every focusable element of the form, in visual order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Name,
    Description,
    Capability(usize),
    AddCapability,
    Personality,
    Goal(usize),
    AddGoal,
    Preview,
    Save,
}

/// What a focus target edits, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Scalar(ScalarField),
    Entry(ListField, usize),
    Button,
}

impl Focus {
    /// All focus targets for the current configuration, top to bottom.
    pub fn targets(config: &AgentConfig) -> Vec<Focus> {
        let mut targets = vec![Focus::Name, Focus::Description];
        targets.extend((0..config.capabilities.len()).map(Focus::Capability));
        targets.push(Focus::AddCapability);
        targets.push(Focus::Personality);
        targets.extend((0..config.goals.len()).map(Focus::Goal));
        targets.extend([Focus::AddGoal, Focus::Preview, Focus::Save]);
        targets
    }

    /// The next target, wrapping to the top.
    pub fn next(self, config: &AgentConfig) -> Focus {
        let targets = Self::targets(config);
        match targets.iter().position(|f| *f == self) {
            Some(i) => targets[(i + 1) % targets.len()],
            None => Focus::Name,
        }
    }

    /// The previous target, wrapping to the bottom.
    pub fn prev(self, config: &AgentConfig) -> Focus {
        let targets = Self::targets(config);
        match targets.iter().position(|f| *f == self) {
            Some(0) | None => targets[targets.len() - 1],
            Some(i) => targets[i - 1],
        }
    }

    pub fn target(self) -> Target {
        match self {
            Focus::Name => Target::Scalar(ScalarField::Name),
            Focus::Description => Target::Scalar(ScalarField::Description),
            Focus::Personality => Target::Scalar(ScalarField::Personality),
            Focus::Capability(i) => Target::Entry(ListField::Capabilities, i),
            Focus::Goal(i) => Target::Entry(ListField::Goals, i),
            Focus::AddCapability | Focus::AddGoal | Focus::Preview | Focus::Save => Target::Button,
        }
    }

    /// Multi-line inputs: Enter inserts a newline, Up/Down stay inside.
    pub fn is_text_area(self) -> bool {
        matches!(self, Focus::Description | Focus::Personality)
    }

    /// Current text of the focused input, or `None` for buttons.
    pub fn text(self, config: &AgentConfig) -> Option<&str> {
        match self.target() {
            Target::Scalar(field) => Some(config.scalar(field)),
            Target::Entry(field, i) => config.list(field).get(i).map(String::as_str),
            Target::Button => None,
        }
    }
}
