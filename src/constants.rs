//! Compile-time constants and tunables shared across the crate.

/// Application name used for data directories and the save-dir env var.
pub const APP_NAME: &str = "agent-builder";

/// Env var overriding where saved agents are written.
pub const SAVE_DIR_ENV: &str = "AGENT_BUILDER_SAVE_DIR";
/// Subdirectory of the platform data dir used when no override is set.
pub const SAVE_SUBDIR: &str = "agents";
/// File stem used when an agent name yields an empty slug.
pub const UNNAMED_SLUG: &str = "unnamed-agent";

/// Maximum number of log entries kept in the activity strip.
pub const MAX_LOGS: usize = 200;
/// Height of the description / personality text areas, in rows.
pub const TEXT_AREA_ROWS: u16 = 3;

// ── Page copy ────────────────────────────────────────────────────────

pub const TITLE: &str = "RedBaez Test Agent Builder";
pub const SUBTITLE: &str = "Create and customize your AI agents with ease";

// ── Preview fallbacks ────────────────────────────────────────────────

pub const UNNAMED_AGENT: &str = "Unnamed Agent";
pub const NO_DESCRIPTION: &str = "No description provided";
pub const UNDEFINED_CAPABILITY: &str = "Undefined capability";
pub const NO_PERSONALITY: &str = "No personality defined";
pub const UNDEFINED_GOAL: &str = "Undefined goal";

pub const PREVIEW_PLACEHOLDER: &str = "Click \"Preview Agent\" to see your agent configuration";
pub const PREVIEW_BANNER: &str =
    "This is a preview of your agent configuration. You can test its behavior before saving.";
