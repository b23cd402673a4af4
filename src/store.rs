//! On-disk export of agent configurations for the Save action.
//!
//! Saved agents are written as pretty JSON, one file per agent name.  The
//! target directory comes from `AGENT_BUILDER_SAVE_DIR` when set, otherwise
//! from the platform data directory.  When neither is available the store
//! stays usable and only `save` fails.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;

use crate::app::AgentConfig;
use crate::constants::{APP_NAME, SAVE_DIR_ENV, SAVE_SUBDIR};
use crate::util::{env_first, slugify};

/// Destination for saved agent configurations.
#[derive(Clone, Debug)]
pub struct AgentStore {
    dir: Option<PathBuf>,
    source: StoreSource,
}

/// Where the save directory was resolved from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreSource {
    Env,
    Default,
    /// No override and no platform data directory.
    Unavailable,
}

impl StoreSource {
    pub fn label(&self) -> &'static str {
        match self {
            StoreSource::Env => SAVE_DIR_ENV,
            StoreSource::Default => "platform data dir",
            StoreSource::Unavailable => "nowhere",
        }
    }
}

impl AgentStore {
    /// Resolve the save directory from the environment or platform defaults.
    pub fn load() -> Self {
        Self::resolve(env_first(&[SAVE_DIR_ENV]), default_dir())
    }

    /// Pick the override when present, else the platform default.
    pub fn resolve(env_dir: Option<String>, default: Option<PathBuf>) -> Self {
        match (env_dir, default) {
            (Some(dir), _) => Self::at(dir),
            (None, Some(dir)) => Self {
                dir: Some(dir),
                source: StoreSource::Default,
            },
            (None, None) => Self {
                dir: None,
                source: StoreSource::Unavailable,
            },
        }
    }

    /// Use an explicit directory, as if it came from the environment.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            source: StoreSource::Env,
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn source(&self) -> &StoreSource {
        &self.source
    }

    /// Path the given configuration would be written to, if saving is possible.
    pub fn path_for(&self, config: &AgentConfig) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        Some(dir.join(format!("{}.json", slugify(&config.name))))
    }

    /// Write a snapshot of `config`, replacing any earlier save of the same name.
    pub fn save(&self, config: &AgentConfig) -> Result<PathBuf> {
        let (Some(dir), Some(path)) = (self.dir.as_ref(), self.path_for(config)) else {
            return Err(anyhow!("no data directory; set {SAVE_DIR_ENV} to enable saving"));
        };
        fs::create_dir_all(dir).with_context(|| format!("create save dir {}", dir.display()))?;
        let contents = serde_json::to_string_pretty(config).context("serialise agent")?;
        fs::write(&path, contents).with_context(|| format!("write agent to {}", path.display()))?;
        Ok(path)
    }
}

fn default_dir() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)?;
    Some(proj_dirs.data_dir().join(SAVE_SUBDIR))
}
