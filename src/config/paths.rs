//! Default script discovery.
//!
//! Without explicit files, configuration is cascaded from up to three tiers,
//! lowest priority first:
//! 1. **Project** - `./configr.yaml`
//! 2. **User** - `~/.configr/configr.yaml`
//! 3. **Explicit** - the file named by `CONFIGR_FILE`
//!
//! ## Environment Variables
//! - `CONFIGR_FILE` - Explicit script, loaded last
//! - `CONFIGR_USER_DIR` - User config dir (default: `~/.configr`)
//! - `CONFIGR_PROJECT_DIR` - Project config dir (default: `.`)

use std::path::{Path, PathBuf};

/// Script file name looked up in the project and user directories.
pub const DEFAULT_FILE_NAME: &str = "configr.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Project-level script ($CWD/configr.yaml)
    Project = 0,
    /// User-level script (~/.configr/configr.yaml)
    User = 1,
    /// Explicitly named script (highest priority)
    Explicit = 2,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Explicit => write!(f, "explicit"),
        }
    }
}

/// Script locations for each tier.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
    /// Explicit script file
    pub explicit_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover script locations from environment and defaults.
    pub fn discover() -> Self {
        Self::discover_with(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Discover script locations using `var` for environment lookups.
    pub fn discover_with(var: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> Self {
        // User dir: CONFIGR_USER_DIR or ~/.configr
        let user_dir = var("CONFIGR_USER_DIR")
            .map(PathBuf::from)
            .or_else(|| home.map(|h| h.join(".configr")));

        // Project dir: CONFIGR_PROJECT_DIR or $CWD
        let project_dir = var("CONFIGR_PROJECT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            project_dir: Some(project_dir),
            user_dir,
            explicit_file: var("CONFIGR_FILE").map(PathBuf::from),
        }
    }

    /// Create paths with explicit directories and no explicit file.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
            explicit_file: None,
        }
    }

    /// Set the explicit script file.
    pub fn with_explicit_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(file.into());
        self
    }

    /// Candidate script for a tier, whether or not it exists.
    pub fn tier_file(&self, tier: ConfigTier) -> Option<PathBuf> {
        match tier {
            ConfigTier::Project => self
                .project_dir
                .as_deref()
                .map(|dir| dir.join(DEFAULT_FILE_NAME)),
            ConfigTier::User => self
                .user_dir
                .as_deref()
                .map(|dir| dir.join(DEFAULT_FILE_NAME)),
            ConfigTier::Explicit => self.explicit_file.clone(),
        }
    }

    /// Scripts to load, lowest priority first.
    ///
    /// Project and user scripts are skipped when missing. The explicit
    /// script is always included so that a missing file is reported.
    pub fn scripts(&self) -> Vec<(ConfigTier, PathBuf)> {
        [ConfigTier::Project, ConfigTier::User, ConfigTier::Explicit]
            .into_iter()
            .filter_map(|tier| self.tier_file(tier).map(|path| (tier, path)))
            .filter(|(tier, path)| *tier == ConfigTier::Explicit || exists(path))
            .collect()
    }
}

fn exists(path: &Path) -> bool {
    let found = path.is_file();
    if !found {
        tracing::debug!(path = %path.display(), "No config script");
    }
    found
}
