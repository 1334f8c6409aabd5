//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Candidate config locations, relative to the project root
const CANDIDATES: [&str; 3] = [
    ".crashlytics-hooks.toml",
    "crashlytics-hooks.toml",
    ".config/crashlytics-hooks.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, or search the project root.
    ///
    /// An explicit path must exist. When none is given and no candidate file
    /// is found, defaults are used.
    pub fn load(path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(project_root),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Directory holding the generated platforms
    pub fn platform_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.schema.general.platform_dir)
    }

    /// Full path of the root Android build script
    pub fn build_gradle_path(&self, project_root: &Path) -> PathBuf {
        self.platform_root(project_root)
            .join(&self.schema.android.build_gradle)
    }
}

/// Find configuration file in standard locations
fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content).context(format!("Failed to parse config file {}", path.display()))
}
