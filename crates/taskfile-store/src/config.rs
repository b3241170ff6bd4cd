use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskfile_xml::WriterOptions;

/// Name of the configuration file looked up next to task files.
pub const CONFIG_FILE: &str = "taskfile.toml";

const DEFAULT_CHANGES_SUFFIX: &str = ".delta";

/// Persistence configuration loaded from `taskfile.toml`.
///
/// ```toml
/// [writer]
/// release = "1.4.6"
/// tskversion = 37
/// encoding = "utf-8"
///
/// [changes]
/// suffix = ".delta"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// Header values and output encoding of written documents.
    #[serde(default)]
    pub writer: WriterOptions,
    /// Companion changes file settings.
    #[serde(default)]
    pub changes: ChangesConfig,
}

impl StoreConfig {
    /// Load `taskfile.toml` from `dir`, or defaults when the file is missing.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read, parsed or validated.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(&path)
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, parsed or validated.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.writer.release.trim().is_empty() {
            bail!("writer.release must not be empty");
        }
        self.changes.validate()
    }

    /// Path of the changes file belonging to `task_file`.
    #[must_use]
    pub fn changes_path(&self, task_file: &Path) -> PathBuf {
        let mut name = task_file.as_os_str().to_owned();
        name.push(&self.changes.suffix);
        PathBuf::from(name)
    }
}

/// `[changes]` configuration block.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangesConfig {
    /// Appended to the task file path to name the changes file.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
        }
    }
}

impl ChangesConfig {
    fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            bail!("changes.suffix must not be empty");
        }
        if self.suffix.contains(['/', '\\']) {
            bail!("changes.suffix must not contain path separators: {}", self.suffix);
        }
        Ok(())
    }
}

fn default_suffix() -> String {
    DEFAULT_CHANGES_SUFFIX.to_owned()
}
