use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::safe_write::SafeWriteFile;
use anyhow::Context;
use std::path::{Path, PathBuf};
use taskfile_core::{ChangeSets, Task, TaskGraph};
use taskfile_xml::{ByteSink, ChangesXmlWriter, TemplateXmlWriter, XmlWriter};
use tracing::info;

/// A task file on disk together with its companion changes file.
///
/// Every save stages the new document next to the target and renames it into
/// place, so readers never observe a partially written file.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
    config: StoreConfig,
}

impl TaskFile {
    /// Task file at `path` with default configuration.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, StoreConfig::default())
    }

    /// Task file at `path` with explicit configuration.
    #[must_use]
    pub fn with_config(path: impl Into<PathBuf>, config: StoreConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Task file at `path`, configured by the `taskfile.toml` in its directory.
    ///
    /// # Errors
    /// Returns an error when the configuration file exists but is invalid.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let config = StoreConfig::from_dir(dir)
            .with_context(|| format!("failed to configure task file {}", path.display()))?;
        Ok(Self::with_config(path, config))
    }

    /// Location of the task file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the companion changes file.
    #[must_use]
    pub fn delta_path(&self) -> PathBuf {
        self.config.changes_path(&self.path)
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Replace the task file with `graph`.
    ///
    /// # Errors
    /// Returns an error when the document cannot be written or moved into
    /// place; the previous file is kept in that case.
    pub fn save(&self, graph: &TaskGraph) -> Result<(), StoreError> {
        let mut file = SafeWriteFile::create(&self.path)?;
        XmlWriter::with_options(ByteSink(&mut file), self.config.writer.clone()).write(graph)?;
        file.commit()?;
        info!(
            path = %self.path.display(),
            tasks = graph.tasks.len(),
            categories = graph.categories.len(),
            notes = graph.notes.len(),
            "Saved task file"
        );
        Ok(())
    }

    /// Replace the changes file with `changes`.
    ///
    /// # Errors
    /// Returns an error when the document cannot be written or moved into place.
    pub fn save_changes(&self, changes: &ChangeSets) -> Result<(), StoreError> {
        let path = self.delta_path();
        let mut file = SafeWriteFile::create(&path)?;
        ChangesXmlWriter::with_encoding(ByteSink(&mut file), self.config.writer.encoding)
            .write(changes)?;
        file.commit()?;
        info!(path = %path.display(), devices = changes.len(), "Saved changes file");
        Ok(())
    }

    /// Write `task` as a template file at `path`, using this file's writer options.
    ///
    /// # Errors
    /// Returns an error when the document cannot be written or moved into place.
    pub fn save_template(&self, path: impl AsRef<Path>, task: &Task) -> Result<(), StoreError> {
        let path = path.as_ref();
        let mut file = SafeWriteFile::create(path)?;
        TemplateXmlWriter::with_options(ByteSink(&mut file), self.config.writer.clone())
            .write(task)?;
        file.commit()?;
        info!(path = %path.display(), task = %task.meta.id, "Saved task template");
        Ok(())
    }
}
