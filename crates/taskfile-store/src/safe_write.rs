//! Atomic replacement of files.

use crate::error::StoreError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// File contents staged next to a target and swapped in on [`commit`](Self::commit).
///
/// Dropping the value without committing removes the staged file and leaves
/// the target untouched.
#[derive(Debug)]
pub struct SafeWriteFile {
    target: PathBuf,
    staged: NamedTempFile,
}

impl SafeWriteFile {
    /// Stage a replacement for `target` in the same directory.
    ///
    /// # Errors
    /// Returns [`StoreError::MissingFileName`] when `target` does not name a
    /// file, or an I/O error when the staging file cannot be created.
    pub fn create(target: impl AsRef<Path>) -> Result<Self, StoreError> {
        let target = target.as_ref();
        if target.file_name().is_none() {
            return Err(StoreError::MissingFileName(target.to_path_buf()));
        }
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged = NamedTempFile::new_in(dir)?;
        debug!(target = %target.display(), staged = %staged.path().display(), "Staging file");
        Ok(Self {
            target: target.to_path_buf(),
            staged,
        })
    }

    /// Path that will be replaced.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Flush the staged contents to disk and rename them over the target.
    ///
    /// # Errors
    /// Returns an I/O error when syncing fails and [`StoreError::Persist`]
    /// when the rename fails; the staged file is removed in both cases.
    pub fn commit(mut self) -> Result<(), StoreError> {
        self.staged.flush()?;
        self.staged.as_file().sync_all()?;
        self.staged
            .persist(&self.target)
            .map_err(|err| StoreError::Persist {
                path: self.target.clone(),
                source: err.error,
            })?;
        Ok(())
    }
}

impl Write for SafeWriteFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.staged.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.staged.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn commit_replaces_target() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("todo.tsk");
        fs::write(&target, "old")?;

        let mut file = SafeWriteFile::create(&target)?;
        file.write_all(b"new")?;
        assert_eq!(fs::read_to_string(&target)?, "old");
        file.commit()?;

        assert_eq!(fs::read_to_string(&target)?, "new");
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn dropping_without_commit_keeps_target() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("todo.tsk");
        fs::write(&target, "old")?;

        let mut file = SafeWriteFile::create(&target)?;
        file.write_all(b"partial")?;
        drop(file);

        assert_eq!(fs::read_to_string(&target)?, "old");
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn directory_paths_are_rejected() {
        let Err(StoreError::MissingFileName(path)) = SafeWriteFile::create("/") else {
            panic!("root directory is not a file");
        };
        assert_eq!(path, Path::new("/"));
    }
}
