//! File persistence for task graphs: atomic task file saves, the companion
//! changes file and task templates.

/// `taskfile.toml` configuration.
pub mod config;
/// Error types.
pub mod error;
pub mod safe_write;
/// Task file handle.
pub mod task_file;

pub use config::{CONFIG_FILE, ChangesConfig, StoreConfig};
pub use error::StoreError;
pub use safe_write::SafeWriteFile;
pub use task_file::TaskFile;
