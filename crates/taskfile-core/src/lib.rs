//! Domain graph persisted in task files: tasks, categories, notes, efforts,
//! attachments, recurrences and synchronization settings.
//!
//! Every type here is plain data. Writers walk the graph read-only; callers
//! own it and must not mutate it while a write is in progress.

/// Attachment type.
pub mod attachment;
/// Category type.
pub mod category;
pub mod changes;
pub mod datetime;
/// Effort type.
pub mod effort;
/// Task file contents.
pub mod graph;
/// Identifier types.
pub mod id;
/// Note type.
pub mod note;
/// Shared object attributes and traversal traits.
pub mod object;
/// Synchronization status.
pub mod status;
/// Colors and fonts.
pub mod style;
/// Synchronization configuration tree.
pub mod syncml;
/// Task and recurrence types.
pub mod task;

pub use attachment::{Attachment, AttachmentKind};
pub use category::Category;
pub use changes::{ChangeSets, DeviceChanges};
pub use datetime::DATE_TIME_FORMAT;
pub use effort::Effort;
pub use graph::TaskGraph;
pub use id::{Guid, IdError, ObjectId};
pub use note::Note;
pub use object::{Composite, Identified, NoteOwner, ObjectMeta};
pub use status::Status;
pub use style::{Color, Font, FontStyle, FontWeight};
pub use syncml::SyncMlConfig;
pub use task::{Recurrence, RecurrenceUnit, Task, TaskTemplates};
