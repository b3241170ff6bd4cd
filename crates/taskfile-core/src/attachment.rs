use crate::id::ObjectId;
use crate::note::Note;
use crate::object::{Identified, NoteOwner, ObjectMeta, with_sub_notes};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What an attachment points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// A file on disk.
    File,
    /// A URI opened in a browser.
    Uri,
    /// A saved e-mail message.
    Mail,
    /// Anything else.
    #[default]
    Unknown,
}

impl AttachmentKind {
    /// Type tag written in the `type` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Uri => "uri",
            Self::Mail => "mail",
            Self::Unknown => "unknown",
        }
    }
}

/// File, URI or mail attached to another object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// Shared attributes.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Type tag.
    pub kind: AttachmentKind,
    /// External location (path or URI). For inline attachments only its
    /// extension is kept in the document.
    pub location: String,
    /// Inline content, stored in the document instead of the location.
    pub data: Option<Vec<u8>>,
    /// Notes about the attachment.
    pub notes: Vec<Note>,
}

impl Attachment {
    /// Attachment referring to an external location. The location doubles as subject.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, kind: AttachmentKind, location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            meta: ObjectMeta::new(id, location.clone()),
            kind,
            location,
            data: None,
            notes: Vec::new(),
        }
    }

    /// Extension of the location including the leading dot, empty when none.
    #[must_use]
    pub fn extension(&self) -> String {
        Path::new(&self.location)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }
}

impl Identified for Attachment {
    fn id(&self) -> &ObjectId {
        &self.meta.id
    }
}

impl NoteOwner for Attachment {
    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn notes_recursive(&self) -> Vec<&Note> {
        let mut notes = Vec::new();
        with_sub_notes(&self.notes, &mut notes);
        notes
    }
}
