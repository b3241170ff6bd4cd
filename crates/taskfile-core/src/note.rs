use crate::attachment::Attachment;
use crate::id::ObjectId;
use crate::object::{Composite, Identified, ObjectMeta};
use serde::{Deserialize, Serialize};

/// Free-form note, possibly nested and carrying attachments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Shared attributes.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Sub-notes.
    pub children: Vec<Note>,
    /// Attached files, links and mails.
    pub attachments: Vec<Attachment>,
}

impl Note {
    /// Note with the given id and subject.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, subject: impl Into<String>) -> Self {
        Self {
            meta: ObjectMeta::new(id, subject),
            ..Self::default()
        }
    }

    /// Builder-style helper appending a sub-note.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

impl Identified for Note {
    fn id(&self) -> &ObjectId {
        &self.meta.id
    }
}

impl Composite for Note {
    fn children(&self) -> &[Self] {
        &self.children
    }
}
