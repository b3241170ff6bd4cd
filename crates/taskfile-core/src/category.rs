use crate::attachment::Attachment;
use crate::id::ObjectId;
use crate::note::Note;
use crate::object::{Composite, Identified, NoteOwner, ObjectMeta, with_sub_notes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Label applied to tasks and notes, possibly nested.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Shared attributes.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Whether views are filtered on this category.
    pub filtered: bool,
    /// Whether an object may belong to at most one subcategory.
    pub exclusive_subcategories: bool,
    /// Subcategories.
    pub children: Vec<Category>,
    /// Ids of the tasks and notes in this category.
    pub categorizables: BTreeSet<ObjectId>,
    /// Notes about the category.
    pub notes: Vec<Note>,
    /// Attached files, links and mails.
    pub attachments: Vec<Attachment>,
}

impl Category {
    /// Category with the given id and subject.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, subject: impl Into<String>) -> Self {
        Self {
            meta: ObjectMeta::new(id, subject),
            ..Self::default()
        }
    }

    /// Builder-style helper appending a subcategory.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Add a task or note to the category.
    pub fn add_categorizable(&mut self, id: impl Into<ObjectId>) {
        self.categorizables.insert(id.into());
    }
}

impl Identified for Category {
    fn id(&self) -> &ObjectId {
        &self.meta.id
    }
}

impl Composite for Category {
    fn children(&self) -> &[Self] {
        &self.children
    }
}

impl NoteOwner for Category {
    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn notes_recursive(&self) -> Vec<&Note> {
        let mut notes = Vec::new();
        with_sub_notes(&self.notes, &mut notes);
        for child in &self.children {
            notes.extend(child.notes_recursive());
        }
        notes
    }
}
