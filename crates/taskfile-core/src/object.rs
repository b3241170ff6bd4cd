use crate::datetime::serde_wall_clock;
use crate::id::ObjectId;
use crate::note::Note;
use crate::status::Status;
use crate::style::{Color, Font};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::PrimitiveDateTime;

/// Attributes shared by every task, category, note and attachment.
///
/// Empty values (`None`, empty strings, zero ordering, no contexts) mean
/// "unset" and are left out of written documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    /// Stable identifier.
    pub id: ObjectId,
    /// Synchronization status.
    pub status: Status,
    /// Creation time, `None` when unknown.
    #[serde(with = "serde_wall_clock::option")]
    pub creation: Option<PrimitiveDateTime>,
    /// Last modification time, `None` when unknown.
    #[serde(with = "serde_wall_clock::option")]
    pub modification: Option<PrimitiveDateTime>,
    /// One-line title.
    pub subject: String,
    /// Free-form multi-line text.
    pub description: String,
    /// Own foreground color (never the inherited one).
    pub fg_color: Option<Color>,
    /// Own background color (never the inherited one).
    pub bg_color: Option<Color>,
    /// Own font.
    pub font: Option<Font>,
    /// Icon name.
    pub icon: String,
    /// Icon name used while selected.
    pub selected_icon: String,
    /// Manual ordering position, zero when unordered.
    pub ordering: i64,
    /// View contexts in which the object is shown expanded.
    pub expanded_contexts: BTreeSet<String>,
}

impl ObjectMeta {
    /// Metadata with the given id and subject, everything else unset.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            ..Self::default()
        }
    }
}

/// Access to an object's identifier.
pub trait Identified {
    /// Stable identifier used for sorting and cross references.
    fn id(&self) -> &ObjectId;
}

/// Objects that own an ordered list of children of their own kind.
pub trait Composite: Identified + Sized {
    /// Direct children.
    fn children(&self) -> &[Self];

    /// Identifiers of this object and all of its descendants.
    fn collect_ids(&self, into: &mut BTreeSet<ObjectId>) {
        into.insert(self.id().clone());
        for child in self.children() {
            child.collect_ids(into);
        }
    }
}

/// Objects that can carry notes.
pub trait NoteOwner {
    /// Notes attached directly to this object.
    fn notes(&self) -> &[Note];

    /// Notes owned by this object including their sub-notes and, for composite
    /// owners, the notes of every descendant.
    fn notes_recursive(&self) -> Vec<&Note>;
}

/// Flatten a note list with all sub-notes, parents before children.
pub(crate) fn with_sub_notes<'a>(notes: &'a [Note], into: &mut Vec<&'a Note>) {
    for note in notes {
        into.push(note);
        with_sub_notes(&note.children, into);
    }
}
