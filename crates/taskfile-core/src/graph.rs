use crate::category::Category;
use crate::id::{Guid, ObjectId};
use crate::note::Note;
use crate::object::{Composite, NoteOwner};
use crate::syncml::SyncMlConfig;
use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Complete contents of a task file: root tasks, categories and notes plus
/// synchronization settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskGraph {
    /// Root tasks; subtasks are owned by their parents.
    pub tasks: Vec<Task>,
    /// Root categories.
    pub categories: Vec<Category>,
    /// Root notes not owned by a task or category.
    pub notes: Vec<Note>,
    /// Synchronization configuration.
    pub syncml_config: Option<SyncMlConfig>,
    /// Identity of this task file.
    pub guid: Option<Guid>,
}

impl TaskGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph from its JSON representation.
    ///
    /// # Errors
    /// Returns an error when `json` is not a valid graph.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// JSON representation of the graph.
    ///
    /// # Errors
    /// Returns an error when a value cannot be represented in JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Ids of every task, including subtasks.
    #[must_use]
    pub fn task_ids(&self) -> BTreeSet<ObjectId> {
        let mut ids = BTreeSet::new();
        for task in &self.tasks {
            task.collect_ids(&mut ids);
        }
        ids
    }

    /// Notes owned by tasks and categories at any depth, including sub-notes.
    #[must_use]
    pub fn owned_notes(&self) -> Vec<&Note> {
        let mut notes = Vec::new();
        for task in &self.tasks {
            notes.extend(task.notes_recursive());
        }
        for category in &self.categories {
            notes.extend(category.notes_recursive());
        }
        notes
    }

    /// Whether the graph holds no tasks, categories or notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.categories.is_empty() && self.notes.is_empty()
    }
}
