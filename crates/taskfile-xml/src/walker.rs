//! Deterministic traversal of the domain graph.

use std::collections::BTreeSet;
use taskfile_core::{Category, Composite, Identified, Note, ObjectId, Task, TaskGraph};

/// Stable ascending sort by id.
///
/// Entities sharing an id keep their input order.
pub fn sorted_by_id<'a, T: Identified + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a T> {
    let mut sorted: Vec<&T> = items.into_iter().collect();
    sorted.sort_by(|a, b| a.id().cmp(b.id()));
    sorted
}

/// Top-level view of a [`TaskGraph`] in write order.
#[derive(Debug)]
pub struct TreeWalker<'g> {
    graph: &'g TaskGraph,
    owned_notes: Vec<&'g Note>,
}

impl<'g> TreeWalker<'g> {
    /// Walk `graph`.
    #[must_use]
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self {
            graph,
            owned_notes: graph.owned_notes(),
        }
    }

    /// Root tasks sorted by id.
    #[must_use]
    pub fn tasks(&self) -> Vec<&'g Task> {
        sorted_by_id(&self.graph.tasks)
    }

    /// Root categories sorted by id.
    #[must_use]
    pub fn categories(&self) -> Vec<&'g Category> {
        sorted_by_id(&self.graph.categories)
    }

    /// Root notes sorted by id, without notes already written under a task or category.
    #[must_use]
    pub fn free_notes(&self) -> Vec<&'g Note> {
        let owned: BTreeSet<&ObjectId> = self.owned_notes.iter().map(|note| note.id()).collect();
        sorted_by_id(
            self.graph
                .notes
                .iter()
                .filter(|note| !owned.contains(note.id())),
        )
    }

    /// Ids a category may list as categorizables: every task, every note in
    /// the note container and every note owned by a task or category.
    #[must_use]
    pub fn categorizable_ids(&self) -> BTreeSet<ObjectId> {
        let mut ids = self.graph.task_ids();
        for note in &self.graph.notes {
            note.collect_ids(&mut ids);
        }
        ids.extend(self.owned_notes.iter().map(|note| note.id().clone()));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<T: Identified>(items: &[&T]) -> Vec<String> {
        items.iter().map(|item| item.id().to_string()).collect()
    }

    #[test]
    fn sorting_ignores_insertion_order() {
        let tasks = [Task::new("c", "c"), Task::new("a", "a"), Task::new("b", "b")];
        assert_eq!(ids(&sorted_by_id(&tasks)), ["a", "b", "c"]);
    }

    #[test]
    fn sorting_is_stable_for_duplicate_ids() {
        let tasks = [Task::new("x", "first"), Task::new("a", "a"), Task::new("x", "second")];
        let subjects: Vec<&str> = sorted_by_id(&tasks)
            .into_iter()
            .map(|task| task.meta.subject.as_str())
            .collect();
        assert_eq!(subjects, ["a", "first", "second"]);
    }

    #[test]
    fn owned_notes_are_not_repeated_at_top_level() {
        let mut task = Task::new("t1", "task");
        task.notes.push(Note::new("n1", "owned"));
        let graph = TaskGraph {
            tasks: vec![task],
            notes: vec![Note::new("n2", "free"), Note::new("n1", "owned")],
            ..TaskGraph::default()
        };
        let walker = TreeWalker::new(&graph);
        assert_eq!(ids(&walker.free_notes()), ["n2"]);
    }

    #[test]
    fn categorizable_ids_cover_subtasks_and_notes() {
        let mut category = Category::new("c1", "category");
        category.notes.push(Note::new("n3", "category note"));
        let graph = TaskGraph {
            tasks: vec![Task::new("t1", "task").with_child(Task::new("t2", "subtask"))],
            categories: vec![category],
            notes: vec![Note::new("n1", "note").with_child(Note::new("n2", "sub note"))],
            ..TaskGraph::default()
        };
        let known: Vec<String> = TreeWalker::new(&graph)
            .categorizable_ids()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(known, ["n1", "n2", "n3", "t1", "t2"]);
    }
}
