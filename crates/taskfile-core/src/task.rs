use crate::attachment::Attachment;
use crate::datetime::serde_wall_clock;
use crate::effort::Effort;
use crate::id::ObjectId;
use crate::note::Note;
use crate::object::{Composite, Identified, NoteOwner, ObjectMeta, with_sub_notes};
use serde::{Deserialize, Serialize};
use time::{Duration, PrimitiveDateTime};

/// Period unit of a recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceUnit {
    /// Every N days.
    #[default]
    Daily,
    /// Every N weeks.
    Weekly,
    /// Every N months.
    Monthly,
    /// Every N years.
    Yearly,
}

impl RecurrenceUnit {
    /// Keyword written in the `unit` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// How a task repeats once completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recurrence {
    /// Period unit.
    pub unit: RecurrenceUnit,
    /// Number of units between occurrences.
    pub amount: u32,
    /// Occurrences so far.
    pub count: u32,
    /// Maximum number of occurrences, zero for unlimited.
    pub max: u32,
    /// No occurrences after this moment.
    #[serde(with = "serde_wall_clock::option")]
    pub stop: Option<PrimitiveDateTime>,
    /// Monthly/yearly recurrences keep the weekday instead of the day of month.
    pub same_weekday: bool,
    /// Next occurrence is computed from the completion date instead of the due date.
    pub recur_based_on_completion: bool,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self {
            unit: RecurrenceUnit::Daily,
            amount: 1,
            count: 0,
            max: 0,
            stop: None,
            same_weekday: false,
            recur_based_on_completion: false,
        }
    }
}

impl Recurrence {
    /// Recurrence every single `unit`.
    #[must_use]
    pub fn every(unit: RecurrenceUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }
}

/// Relative date expressions kept on tasks that act as templates.
///
/// `Some(expression)` is written verbatim; `Some("")` explicitly clears the field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskTemplates {
    /// Expression for the planned start date, e.g. `"3 days from now"`.
    pub planned_start: Option<String>,
    /// Expression for the due date.
    pub due: Option<String>,
    /// Expression for the completion date.
    pub completion: Option<String>,
    /// Expression for the reminder.
    pub reminder: Option<String>,
}

/// Unit of work with schedule, effort tracking and attached notes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Shared attributes.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Planned start, `None` when unset.
    #[serde(with = "serde_wall_clock::option")]
    pub planned_start: Option<PrimitiveDateTime>,
    /// Due date.
    #[serde(with = "serde_wall_clock::option")]
    pub due: Option<PrimitiveDateTime>,
    /// Actual start.
    #[serde(with = "serde_wall_clock::option")]
    pub actual_start: Option<PrimitiveDateTime>,
    /// Completion date.
    #[serde(with = "serde_wall_clock::option")]
    pub completion: Option<PrimitiveDateTime>,
    /// Progress in percent, zero when unset.
    pub percentage_complete: f64,
    /// Repetition rule.
    pub recurrence: Option<Recurrence>,
    /// Time budget, zero when unset.
    pub budget: Duration,
    /// Priority, zero is the default.
    pub priority: i64,
    /// Fee per hour of effort.
    pub hourly_fee: f64,
    /// Fee independent of effort.
    pub fixed_fee: f64,
    /// Active reminder including any snooze.
    #[serde(with = "serde_wall_clock::option")]
    pub reminder: Option<PrimitiveDateTime>,
    /// Reminder as originally set, before it was snoozed.
    #[serde(with = "serde_wall_clock::option")]
    pub reminder_before_snooze: Option<PrimitiveDateTime>,
    /// Ids of tasks that must be completed first.
    pub prerequisites: Vec<ObjectId>,
    /// Explicit override of the global "mark parent completed" setting.
    pub mark_completed_when_children_completed: Option<bool>,
    /// Subtasks.
    pub children: Vec<Task>,
    /// Tracked time.
    pub efforts: Vec<Effort>,
    /// Notes about the task.
    pub notes: Vec<Note>,
    /// Attached files, links and mails.
    pub attachments: Vec<Attachment>,
    /// Relative date expressions, used by task templates only.
    pub templates: TaskTemplates,
}

impl Task {
    /// Task with the given id and subject.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, subject: impl Into<String>) -> Self {
        Self {
            meta: ObjectMeta::new(id, subject),
            ..Self::default()
        }
    }

    /// Builder-style helper appending a subtask.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

impl Identified for Task {
    fn id(&self) -> &ObjectId {
        &self.meta.id
    }
}

impl Composite for Task {
    fn children(&self) -> &[Self] {
        &self.children
    }
}

impl NoteOwner for Task {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurrence_defaults_to_single_unit_without_limits() {
        let recurrence = Recurrence::every(RecurrenceUnit::Weekly);
        assert_eq!(recurrence.amount, 1);
        assert_eq!(recurrence.count, 0);
        assert_eq!(recurrence.max, 0);
        assert!(recurrence.stop.is_none());
    }

    #[test]
    fn notes_recursive_includes_sub_notes_and_subtask_notes() {
        let mut child = Task::new("child", "child");
        child.notes.push(Note::new("n3", "child note"));
        let mut parent = Task::new("parent", "parent").with_child(child);
        parent
            .notes
            .push(Note::new("n1", "note").with_child(Note::new("n2", "sub note")));

        let ids: Vec<&str> = parent
            .notes_recursive()
            .into_iter()
            .map(|note| note.id().as_str())
            .collect();
        assert_eq!(ids, ["n1", "n2", "n3"]);
    }
}
