//! One element per domain entity.
//!
//! Attributes are only written when they differ from the field's empty value
//! (unset date, zero duration, zero number, empty string, false flag). Child
//! entities are appended sorted by id.

use crate::attribute::{
    format_bool, format_color, format_contexts, format_date_time, format_duration, format_font,
    format_ids, format_number,
};
use crate::element::Element;
use crate::error::{Result, WriteError};
use crate::template::relative_expression;
use crate::walker::sorted_by_id;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::collections::BTreeSet;
use taskfile_core::{
    Attachment, Category, Composite, Effort, Note, ObjectId, ObjectMeta, Recurrence, SyncMlConfig,
    Task,
};
use time::{Duration, PrimitiveDateTime};
use tracing::trace;

/// Entity handed to [`NodeBuilder::build`].
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    /// `<task>` with its subtasks, efforts, notes and attachments.
    Task(&'a Task),
    /// `<category>` with its subcategories, notes and attachments.
    Category(&'a Category),
    /// `<note>` with its sub-notes and attachments.
    Note(&'a Note),
    /// `<effort>`.
    Effort(&'a Effort),
    /// `<attachment>` with its notes.
    Attachment(&'a Attachment),
    /// `<recurrence>`.
    Recurrence(&'a Recurrence),
    /// `<syncmlconfig>` with nested settings.
    SyncMl(&'a SyncMlConfig),
}

/// Builds elements for domain entities.
#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    categorizables: Option<BTreeSet<ObjectId>>,
    template_now: Option<PrimitiveDateTime>,
}

impl NodeBuilder {
    /// Builder writing every categorizable id and absolute dates only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict category `categorizables` to `ids`; other ids are dropped.
    #[must_use]
    pub fn with_categorizable_ids(mut self, ids: BTreeSet<ObjectId>) -> Self {
        self.categorizables = Some(ids);
        self
    }

    /// Add relative `*tmpl` date attributes to tasks, measured from `now`.
    #[must_use]
    pub const fn with_template_now(mut self, now: PrimitiveDateTime) -> Self {
        self.template_now = Some(now);
        self
    }

    /// Build the element for `entity`, including all owned children.
    ///
    /// # Errors
    /// Returns [`WriteError::InvalidName`] when a synchronization setting name
    /// is not a valid element name and [`WriteError::Attribute`] when a date
    /// cannot be formatted.
    pub fn build(&self, entity: Entity<'_>) -> Result<Element> {
        match entity {
            Entity::Task(task) => self.task_node(task),
            Entity::Category(category) => self.category_node(category),
            Entity::Note(note) => self.note_node(note),
            Entity::Effort(effort) => effort_node(effort),
            Entity::Attachment(attachment) => self.attachment_node(attachment),
            Entity::Recurrence(recurrence) => recurrence_node(recurrence),
            Entity::SyncMl(config) => syncml_node(config),
        }
    }

    fn composite_node<T: Composite>(
        &self,
        name: &str,
        meta: &ObjectMeta,
        children: &[T],
        child_node: impl Fn(&Self, &T) -> Result<Element>,
    ) -> Result<Element> {
        let mut node = styled_node(name, meta)?;
        if !meta.expanded_contexts.is_empty() {
            node.set("expandedContexts", format_contexts(&meta.expanded_contexts));
        }
        for child in sorted_by_id(children) {
            node.push(child_node(self, child)?);
        }
        Ok(node)
    }

    fn task_node(&self, task: &Task) -> Result<Element> {
        let mut node = self.composite_node("task", &task.meta, &task.children, Self::task_node)?;
        set_date(&mut node, "plannedstartdate", task.planned_start)?;
        set_date(&mut node, "duedate", task.due)?;
        set_date(&mut node, "actualstartdate", task.actual_start)?;
        set_date(&mut node, "completiondate", task.completion)?;
        if task.percentage_complete != 0.0 {
            node.set("percentageComplete", format_number(task.percentage_complete));
        }
        if let Some(recurrence) = &task.recurrence {
            node.push(recurrence_node(recurrence)?);
        }
        if !task.budget.is_zero() {
            node.set("budget", format_duration(task.budget));
        }
        if task.priority != 0 {
            node.set("priority", task.priority.to_string());
        }
        if task.hourly_fee != 0.0 {
            node.set("hourlyFee", format_number(task.hourly_fee));
        }
        if task.fixed_fee != 0.0 {
            node.set("fixedFee", format_number(task.fixed_fee));
        }
        if let Some(reminder) = task.reminder {
            node.set("reminder", format_date_time(reminder)?);
            if let Some(before) = task.reminder_before_snooze.filter(|before| *before < reminder) {
                node.set("reminderBeforeSnooze", format_date_time(before)?);
            }
        }
        if !task.prerequisites.is_empty() {
            node.set("prerequisites", format_ids(&task.prerequisites));
        }
        if let Some(mark) = task.mark_completed_when_children_completed {
            node.set("shouldMarkCompletedWhenAllChildrenCompleted", format_bool(mark));
        }
        for effort in sorted_by_id(&task.efforts) {
            node.push(effort_node(effort)?);
        }
        for note in sorted_by_id(&task.notes) {
            node.push(self.note_node(note)?);
        }
        for attachment in sorted_by_id(&task.attachments) {
            node.push(self.attachment_node(attachment)?);
        }
        if let Some(now) = self.template_now {
            apply_templates(&mut node, task, now);
        }
        Ok(node)
    }

    fn category_node(&self, category: &Category) -> Result<Element> {
        let mut node = self.composite_node(
            "category",
            &category.meta,
            &category.children,
            Self::category_node,
        )?;
        if category.filtered {
            node.set("filtered", format_bool(true));
        }
        if category.exclusive_subcategories {
            node.set("exclusiveSubcategories", format_bool(true));
        }
        for note in sorted_by_id(&category.notes) {
            node.push(self.note_node(note)?);
        }
        for attachment in sorted_by_id(&category.attachments) {
            node.push(self.attachment_node(attachment)?);
        }
        let categorizables = category.categorizables.iter().filter(|id| {
            let known = self
                .categorizables
                .as_ref()
                .is_none_or(|known| known.contains(*id));
            if !known {
                trace!(category = %category.meta.id, %id, "Dropping unknown categorizable");
            }
            known
        });
        let ids = format_ids(categorizables);
        if !ids.is_empty() {
            node.set("categorizables", ids);
        }
        Ok(node)
    }

    fn note_node(&self, note: &Note) -> Result<Element> {
        let mut node = self.composite_node("note", &note.meta, &note.children, Self::note_node)?;
        for attachment in sorted_by_id(&note.attachments) {
            node.push(self.attachment_node(attachment)?);
        }
        Ok(node)
    }

    fn attachment_node(&self, attachment: &Attachment) -> Result<Element> {
        let mut node = styled_node("attachment", &attachment.meta)?;
        node.set("type", attachment.kind.as_str());
        match &attachment.data {
            None => node.set("location", attachment.location.as_str()),
            Some(data) => {
                let element = node.sub_element("data");
                element.set("extension", attachment.extension());
                element.set_text(STANDARD.encode(data));
            }
        }
        for note in sorted_by_id(&attachment.notes) {
            node.push(self.note_node(note)?);
        }
        Ok(node)
    }
}

fn base_node(name: &str, meta: &ObjectMeta) -> Result<Element> {
    let mut node = Element::new(name);
    node.set("id", meta.id.as_str());
    node.set("status", meta.status.code().to_string());
    for (key, at) in [
        ("creationDateTime", meta.creation),
        ("modificationDateTime", meta.modification),
    ] {
        if let Some(at) = at.filter(|at| *at > PrimitiveDateTime::MIN) {
            node.set(key, format_date_time(at)?);
        }
    }
    if !meta.subject.is_empty() {
        node.set("subject", meta.subject.as_str());
    }
    if !meta.description.is_empty() {
        node.sub_element("description")
            .set_text(meta.description.as_str());
    }
    Ok(node)
}

fn styled_node(name: &str, meta: &ObjectMeta) -> Result<Element> {
    let mut node = base_node(name, meta)?;
    if let Some(color) = meta.fg_color {
        node.set("fgColor", format_color(color));
    }
    if let Some(color) = meta.bg_color {
        node.set("bgColor", format_color(color));
    }
    if let Some(font) = &meta.font {
        node.set("font", format_font(font));
    }
    if !meta.icon.is_empty() {
        node.set("icon", meta.icon.as_str());
    }
    if !meta.selected_icon.is_empty() {
        node.set("selectedIcon", meta.selected_icon.as_str());
    }
    if meta.ordering != 0 {
        node.set("ordering", meta.ordering.to_string());
    }
    Ok(node)
}

fn set_date(node: &mut Element, key: &str, value: Option<PrimitiveDateTime>) -> Result<()> {
    if let Some(value) = value {
        node.set(key, format_date_time(value)?);
    }
    Ok(())
}

fn recurrence_node(recurrence: &Recurrence) -> Result<Element> {
    let mut node = Element::new("recurrence");
    node.set("unit", recurrence.unit.as_str());
    if recurrence.amount > 1 {
        node.set("amount", recurrence.amount.to_string());
    }
    if recurrence.count > 0 {
        node.set("count", recurrence.count.to_string());
    }
    if recurrence.max > 0 {
        node.set("max", recurrence.max.to_string());
    }
    set_date(&mut node, "stop_datetime", recurrence.stop)?;
    if recurrence.same_weekday {
        node.set("sameWeekday", format_bool(true));
    }
    if recurrence.recur_based_on_completion {
        node.set("recurBasedOnCompletion", format_bool(true));
    }
    Ok(node)
}

fn effort_node(effort: &Effort) -> Result<Element> {
    let mut node = Element::new("effort");
    node.set("id", effort.id.as_str());
    node.set("status", effort.status.code().to_string());
    let start = format_date_time(effort.start)?;
    if let Some(stop) = effort.stop {
        let mut formatted = format_date_time(stop)?;
        if formatted == start {
            formatted = format_date_time(stop.saturating_add(Duration::SECOND))?;
        }
        node.set("start", start);
        node.set("stop", formatted);
    } else {
        node.set("start", start);
    }
    if !effort.description.is_empty() {
        node.sub_element("description")
            .set_text(effort.description.as_str());
    }
    Ok(node)
}

fn syncml_node(config: &SyncMlConfig) -> Result<Element> {
    let mut node = Element::new("syncmlconfig");
    syncml_level(&mut node, config)?;
    Ok(node)
}

fn syncml_level(node: &mut Element, config: &SyncMlConfig) -> Result<()> {
    for (name, value) in config.properties() {
        let property = node.sub_element("property");
        property.set("name", name);
        property.set_text(value);
    }
    for child in config.children() {
        if !is_element_name(&child.name) {
            return Err(WriteError::InvalidName(child.name.clone()));
        }
        syncml_level(node.sub_element(child.name.as_str()), child)?;
    }
    Ok(())
}

/// Whether `name` is an XML element name without namespace prefix.
pub(crate) fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.'))
}

fn apply_templates(node: &mut Element, task: &Task, now: PrimitiveDateTime) {
    let fields = [
        ("plannedstartdate", &task.templates.planned_start, task.planned_start),
        ("duedate", &task.templates.due, task.due),
        ("completiondate", &task.templates.completion, task.completion),
        ("reminder", &task.templates.reminder, task.reminder),
    ];
    for (name, expression, at) in fields {
        let value = match expression {
            Some(expression) => (!expression.is_empty()).then(|| expression.clone()),
            None => at.map(|at| relative_expression(at, now)),
        };
        match value {
            Some(value) => node.set(format!("{name}tmpl"), value),
            None => {
                node.remove(name);
            }
        }
    }
}
