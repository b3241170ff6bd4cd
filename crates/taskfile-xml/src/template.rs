//! Task templates: a single task whose dates are kept relative to the moment
//! the template is used.

use crate::element::Element;
use crate::error::Result;
use crate::node::{Entity, NodeBuilder};
use crate::sink::Sink;
use crate::writer::{WriterOptions, XmlWriter};
use taskfile_core::Task;
use taskfile_core::datetime::now_local;
use time::PrimitiveDateTime;

const SECONDS_PER_DAY: i64 = 86_400;

/// Express `at` relative to `now` as `"<N> minutes from now"` or `"<N> minutes ago"`.
///
/// Whole days count 1440 minutes each; the remaining seconds are rounded to the
/// nearest minute, ties to even. Sub-second parts are discarded first.
#[must_use]
pub fn relative_expression(at: PrimitiveDateTime, now: PrimitiveDateTime) -> String {
    let delta = at - now;
    let mut seconds = delta.whole_seconds();
    if delta.subsec_nanoseconds() < 0 {
        seconds -= 1;
    }
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let rest = seconds.rem_euclid(SECONDS_PER_DAY);
    let (quotient, remainder) = (rest / 60, rest % 60);
    let rounded = if remainder > 30 || (remainder == 30 && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    let minutes = days * 1440 + rounded;
    if minutes < 0 {
        format!("{} minutes ago", minutes.unsigned_abs())
    } else {
        format!("{minutes} minutes from now")
    }
}

/// Writes one task, with its subtasks, as a template file.
///
/// Planned start, due, completion and reminder dates get a `*tmpl` attribute:
/// the task's explicit template expression when it has one, otherwise the
/// date relative to now. An explicit empty expression clears the date.
#[derive(Debug)]
pub struct TemplateXmlWriter<S> {
    inner: XmlWriter<S>,
    now: Option<PrimitiveDateTime>,
}

impl<S: Sink> TemplateXmlWriter<S> {
    /// Writer with default options measuring from the local time at each write.
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, WriterOptions::default())
    }

    /// Writer with explicit options.
    pub const fn with_options(sink: S, options: WriterOptions) -> Self {
        Self {
            inner: XmlWriter::with_options(sink, options),
            now: None,
        }
    }

    /// Measure relative dates from `now` instead of the current local time.
    #[must_use]
    pub const fn at(mut self, now: PrimitiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Give back the sink.
    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }

    /// Write `task` as the only root task of a template file.
    ///
    /// # Errors
    /// Returns [`crate::WriteError::Sink`] when the sink fails.
    pub fn write(&mut self, task: &Task) -> Result<()> {
        let now = self.now.unwrap_or_else(now_local);
        let builder = NodeBuilder::new().with_template_now(now);
        let mut root = Element::new("tasks");
        root.push(builder.build(Entity::Task(task))?);
        self.inner.write_root(root)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use time::Duration;
    use time::macros::datetime;

    const NOW: PrimitiveDateTime = datetime!(2024-03-10 12:00:00);

    #[test]
    fn future_and_past_minutes() {
        assert_eq!(
            relative_expression(NOW + Duration::minutes(180), NOW),
            "180 minutes from now"
        );
        assert_eq!(
            relative_expression(NOW - Duration::minutes(60), NOW),
            "60 minutes ago"
        );
        assert_eq!(relative_expression(NOW, NOW), "0 minutes from now");
        assert_eq!(
            relative_expression(NOW + Duration::days(2), NOW),
            "2880 minutes from now"
        );
    }

    #[test]
    fn remaining_seconds_round_half_to_even() {
        assert_eq!(
            relative_expression(NOW + Duration::seconds(30), NOW),
            "0 minutes from now"
        );
        assert_eq!(
            relative_expression(NOW + Duration::seconds(90), NOW),
            "2 minutes from now"
        );
        assert_eq!(
            relative_expression(NOW + Duration::seconds(89), NOW),
            "1 minutes from now"
        );
        assert_eq!(
            relative_expression(NOW - Duration::seconds(90), NOW),
            "2 minutes ago"
        );
    }

    #[test]
    fn subtasks_get_relative_dates_too() {
        let mut child = Task::new("t2", "child");
        child.due = Some(NOW + Duration::minutes(30));
        let task = Task::new("t1", "parent").with_child(child);

        let mut writer = TemplateXmlWriter::new(Vec::new()).at(NOW);
        writer.write(&task).expect("write template");
        let text = String::from_utf8(writer.into_inner()).expect("utf-8 output");
        assert!(text.contains(r#"duedatetmpl="30 minutes from now""#));
        assert!(text.contains("<task id=\"t1\""));
    }
}
