use crate::datetime::serde_wall_clock;
use crate::id::ObjectId;
use crate::object::Identified;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// Period of time spent on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effort {
    /// Stable identifier.
    pub id: ObjectId,
    /// Synchronization status.
    #[serde(default)]
    pub status: Status,
    /// Start of the period.
    #[serde(with = "serde_wall_clock")]
    pub start: PrimitiveDateTime,
    /// End of the period, `None` while the effort is still being tracked.
    #[serde(with = "serde_wall_clock::option", default)]
    pub stop: Option<PrimitiveDateTime>,
    /// Free-form text.
    #[serde(default)]
    pub description: String,
}

impl Effort {
    /// Effort with the given period.
    #[must_use]
    pub fn new(
        id: impl Into<ObjectId>,
        start: PrimitiveDateTime,
        stop: Option<PrimitiveDateTime>,
    ) -> Self {
        Self {
            id: id.into(),
            status: Status::New,
            start,
            stop,
            description: String::new(),
        }
    }

    /// Whether the effort is still being tracked.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.stop.is_none()
    }
}

impl Identified for Effort {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}
