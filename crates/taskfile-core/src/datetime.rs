//! Wall-clock date/time conventions shared by the model and the task file format.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Canonical `%Y-%m-%d %H:%M:%S` layout used for every date/time attribute.
pub const DATE_TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

// Serde adapter writing [`PrimitiveDateTime`] values in [`DATE_TIME_FORMAT`].
time::serde::format_description!(
    pub serde_wall_clock,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// Current local wall-clock time.
///
/// Falls back to UTC when the local offset cannot be determined, which the
/// `time` crate reports on multi-threaded Unix processes.
#[must_use]
pub fn now_local() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use serde::{Deserialize, Serialize};
    use time::macros::datetime;

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "serde_wall_clock")]
        at: PrimitiveDateTime,
        #[serde(with = "serde_wall_clock::option", default)]
        until: Option<PrimitiveDateTime>,
    }

    #[test]
    fn serde_uses_wall_clock_layout() {
        let stamp = Stamp {
            at: datetime!(2024-01-01 10:00:00),
            until: None,
        };
        let json = serde_json::to_string(&stamp).expect("serialize stamp");
        assert_eq!(json, r#"{"at":"2024-01-01 10:00:00","until":null}"#);
        let back: Stamp = serde_json::from_str(r#"{"at":"2024-01-01 10:00:00"}"#)
            .expect("deserialize stamp");
        assert_eq!(back.at, stamp.at);
        assert!(back.until.is_none());
    }
}
