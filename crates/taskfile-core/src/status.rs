use serde::{Deserialize, Serialize};

/// Synchronization status of a domain object.
///
/// Written as its integer code in the `status` attribute of every node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Never synchronized and not tracked.
    None,
    /// Created since the last synchronization.
    #[default]
    New,
    /// Modified since the last synchronization.
    Changed,
    /// Marked for deletion at the next synchronization.
    Deleted,
}

impl Status {
    /// Integer code used by the task file format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::New => 1,
            Self::Changed => 2,
            Self::Deleted => 3,
        }
    }

    /// Inverse of [`Status::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::New),
            2 => Some(Self::Changed),
            3 => Some(Self::Deleted),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for status in [Status::None, Status::New, Status::Changed, Status::Deleted] {
            assert_eq!(Status::from_code(status.code()), Some(status));
        }
        assert_eq!(Status::from_code(4), None);
    }

    #[test]
    fn new_is_default() {
        assert_eq!(Status::default().code(), 1);
    }
}
