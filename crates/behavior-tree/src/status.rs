//! Status returned by behavior nodes.

/// The result of evaluating a node.
///
/// For conditions, `Success` means the condition held. For decision leaves,
/// `Success` means a decision was written to the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Maps a boolean check onto a status.
    #[inline]
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
