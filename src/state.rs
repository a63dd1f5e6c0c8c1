use crate::error::Error;

/// Progress of one reconciliation run.
///
/// ```text
/// Idle -> StatusChecked -> Blocked
///                       -> Fetching -> FetchFailed
///                                   -> Submitted -> Navigated
///                                                -> SubmissionFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    Idle,
    StatusChecked,
    Blocked,
    Fetching,
    FetchFailed,
    Submitted,
    SubmissionFailed,
    Navigated,
}

impl FlowState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Blocked | Self::FetchFailed | Self::SubmissionFailed | Self::Navigated
        )
    }

    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::StatusChecked)
                | (Self::StatusChecked, Self::Blocked | Self::Fetching)
                | (Self::Fetching, Self::Submitted | Self::FetchFailed)
                | (Self::Submitted, Self::Navigated | Self::SubmissionFailed)
        )
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if `next` is not reachable from `self`.
    pub fn advance(self, next: Self) -> Result<Self, Error> {
        if self.can_advance_to(next) {
            tracing::debug!(from = %self, to = %next, "flow transition");
            Ok(next)
        } else {
            Err(Error::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::StatusChecked => "status_checked",
            Self::Blocked => "blocked",
            Self::Fetching => "fetching",
            Self::FetchFailed => "fetch_failed",
            Self::Submitted => "submitted",
            Self::SubmissionFailed => "submission_failed",
            Self::Navigated => "navigated",
        };
        f.write_str(name)
    }
}
