use super::error::FlowError;
use crate::state::FlowState;
use crate::status::StatusMessage;
use crate::submit::Navigation;

/// Event delivered to the [`StatusSink`](super::StatusSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// The user has to log in before the flow can continue.
    Message { message: StatusMessage, text: String },
    /// A step failed; `text` is ready for display.
    Failed { error: FlowError, text: String },
}

impl StatusEvent {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Message { text, .. } | Self::Failed { text, .. } => text,
        }
    }
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The submission went through and the host was asked to navigate.
    Navigated(Navigation),
    /// The user is not logged in; a message was shown.
    Blocked {
        message: StatusMessage,
        reason: FlowError,
    },
}

impl Outcome {
    /// Terminal state of the run.
    #[must_use]
    pub fn state(&self) -> FlowState {
        match self {
            Self::Navigated(_) => FlowState::Navigated,
            Self::Blocked { .. } => FlowState::Blocked,
        }
    }
}
