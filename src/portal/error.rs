use crate::state::FlowState;
use crate::status::LoginStatus;

/// Why a reconciliation run did not reach navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The provider could not report a login status.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The user is not connected to both the provider and the app.
    #[error("Not connected ({0:?})")]
    NotConnected(LoginStatus),

    /// Connected status arrived without a usable credential.
    #[error("Connected status carried no credential")]
    CredentialMissing,

    /// Profile request failed or returned an error payload.
    #[error("Profile fetch failed: {0}")]
    FetchFailed(String),

    /// Backend rejected or never received the submission.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Provider or backend logout failed.
    #[error("Logout failed: {0}")]
    LogoutFailed(String),
}

impl FlowError {
    /// Text suitable for the status display.
    #[must_use]
    pub fn user_message(&self, provider_name: &str) -> String {
        match self {
            Self::ProviderUnavailable(_) => {
                format!("Could not reach {provider_name}. Please try again.")
            }
            Self::NotConnected(_) | Self::CredentialMissing => {
                format!("Please log into {provider_name}.")
            }
            Self::FetchFailed(_) => {
                format!("Could not read your {provider_name} profile. Please try again.")
            }
            Self::SubmissionFailed(_) => "Login failed. Please try again.".into(),
            Self::LogoutFailed(_) => "Logout failed. Please try again.".into(),
        }
    }

    /// Terminal state a reconciliation run ends in with this error.
    ///
    /// `None` for errors raised outside a run: the initial status query and
    /// logout.
    #[must_use]
    pub fn state(&self) -> Option<FlowState> {
        match self {
            Self::NotConnected(_) | Self::CredentialMissing => Some(FlowState::Blocked),
            Self::FetchFailed(_) => Some(FlowState::FetchFailed),
            Self::SubmissionFailed(_) => Some(FlowState::SubmissionFailed),
            Self::ProviderUnavailable(_) | Self::LogoutFailed(_) => None,
        }
    }
}
