//! Login-status payloads and their classification.

use serde::{Deserialize, Serialize};

use crate::types::{Credential, ProviderUserId};

/// Login status reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginStatus {
    /// Logged into the provider and has authorized the app.
    Connected,
    /// Logged into the provider but has not authorized the app.
    NotAuthorized,
    /// Not logged into the provider, or the state cannot be determined.
    #[serde(other)]
    Unknown,
}

/// Status payload as delivered to the status-change callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StatusResponse {
    pub status: LoginStatus,
    #[serde(rename = "authResponse", default)]
    pub auth_response: Option<AuthResponse>,
}

impl StatusResponse {
    #[must_use]
    pub fn connected(credential: Credential) -> Self {
        Self {
            status: LoginStatus::Connected,
            auth_response: Some(AuthResponse::new(credential)),
        }
    }

    #[must_use]
    pub fn not_authorized() -> Self {
        Self {
            status: LoginStatus::NotAuthorized,
            auth_response: None,
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self {
            status: LoginStatus::Unknown,
            auth_response: None,
        }
    }

    /// The credential carried by a connected status, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.auth_response
            .as_ref()
            .and_then(|a| a.access_token.as_ref())
    }
}

/// `authResponse` part of a status payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct AuthResponse {
    /// Absent or empty tokens deserialize to `None`.
    #[serde(default, deserialize_with = "lenient_credential")]
    pub access_token: Option<Credential>,
    #[serde(rename = "userID", default)]
    pub user_id: Option<ProviderUserId>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub signed_request: Option<String>,
}

impl AuthResponse {
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            access_token: Some(credential),
            user_id: None,
            expires_in: None,
            signed_request: None,
        }
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: ProviderUserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

fn lenient_credential<'de, D>(deserializer: D) -> Result<Option<Credential>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|t| Credential::new(t).ok()))
}

/// Message shown to the user when the flow cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusMessage {
    /// Logged into the provider, but not into this application.
    LogIntoApp,
    /// Not logged into the provider.
    LogIntoProvider,
}

impl StatusMessage {
    /// Render the message with the configured display names.
    #[must_use]
    pub fn render(self, app_name: &str, provider_name: &str) -> String {
        match self {
            Self::LogIntoApp => format!("Please log into {app_name}."),
            Self::LogIntoProvider => format!("Please log into {provider_name}."),
        }
    }
}

/// Next step decided from a status payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Fetch the profile with this credential.
    Fetch(Credential),
    /// Stop and show a message. `missing_credential` marks a connected
    /// status that arrived without a usable token.
    Blocked {
        message: StatusMessage,
        missing_credential: bool,
    },
}

/// Map a status payload to the next step. Total over [`LoginStatus`].
#[must_use]
pub fn classify(response: &StatusResponse) -> Decision {
    match response.status {
        LoginStatus::Connected => match response.credential() {
            Some(credential) => Decision::Fetch(credential.clone()),
            None => Decision::Blocked {
                message: StatusMessage::LogIntoProvider,
                missing_credential: true,
            },
        },
        LoginStatus::NotAuthorized => Decision::Blocked {
            message: StatusMessage::LogIntoApp,
            missing_credential: false,
        },
        LoginStatus::Unknown => Decision::Blocked {
            message: StatusMessage::LogIntoProvider,
            missing_credential: false,
        },
    }
}
