use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Facebook application identifier (the `appId` passed to SDK init).
///
/// Always a non-empty string of ASCII digits. Use `"141368599534524".parse::<AppId>()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppId(String);

impl AppId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AppId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for AppId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s))
        } else {
            Err(Error::InvalidAppId(s))
        }
    }
}

impl From<AppId> for String {
    fn from(id: AppId) -> Self {
        id.0
    }
}

/// Graph API protocol version, e.g. `v2.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion(String);

impl ApiVersion {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self("v2.2".into())
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let valid = s
            .strip_prefix('v')
            .and_then(|rest| rest.split_once('.'))
            .is_some_and(|(major, minor)| {
                !major.is_empty()
                    && !minor.is_empty()
                    && major.bytes().all(|b| b.is_ascii_digit())
                    && minor.bytes().all(|b| b.is_ascii_digit())
            });
        if valid { Ok(Self(s)) } else { Err(Error::InvalidApiVersion(s)) }
    }
}

impl From<ApiVersion> for String {
    fn from(v: ApiVersion) -> Self {
        v.0
    }
}

/// Provider-scoped user identifier (Graph `id` field).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct ProviderUserId(pub String);

/// Provider-issued bearer token.
///
/// Valid for the current browser session only. Never logged: `Debug` and
/// `Display` are redacted, use [`Credential::expose`] to read the value.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if the token is empty or whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::InvalidCredential);
        }
        Ok(Self(token))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<'de> Deserialize<'de> for Credential {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Error object returned by the Graph API in place of the requested data.
///
/// ```json
/// {"error": {"message": "...", "type": "OAuthException", "code": 190, "error_subcode": 458}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct GraphError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub error_subcode: Option<i64>,
    #[serde(default)]
    pub fbtrace_id: Option<String>,
}

impl GraphError {
    /// Error code for an invalid or expired access token.
    pub const CODE_INVALID_TOKEN: i64 = 190;
    /// Subcode: the user has not installed (authorized) the app.
    pub const SUBCODE_APP_NOT_INSTALLED: i64 = 458;

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
            code: None,
            error_subcode: None,
            fbtrace_id: None,
        }
    }

    /// True when the provider session exists but the app is not authorized.
    #[must_use]
    pub fn is_app_not_authorized(&self) -> bool {
        self.code == Some(Self::CODE_INVALID_TOKEN)
            && self.error_subcode == Some(Self::SUBCODE_APP_NOT_INSTALLED)
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, self.code) {
            (Some(kind), Some(code)) => write!(f, "{kind} ({code}): {}", self.message),
            (Some(kind), None) => write!(f, "{kind}: {}", self.message),
            (None, Some(code)) => write!(f, "({code}) {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

/// Envelope used to detect a Graph error payload.
#[derive(Debug, Deserialize)]
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub(crate) struct GraphErrorEnvelope {
    pub(crate) error: GraphError,
}

#[cfg_attr(not(feature = "http"), allow(dead_code))]
impl GraphErrorEnvelope {
    /// Returns the embedded error if `body` is a Graph error payload.
    pub(crate) fn detect(body: &str) -> Option<GraphError> {
        serde_json::from_str::<Self>(body).ok().map(|e| e.error)
    }
}
