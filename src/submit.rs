//! Backend submission schema and transports.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::profile::ProfileDetails;
use crate::types::{Credential, ProviderUserId};

/// Form key carrying the provider user id.
pub const USER_ID_KEY: &str = "user_id";
/// Form key carrying the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Body posted to the login portal endpoint.
///
/// The backend accepts exactly `user_id` and `accessToken`; no other keys
/// are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub user_id: ProviderUserId,
    #[serde(rename = "accessToken")]
    pub access_token: Credential,
}

impl Submission {
    /// Build a submission from fetched details.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Graph`] if the details carry no identifier.
    pub fn new(details: &ProfileDetails, credential: Credential) -> Result<Self, Error> {
        let user_id = details.user_id().cloned().ok_or_else(|| Error::Graph {
            operation: "profile request",
            status: None,
            error: crate::types::GraphError::message("response has no id"),
        })?;
        Ok(Self {
            user_id,
            access_token: credential,
        })
    }

    /// Key/value pairs in wire order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 2] {
        [
            (USER_ID_KEY, self.user_id.0.as_str()),
            (ACCESS_TOKEN_KEY, self.access_token.expose()),
        ]
    }
}

/// How the submission reaches the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Background POST; the client redirects after a 2xx.
    #[default]
    Async,
    /// Hidden form posted by a full page navigation; the backend redirects.
    Form,
}

impl std::str::FromStr for Transport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "async" => Ok(Self::Async),
            "form" => Ok(Self::Form),
            other => Err(Error::Config(format!(
                "unknown transport {other:?} (expected \"async\" or \"form\")"
            ))),
        }
    }
}

/// A synthesized form whose fields are hidden inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenForm {
    pub method: &'static str,
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl HiddenForm {
    #[must_use]
    pub fn from_submission(action: impl Into<String>, submission: &Submission) -> Self {
        Self {
            method: "POST",
            action: action.into(),
            fields: submission
                .fields()
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Render as an auto-submitting HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        use html_escape::encode_double_quoted_attribute as attr;

        let mut html = format!(
            "<form method=\"{}\" action=\"{}\">",
            self.method,
            attr(&self.action)
        );
        for (name, value) in &self.fields {
            html.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                attr(name),
                attr(value)
            ));
        }
        html.push_str("</form><script>document.forms[document.forms.length-1].submit();</script>");
        html
    }
}

/// Browser navigation requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Client-side redirect to a path on the app.
    Redirect(String),
    /// Full page load by submitting a form.
    FormPost(HiddenForm),
}

impl Navigation {
    /// Destination path or form action.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Redirect(path) => path,
            Self::FormPost(form) => &form.action,
        }
    }
}
