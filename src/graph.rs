use crate::config::PortalConfig;
use crate::error::Error;
use crate::portal::Provider;
use crate::profile::{ProfileDetails, ProfileField};
use crate::status::StatusResponse;
use crate::types::{Credential, GraphError, GraphErrorEnvelope};

/// Facebook Graph API provider.
///
/// Login status is derived from a session token handed over by the host
/// (from the provider's redirect or cookie). Without one the status is
/// always [`Unknown`](crate::LoginStatus::Unknown).
pub struct GraphClient {
    config: PortalConfig,
    http: reqwest::Client,
    session_token: Option<Credential>,
}

impl GraphClient {
    #[must_use]
    pub fn new(config: PortalConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session_token: None,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn with_session_token(mut self, token: Option<Credential>) -> Self {
        self.session_token = token;
        self
    }

    /// Query the Graph API for the current status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Graph`] on a
    /// non-2xx response without a Graph error payload.
    pub async fn get_login_status(&self) -> Result<StatusResponse, Error> {
        let Some(token) = &self.session_token else {
            return Ok(StatusResponse::unknown());
        };

        let url = self.config.graph_endpoint("me/permissions")?;
        let response = self
            .http
            .get(url)
            .query(&[("access_token", token.expose())])
            .send()
            .await?;

        match Self::read_body(response, "login status").await {
            Ok(_) => Ok(StatusResponse::connected(token.clone())),
            Err(Error::Graph { error, .. }) if error.is_app_not_authorized() => {
                Ok(StatusResponse::not_authorized())
            }
            Err(Error::Graph {
                error,
                status: Some(status),
                ..
            }) if error.code.is_some() => {
                tracing::debug!(status, error = %error, "Session token rejected");
                Ok(StatusResponse::unknown())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch profile fields from `/me`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, [`Error::Graph`] if the
    /// response is a Graph error payload, or [`Error::Json`] if the body is
    /// not a profile object.
    pub async fn get_profile(
        &self,
        credential: &Credential,
        fields: &[ProfileField],
    ) -> Result<ProfileDetails, Error> {
        let url = self.config.graph_endpoint("me")?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("fields", ProfileField::join(fields).as_str()),
                ("access_token", credential.expose()),
            ])
            .send()
            .await?;

        let body = Self::read_body(response, "profile request").await?;
        serde_json::from_str(&body).map_err(Into::into)
    }

    /// End the provider session via the logout endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Graph`] on a
    /// non-2xx response.
    pub async fn end_session(&self, credential: &Credential) -> Result<(), Error> {
        let next = self.config.backend_url(self.config.home_path())?;
        let response = self
            .http
            .get(self.config.logout_url().clone())
            .query(&[("next", next.as_str()), ("access_token", credential.expose())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Error::Graph {
            operation: "provider logout",
            status: Some(status.as_u16()),
            error: GraphError::message(format!("logout endpoint returned {status}")),
        })
    }

    /// Returns the body on success. A Graph error payload is an error even
    /// with a 2xx status.
    async fn read_body(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<String, Error> {
        let status = response.status();
        let body = response.text().await?;

        if let Some(error) = GraphErrorEnvelope::detect(&body) {
            return Err(Error::Graph {
                operation,
                status: Some(status.as_u16()),
                error,
            });
        }
        if !status.is_success() {
            return Err(Error::Graph {
                operation,
                status: Some(status.as_u16()),
                error: GraphError::message(body),
            });
        }
        Ok(body)
    }
}

impl Provider for GraphClient {
    async fn login_status(&self) -> Result<StatusResponse, Error> {
        self.get_login_status().await
    }

    async fn fetch_profile(
        &self,
        credential: &Credential,
        fields: &[ProfileField],
    ) -> Result<ProfileDetails, Error> {
        self.get_profile(credential, fields).await
    }

    async fn logout(&self, credential: &Credential) -> Result<(), Error> {
        self.end_session(credential).await
    }
}
