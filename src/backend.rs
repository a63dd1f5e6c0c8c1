use crate::config::PortalConfig;
use crate::error::Error;
use crate::portal::Backend;
use crate::submit::Submission;

/// HTTP client for the application's login portal endpoints.
pub struct PortalClient {
    config: PortalConfig,
    http: reqwest::Client,
}

impl PortalClient {
    #[must_use]
    pub fn new(config: PortalConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// POST the submission as a urlencoded form to the login path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Backend`] on a
    /// non-2xx response.
    pub async fn post_submission(&self, submission: &Submission) -> Result<(), Error> {
        let url = self.config.backend_url(self.config.login_path())?;
        let response = self
            .http
            .post(url)
            .form(&submission.fields())
            .send()
            .await?;

        Self::ensure_success(response, "login submission").await?;
        Ok(())
    }

    /// GET the logout path. Any completed response counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure.
    pub async fn get_logout(&self) -> Result<(), Error> {
        let url = self.config.backend_url(self.config.logout_path())?;
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            tracing::warn!(
                status = response.status().as_u16(),
                "Backend logout returned non-success"
            );
        }
        Ok(())
    }

    /// Checks HTTP response status; returns the response on success or an error with details.
    async fn ensure_success(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_default();
        Err(Error::Backend {
            operation,
            status,
            detail,
        })
    }
}

impl Backend for PortalClient {
    async fn submit(&self, submission: &Submission) -> Result<(), Error> {
        self.post_submission(submission).await
    }

    async fn logout(&self) -> Result<(), Error> {
        self.get_logout().await
    }
}
