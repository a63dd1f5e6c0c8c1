use std::future::Future;

use super::types::StatusEvent;
use crate::error::Error;
use crate::profile::{ProfileDetails, ProfileField};
use crate::status::StatusResponse;
use crate::submit::{Navigation, Submission};
use crate::types::Credential;

/// The social-login provider.
///
/// [`GraphClient`](crate::graph::GraphClient) implements this over the Graph
/// API; hosts embedding a different SDK bridge can provide their own.
pub trait Provider: Send + Sync + 'static {
    /// Current login status, with a credential when connected.
    fn login_status(&self) -> impl Future<Output = Result<StatusResponse, Error>> + Send;

    /// Fetch the requested profile fields for the credential's user.
    ///
    /// An error payload from the provider must be returned as `Err`, never
    /// as an empty [`ProfileDetails`].
    fn fetch_profile(
        &self,
        credential: &Credential,
        fields: &[ProfileField],
    ) -> impl Future<Output = Result<ProfileDetails, Error>> + Send;

    /// End the provider session.
    fn logout(&self, credential: &Credential) -> impl Future<Output = Result<(), Error>> + Send;
}

/// The application backend receiving login submissions.
///
/// # Example
///
/// ```rust,ignore
/// impl Backend for MyBackend {
///     async fn submit(&self, submission: &Submission) -> Result<(), Error> {
///         self.post_form("/facebook-login-portal", &submission.fields()).await
///     }
///
///     async fn logout(&self) -> Result<(), Error> {
///         self.get("/logout").await
///     }
/// }
/// ```
pub trait Backend: Send + Sync + 'static {
    /// Deliver a submission. Any 2xx response is success; the body is ignored.
    fn submit(&self, submission: &Submission) -> impl Future<Output = Result<(), Error>> + Send;

    /// End the backend session.
    fn logout(&self) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Host-side browser navigation.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, navigation: Navigation);
}

impl<F> Navigator for F
where
    F: Fn(Navigation) + Send + Sync + 'static,
{
    fn navigate(&self, navigation: Navigation) {
        self(navigation);
    }
}

/// Host-side status display. Receives at most one event per run.
pub trait StatusSink: Send + Sync + 'static {
    fn emit(&self, event: StatusEvent);
}

impl<F> StatusSink for F
where
    F: Fn(StatusEvent) + Send + Sync + 'static,
{
    fn emit(&self, event: StatusEvent) {
        self(event);
    }
}
