use std::sync::Arc;

use super::error::FlowError;
use super::traits::{Backend, Navigator, Provider, StatusSink};
use super::types::{Outcome, StatusEvent};
use crate::config::PortalConfig;
use crate::state::FlowState;
use crate::status::{self, Decision, LoginStatus, StatusResponse};
use crate::submit::{HiddenForm, Navigation, Submission, Transport};

/// Handle returned to the host page.
///
/// Holds no per-login state: every [`reconcile`](Self::reconcile) call is
/// independent, so two calls with the same credential submit twice.
pub struct LoginPortal<P, B, N, S> {
    config: Arc<PortalConfig>,
    provider: Arc<P>,
    backend: Arc<B>,
    navigator: Arc<N>,
    sink: Arc<S>,
}

// Manual Clone: avoid derive adding `P: Clone, B: Clone, ...` bounds.
impl<P, B, N, S> Clone for LoginPortal<P, B, N, S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            provider: self.provider.clone(),
            backend: self.backend.clone(),
            navigator: self.navigator.clone(),
            sink: self.sink.clone(),
        }
    }
}

/// Tracks the state of a single run.
struct Run {
    state: FlowState,
}

impl Run {
    fn start() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }

    /// Moves to `next` if the transition is allowed; otherwise keeps the
    /// current state.
    fn advance(&mut self, next: FlowState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid flow transition {} -> {next}",
            self.state
        );
        match self.state.advance(next) {
            Ok(state) => self.state = state,
            Err(e) => tracing::error!(error = %e, "Invalid flow transition ignored"),
        }
    }

    fn finish(self, outcome: Outcome) -> Outcome {
        debug_assert_eq!(self.state, outcome.state());
        outcome
    }
}

impl<P, B, N, S> LoginPortal<P, B, N, S>
where
    P: Provider,
    B: Backend,
    N: Navigator,
    S: StatusSink,
{
    #[must_use]
    pub fn new(config: PortalConfig, provider: P, backend: B, navigator: N, sink: S) -> Self {
        Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
            backend: Arc::new(backend),
            navigator: Arc::new(navigator),
            sink: Arc::new(sink),
        }
    }

    /// Build the handle and run the initial status check.
    pub async fn init(
        config: PortalConfig,
        provider: P,
        backend: B,
        navigator: N,
        sink: S,
    ) -> (Self, Result<Outcome, FlowError>) {
        let portal = Self::new(config, provider, backend, navigator, sink);
        tracing::debug!(
            app_id = %portal.config.app_id(),
            version = %portal.config.version(),
            "Login portal initialized"
        );
        let outcome = portal.check_login_state().await;
        (portal, outcome)
    }

    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Ask the provider for the current status and reconcile it.
    ///
    /// # Errors
    ///
    /// [`FlowError::ProviderUnavailable`] if the status query fails, otherwise
    /// whatever [`reconcile`](Self::reconcile) returns.
    pub async fn check_login_state(&self) -> Result<Outcome, FlowError> {
        let response = self
            .provider
            .login_status()
            .await
            .map_err(|e| self.report(FlowError::ProviderUnavailable(e.to_string())))?;
        self.reconcile(&response).await
    }

    /// Classify a status payload, then fetch, submit, and navigate.
    ///
    /// Blocked statuses are not errors: the sink gets one message and the
    /// call returns [`Outcome::Blocked`]. Fetch and submission failures are
    /// emitted to the sink once and returned.
    ///
    /// # Errors
    ///
    /// [`FlowError::FetchFailed`] or [`FlowError::SubmissionFailed`].
    pub async fn reconcile(&self, response: &StatusResponse) -> Result<Outcome, FlowError> {
        let mut run = Run::start();
        run.advance(FlowState::StatusChecked);

        let credential = match status::classify(response) {
            Decision::Fetch(credential) => credential,
            Decision::Blocked {
                message,
                missing_credential,
            } => {
                run.advance(FlowState::Blocked);
                let reason = if missing_credential {
                    FlowError::CredentialMissing
                } else {
                    FlowError::NotConnected(response.status)
                };
                tracing::warn!(status = ?response.status, reason = %reason, "Login blocked");
                let text = message.render(self.config.app_name(), self.config.provider_name());
                self.sink.emit(StatusEvent::Message { message, text });
                return Ok(run.finish(Outcome::Blocked { message, reason }));
            }
        };

        run.advance(FlowState::Fetching);
        let details = self
            .provider
            .fetch_profile(&credential, self.config.profile_fields())
            .await
            .map_err(|e| self.fail(&mut run, FlowError::FetchFailed(e.to_string())))?;

        let submission = Submission::new(&details, credential)
            .map_err(|e| self.fail(&mut run, FlowError::FetchFailed(e.to_string())))?;

        run.advance(FlowState::Submitted);
        let navigation = match self.config.transport() {
            Transport::Async => {
                self.backend
                    .submit(&submission)
                    .await
                    .map_err(|e| self.fail(&mut run, FlowError::SubmissionFailed(e.to_string())))?;
                Navigation::Redirect(self.config.home_path().to_string())
            }
            Transport::Form => {
                // Same endpoint the async transport posts to.
                let action = self
                    .config
                    .backend_url(self.config.login_path())
                    .map_err(|e| self.fail(&mut run, FlowError::SubmissionFailed(e.to_string())))?;
                Navigation::FormPost(HiddenForm::from_submission(action, &submission))
            }
        };

        run.advance(FlowState::Navigated);
        tracing::info!(
            user_id = %submission.user_id,
            destination = %navigation.target(),
            "Login submitted"
        );
        self.navigator.navigate(navigation.clone());
        Ok(run.finish(Outcome::Navigated(navigation)))
    }

    /// Log out of the provider (when connected) and the backend, then go home.
    ///
    /// # Errors
    ///
    /// [`FlowError::ProviderUnavailable`] if the status query fails,
    /// [`FlowError::LogoutFailed`] if either logout call fails.
    pub async fn logout(&self) -> Result<Navigation, FlowError> {
        let response = self
            .provider
            .login_status()
            .await
            .map_err(|e| self.report(FlowError::ProviderUnavailable(e.to_string())))?;

        match (response.status, response.credential()) {
            (LoginStatus::Connected, Some(credential)) => {
                self.provider
                    .logout(credential)
                    .await
                    .map_err(|e| self.report(FlowError::LogoutFailed(e.to_string())))?;
            }
            (status, _) => tracing::debug!(?status, "Not connected, skipping provider logout"),
        }

        self.backend
            .logout()
            .await
            .map_err(|e| self.report(FlowError::LogoutFailed(e.to_string())))?;

        let navigation = Navigation::Redirect(self.config.home_path().to_string());
        tracing::info!(destination = %navigation.target(), "Logout complete");
        self.navigator.navigate(navigation.clone());
        Ok(navigation)
    }

    /// Moves the run to the error's terminal state, then reports it.
    fn fail(&self, run: &mut Run, error: FlowError) -> FlowError {
        if let Some(state) = error.state() {
            run.advance(state);
        }
        self.report(error)
    }

    fn report(&self, error: FlowError) -> FlowError {
        tracing::error!(error = %error, "Login flow failed");
        let text = error.user_message(self.config.provider_name());
        self.sink.emit(StatusEvent::Failed {
            error: error.clone(),
            text,
        });
        error
    }
}
