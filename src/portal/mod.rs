//! Login-status reconciliation for a host page.
//!
//! Replaces the SDK's global async-init hook and nested callbacks with an
//! explicit handle and one awaited pipeline per status check.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fblogin_portal::portal::{LoginPortal, StatusEvent};
//! use fblogin_portal::{Navigation, PortalConfig};
//!
//! // 1. Configure from environment
//! let config = PortalConfig::from_env()?;
//!
//! // 2. Wire the Graph provider and the backend client
//! let portal = fblogin_portal::portal::graph_portal(
//!     config,
//!     session_token,
//!     |nav: Navigation| host.go(nav),
//!     |event: StatusEvent| host.show_status(event.text()),
//! );
//!
//! // 3. Run the status check on page load and on every login-button callback
//! let outcome = portal.check_login_state().await;
//! ```

mod error;
mod reconciler;
mod traits;
mod types;

pub use error::FlowError;
pub use reconciler::LoginPortal;
pub use traits::{Backend, Navigator, Provider, StatusSink};
pub use types::{Outcome, StatusEvent};

#[cfg(feature = "http")]
use crate::backend::PortalClient;
#[cfg(feature = "http")]
use crate::graph::GraphClient;

/// A portal backed by the Graph API and the HTTP backend client.
///
/// Both clients share one connection pool.
#[cfg(feature = "http")]
#[must_use]
pub fn graph_portal<N, S>(
    config: crate::config::PortalConfig,
    session_token: Option<crate::types::Credential>,
    navigator: N,
    sink: S,
) -> LoginPortal<GraphClient, PortalClient, N, S>
where
    N: Navigator,
    S: StatusSink,
{
    let http = reqwest::Client::new();
    let provider = GraphClient::new(config.clone())
        .with_http_client(http.clone())
        .with_session_token(session_token);
    let backend = PortalClient::new(config.clone()).with_http_client(http);
    LoginPortal::new(config, provider, backend, navigator, sink)
}
