#![doc = include_str!("../README.md")]

#[cfg(feature = "http")]
pub mod backend;
pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod graph;
pub mod portal;
pub mod profile;
pub mod state;
pub mod status;
pub mod submit;
pub mod types;

// Re-exports for convenient access
#[cfg(feature = "http")]
pub use backend::PortalClient;
pub use config::PortalConfig;
pub use error::Error;
#[cfg(feature = "http")]
pub use graph::GraphClient;
pub use portal::{FlowError, LoginPortal, Outcome, StatusEvent};
pub use profile::{AgeRange, Location, ProfileDetails, ProfileField};
pub use state::FlowState;
pub use status::{AuthResponse, Decision, LoginStatus, StatusMessage, StatusResponse, classify};
pub use submit::{ACCESS_TOKEN_KEY, HiddenForm, Navigation, Submission, Transport, USER_ID_KEY};
pub use types::{ApiVersion, AppId, Credential, GraphError, ProviderUserId};
