use url::Url;

use crate::error::Error;
use crate::profile::ProfileField;
use crate::submit::Transport;
use crate::types::{ApiVersion, AppId};

const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";
const DEFAULT_LOGOUT_URL: &str = "https://www.facebook.com/logout.php";

/// Login portal configuration.
///
/// Required fields are constructor parameters; everything else has a default
/// that can be overridden by chaining `with_*` calls.
///
/// ```rust,ignore
/// use fblogin_portal::PortalConfig;
///
/// let app_id = "141368599534524".parse()?;
/// let config = PortalConfig::new(app_id, "https://opinionated.example".parse()?)
///     .with_transport(Transport::Form)
///     .with_app_name("Make Less Mush");
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct PortalConfig {
    pub(crate) app_id: AppId,
    pub(crate) version: ApiVersion,
    pub(crate) graph_url: Url,
    pub(crate) logout_url: Url,
    pub(crate) base_url: Url,
    pub(crate) login_path: String,
    pub(crate) logout_path: String,
    pub(crate) home_path: String,
    pub(crate) transport: Transport,
    pub(crate) profile_fields: Vec<ProfileField>,
    pub(crate) app_name: String,
    pub(crate) provider_name: String,
}

#[allow(clippy::expect_used)]
fn default_url(s: &'static str) -> Url {
    s.parse().expect("valid default URL")
}

impl PortalConfig {
    /// Config for `app_id` whose backend lives at `base_url`, with defaults elsewhere.
    #[must_use]
    pub fn new(app_id: AppId, base_url: Url) -> Self {
        Self {
            app_id,
            base_url,
            version: ApiVersion::default(),
            graph_url: default_url(DEFAULT_GRAPH_URL),
            logout_url: default_url(DEFAULT_LOGOUT_URL),
            login_path: "/facebook-login-portal".into(),
            logout_path: "/logout".into(),
            home_path: "/home".into(),
            transport: Transport::Async,
            profile_fields: vec![ProfileField::Id],
            app_name: "Opinionated".into(),
            provider_name: "Facebook".into(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `FB_APP_ID`: Facebook application id (digits)
    /// - `PORTAL_BASE_URL`: origin of the application backend
    ///
    /// # Optional env vars
    /// - `FB_API_VERSION`: Graph version, e.g. `v2.2`
    /// - `FB_GRAPH_URL`: Override the Graph API origin
    /// - `FB_LOGOUT_URL`: Override the provider logout endpoint
    /// - `FB_PROFILE_FIELDS`: Comma-separated profile fields to request
    /// - `PORTAL_LOGIN_PATH`, `PORTAL_LOGOUT_PATH`, `PORTAL_HOME_PATH`
    /// - `PORTAL_TRANSPORT`: `async` or `form`
    /// - `PORTAL_APP_NAME`: Name shown in "Please log into ..." messages
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required env vars are missing or a value is invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required values are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let app_id: AppId = lookup("FB_APP_ID")
            .ok_or_else(|| Error::Config("FB_APP_ID is required".into()))?
            .parse()
            .map_err(|e| Error::Config(format!("FB_APP_ID: {e}")))?;
        let base_url: Url = lookup("PORTAL_BASE_URL")
            .ok_or_else(|| Error::Config("PORTAL_BASE_URL is required".into()))?
            .parse()
            .map_err(|e| Error::Config(format!("PORTAL_BASE_URL: {e}")))?;

        let mut config = Self::new(app_id, base_url);

        if let Some(v) = lookup("FB_API_VERSION") {
            let version = v
                .parse()
                .map_err(|e| Error::Config(format!("FB_API_VERSION: {e}")))?;
            config = config.with_version(version);
        }
        if let Some(v) = lookup("FB_GRAPH_URL") {
            let url = v
                .parse()
                .map_err(|e| Error::Config(format!("FB_GRAPH_URL: {e}")))?;
            config = config.with_graph_url(url);
        }
        if let Some(v) = lookup("FB_LOGOUT_URL") {
            let url = v
                .parse()
                .map_err(|e| Error::Config(format!("FB_LOGOUT_URL: {e}")))?;
            config = config.with_logout_url(url);
        }
        if let Some(v) = lookup("FB_PROFILE_FIELDS") {
            let fields = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .collect::<Result<Vec<ProfileField>, _>>()
                .map_err(|e| Error::Config(format!("FB_PROFILE_FIELDS: {e}")))?;
            config = config.with_profile_fields(fields);
        }
        if let Some(v) = lookup("PORTAL_LOGIN_PATH") {
            config = config.with_login_path(v);
        }
        if let Some(v) = lookup("PORTAL_LOGOUT_PATH") {
            config = config.with_logout_path(v);
        }
        if let Some(v) = lookup("PORTAL_HOME_PATH") {
            config = config.with_home_path(v);
        }
        if let Some(v) = lookup("PORTAL_TRANSPORT") {
            config = config.with_transport(v.parse()?);
        }
        if let Some(v) = lookup("PORTAL_APP_NAME") {
            config = config.with_app_name(v);
        }

        Ok(config)
    }

    /// Override the Graph API version (default: `v2.2`).
    #[must_use]
    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Override the Graph API origin (default: `https://graph.facebook.com`).
    #[must_use]
    pub fn with_graph_url(mut self, url: Url) -> Self {
        self.graph_url = url;
        self
    }

    /// Override the provider logout endpoint.
    #[must_use]
    pub fn with_logout_url(mut self, url: Url) -> Self {
        self.logout_url = url;
        self
    }

    /// Override the backend login path (default: `/facebook-login-portal`).
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Override the backend logout path (default: `/logout`).
    #[must_use]
    pub fn with_logout_path(mut self, path: impl Into<String>) -> Self {
        self.logout_path = path.into();
        self
    }

    /// Override the path navigated to after login or logout (default: `/home`).
    #[must_use]
    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    /// Choose how the submission reaches the backend (default: [`Transport::Async`]).
    #[must_use]
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Override the requested profile fields (default: `[Id]`).
    ///
    /// `Id` is always requested, since a submission cannot be built without it.
    #[must_use]
    pub fn with_profile_fields(mut self, mut fields: Vec<ProfileField>) -> Self {
        if !fields.contains(&ProfileField::Id) {
            fields.insert(0, ProfileField::Id);
        }
        self.profile_fields = fields;
        self
    }

    /// Override the app name used in status messages (default: `Opinionated`).
    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Override the provider name used in status messages (default: `Facebook`).
    #[must_use]
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Provider application id.
    #[must_use]
    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Graph API version.
    #[must_use]
    pub fn version(&self) -> &ApiVersion {
        &self.version
    }

    /// Graph API origin.
    #[must_use]
    pub fn graph_url(&self) -> &Url {
        &self.graph_url
    }

    /// Provider logout endpoint.
    #[must_use]
    pub fn logout_url(&self) -> &Url {
        &self.logout_url
    }

    /// Origin of the application backend.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Backend path that receives the submission.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Backend logout path.
    #[must_use]
    pub fn logout_path(&self) -> &str {
        &self.logout_path
    }

    /// Path navigated to after login or logout.
    #[must_use]
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// How the submission reaches the backend.
    #[must_use]
    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Profile fields requested from the provider; always includes `Id`.
    #[must_use]
    pub fn profile_fields(&self) -> &[ProfileField] {
        &self.profile_fields
    }

    /// App name used in status messages.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Provider name used in status messages.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Absolute URL of a backend path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `path` cannot be joined onto the base URL.
    pub fn backend_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("backend path {path:?}: {e}")))
    }

    /// Graph endpoint under the configured version, e.g. `/v2.2/me`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the Graph URL cannot be a base.
    pub fn graph_endpoint(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.graph_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("graph URL cannot be a base: {}", self.graph_url)))?
            .pop_if_empty()
            .push(self.version.as_str())
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn test_config() -> PortalConfig {
        PortalConfig::new(
            "141368599534524".parse().unwrap(),
            "https://opinionated.example".parse().unwrap(),
        )
    }

    #[test]
    fn defaults() {
        let config = test_config();
        assert_eq!(config.version().as_str(), "v2.2");
        assert_eq!(config.login_path(), "/facebook-login-portal");
        assert_eq!(config.logout_path(), "/logout");
        assert_eq!(config.home_path(), "/home");
        assert_eq!(config.transport(), Transport::Async);
        assert_eq!(config.profile_fields(), &[ProfileField::Id]);
        assert_eq!(config.app_name(), "Opinionated");
        assert_eq!(config.provider_name(), "Facebook");
    }

    #[test]
    fn endpoints() {
        let config = test_config();
        assert_eq!(
            config.graph_endpoint("/me/permissions").unwrap().as_str(),
            "https://graph.facebook.com/v2.2/me/permissions"
        );
        assert_eq!(
            config.backend_url("/facebook-login-portal").unwrap().as_str(),
            "https://opinionated.example/facebook-login-portal"
        );
    }

    #[test]
    fn graph_endpoint_keeps_prefix() {
        let config = test_config().with_graph_url("http://127.0.0.1:9000/graph/".parse().unwrap());
        assert_eq!(
            config.graph_endpoint("me").unwrap().as_str(),
            "http://127.0.0.1:9000/graph/v2.2/me"
        );
    }

    #[test]
    fn profile_fields_always_include_id() {
        let config = test_config().with_profile_fields(vec![ProfileField::Email]);
        assert_eq!(config.profile_fields(), &[ProfileField::Id, ProfileField::Email]);
    }

    #[test]
    fn from_lookup_requires_app_id() {
        let err = PortalConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: FB_APP_ID is required");
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("FB_APP_ID", "141368599534524"),
            ("PORTAL_BASE_URL", "http://localhost:5000"),
            ("FB_API_VERSION", "v2.5"),
            ("FB_PROFILE_FIELDS", "id, first_name,last_name,email"),
            ("PORTAL_TRANSPORT", "form"),
            ("PORTAL_APP_NAME", "Make Less Mush"),
        ]);
        let config =
            PortalConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap();

        assert_eq!(config.version().as_str(), "v2.5");
        assert_eq!(config.transport(), Transport::Form);
        assert_eq!(config.app_name(), "Make Less Mush");
        assert_eq!(config.profile_fields().len(), 4);
    }

    #[test]
    fn from_lookup_rejects_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("FB_APP_ID", "141368599534524"),
            ("PORTAL_BASE_URL", "http://localhost:5000"),
            ("FB_PROFILE_FIELDS", "id,friends"),
        ]);
        let err = PortalConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("FB_PROFILE_FIELDS"));

        let err = PortalConfig::from_lookup(|k| match k {
            "FB_APP_ID" => Some("not-digits".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
