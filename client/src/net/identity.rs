//! Identity-provider boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosted identity service decides whether the visitor is signed in. The
//! app never talks to it directly; it goes through [`IdentityProvider`] so the
//! session bootstrap can be driven by a test double.
//!
//! Client-side (hydrate): [`HostedIdentityProvider`] calls the hosted auth
//! API via `gloo-net`. Server-side (SSR): setup reports an error, which the
//! bootstrap treats like any other provider failure.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use super::types::{ClientConfig, Identity};

/// DOM id of the node the hosted sign-in widget mounts into.
pub const AUTH_MOUNT_ID: &str = "authentication";

/// Which hosted views the sign-in widget offers.
pub const AUTH_VIEW: &str = "both";

/// Errors reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The request never produced a response.
    #[error("identity request failed: {0}")]
    Request(String),

    /// The provider answered with an unexpected status.
    #[error("identity provider returned status {0}")]
    Status(u16),

    /// The identity payload could not be decoded.
    #[error("identity payload invalid: {0}")]
    Decode(String),

    /// No browser environment to talk to the provider from.
    #[error("identity provider unavailable outside the browser")]
    Unavailable,
}

/// Options handed to the provider's setup call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupOptions {
    pub client_id: String,
    pub target: String,
    pub view: String,
}

impl SetupOptions {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            client_id: config.project_id.clone(),
            target: format!("#{AUTH_MOUNT_ID}"),
            view: AUTH_VIEW.to_owned(),
        }
    }
}

/// External identity provider.
///
/// `setup` resolves exactly once per application load: `Ok(Some(_))` for a
/// signed-in visitor, `Ok(None)` for an anonymous one.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    /// Initialize the provider and report the visitor's identity.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when the provider cannot determine the
    /// visitor's status.
    async fn setup(&self, options: &SetupOptions) -> Result<Option<Identity>, IdentityError>;

    /// End the provider-side session.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the provider rejects the sign-out.
    async fn logout(&self) -> Result<(), IdentityError>;
}

#[cfg(any(test, feature = "hydrate"))]
fn session_endpoint(auth_url: &str, options: &SetupOptions) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &options.client_id)
        .append_pair("target", &options.target)
        .append_pair("view", &options.view)
        .finish();
    format!("{auth_url}/session?{query}")
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_endpoint(auth_url: &str) -> String {
    format!("{auth_url}/logout")
}

/// Map a session-endpoint status to "signed in", "anonymous" or an error.
#[cfg(any(test, feature = "hydrate"))]
fn classify_session_status(status: u16) -> Result<bool, IdentityError> {
    match status {
        200 => Ok(true),
        204 | 401 => Ok(false),
        other => Err(IdentityError::Status(other)),
    }
}

/// Identity carried by a signed-in session body. Falsy bodies such as
/// `null` mean the visitor is anonymous.
#[cfg(any(test, feature = "hydrate"))]
fn identity_from_body(body: serde_json::Value) -> Option<Identity> {
    crate::services::coerce::is_truthy(&body).then(|| Identity::new(body))
}

/// Identity provider backed by the hosted auth HTTP API.
#[derive(Clone, Debug)]
pub struct HostedIdentityProvider {
    config: ClientConfig,
}

impl HostedIdentityProvider {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for HostedIdentityProvider {
    async fn setup(&self, options: &SetupOptions) -> Result<Option<Identity>, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let url = session_endpoint(&self.config.auth_url, options);
            let resp = gloo_net::http::Request::get(&url)
                .header("X-Project-Id", &self.config.project_id)
                .header("X-Public-Key", &self.config.public_key)
                .credentials(web_sys::RequestCredentials::Include)
                .send()
                .await
                .map_err(|e| IdentityError::Request(e.to_string()))?;
            if !classify_session_status(resp.status())? {
                return Ok(None);
            }
            let body = resp
                .json::<serde_json::Value>()
                .await
                .map_err(|e| IdentityError::Decode(e.to_string()))?;
            Ok(identity_from_body(body))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.config, options);
            Err(IdentityError::Unavailable)
        }
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&logout_endpoint(&self.config.auth_url))
                .header("X-Project-Id", &self.config.project_id)
                .header("X-Public-Key", &self.config.public_key)
                .credentials(web_sys::RequestCredentials::Include)
                .send()
                .await
                .map_err(|e| IdentityError::Request(e.to_string()))?;
            if !resp.ok() {
                return Err(IdentityError::Status(resp.status()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(IdentityError::Unavailable)
        }
    }
}
