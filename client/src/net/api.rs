//! REST helpers for talking to the SSR host.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are
//! only meaningful in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::ClientConfig;

/// Path of the runtime client config endpoint.
pub const CONFIG_ENDPOINT: &str = "/api/config";

#[cfg(any(test, feature = "hydrate"))]
fn config_request_failed_message(status: u16) -> String {
    format!("config request failed: {status}")
}

/// Build the hosted sign-in page URL for `view` (`login` or `signup`),
/// carrying the pending `redirect` target when present.
#[must_use]
pub fn hosted_auth_url(config: &ClientConfig, view: &str, redirect: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("client_id", &config.project_id);
    if let Some(redirect) = redirect.filter(|r| !r.is_empty()) {
        query.append_pair("redirect", redirect);
    }
    format!("{}/{view}?{}", config.auth_url, query.finish())
}

/// Fetch the runtime client config from `/api/config`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with
/// a non-OK status.
pub async fn fetch_client_config() -> Result<ClientConfig, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CONFIG_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(config_request_failed_message(resp.status()));
        }
        resp.json::<ClientConfig>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
