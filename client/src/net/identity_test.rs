use super::*;

fn config() -> ClientConfig {
    ClientConfig {
        project_id: "proj_42".to_owned(),
        public_key: "pk_test".to_owned(),
        auth_url: "https://auth.example.test".to_owned(),
        api_url: "https://api.example.test".to_owned(),
    }
}

#[test]
fn setup_options_use_project_id_as_client_id() {
    let options = SetupOptions::from_config(&config());
    assert_eq!(options.client_id, "proj_42");
    assert_eq!(options.target, "#authentication");
    assert_eq!(options.view, "both");
}

#[test]
fn session_endpoint_encodes_setup_options() {
    let options = SetupOptions::from_config(&config());
    assert_eq!(
        session_endpoint("https://auth.example.test", &options),
        "https://auth.example.test/session?client_id=proj_42&target=%23authentication&view=both"
    );
}

#[test]
fn logout_endpoint_appends_path() {
    assert_eq!(logout_endpoint("https://auth.example.test"), "https://auth.example.test/logout");
}

#[test]
fn classify_session_status_maps_signed_in_and_anonymous() {
    assert_eq!(classify_session_status(200), Ok(true));
    assert_eq!(classify_session_status(204), Ok(false));
    assert_eq!(classify_session_status(401), Ok(false));
}

#[test]
fn classify_session_status_rejects_other_codes() {
    assert_eq!(classify_session_status(500), Err(IdentityError::Status(500)));
    assert_eq!(classify_session_status(403), Err(IdentityError::Status(403)));
}

#[test]
fn null_session_body_is_anonymous() {
    assert_eq!(identity_from_body(serde_json::Value::Null), None);
    assert_eq!(identity_from_body(serde_json::json!(false)), None);
    assert_eq!(identity_from_body(serde_json::json!("")), None);
}

#[test]
fn user_session_body_is_signed_in() {
    let body = serde_json::json!({ "emailAddress": "ada@example.com" });
    let identity = identity_from_body(body.clone()).unwrap();
    assert_eq!(identity.raw(), &body);
}

#[test]
fn null_session_body_routes_like_signed_out() {
    use crate::state::session::SessionState;
    use crate::util::redirect::{NavigationIntent, ResolvedRoute};

    let mut state = SessionState::default();
    let outcome = Ok(identity_from_body(serde_json::Value::Null));
    let route = state.complete_setup(outcome, &NavigationIntent::new("/cart", None));
    assert_eq!(route, Some(ResolvedRoute::new("/login")));
    assert!(!state.is_authenticated());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn hosted_provider_is_unavailable_off_browser() {
    let provider = HostedIdentityProvider::new(config());
    let options = SetupOptions::from_config(&config());
    let outcome = futures::executor::block_on(provider.setup(&options));
    assert_eq!(outcome, Err(IdentityError::Unavailable));
    assert_eq!(futures::executor::block_on(provider.logout()), Err(IdentityError::Unavailable));
}

#[test]
fn identity_error_messages_are_readable() {
    assert_eq!(IdentityError::Status(502).to_string(), "identity provider returned status 502");
    assert_eq!(IdentityError::Request("offline".into()).to_string(), "identity request failed: offline");
}
