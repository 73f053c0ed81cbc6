use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 2] = [("OPTICALHUB_PROJECT_ID", "proj-1"), ("OPTICALHUB_PUBLIC_KEY", "pk-1")];

#[test]
fn defaults_apply_when_optional_keys_absent() {
    let cfg = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.project_id, "proj-1");
    assert_eq!(cfg.public_key, "pk-1");
    assert_eq!(cfg.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
}

#[test]
fn overrides_are_parsed_and_trimmed() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("PORT", "8080"),
        ("OPTICALHUB_AUTH_URL", "https://auth.example.test/"),
        ("OPTICALHUB_API_URL", "https://api.example.test/v1//"),
    ]);
    let cfg = AppConfig::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.auth_url, "https://auth.example.test");
    assert_eq!(cfg.api_url, "https://api.example.test/v1");
}

#[test]
fn missing_project_id_is_an_error() {
    let err = AppConfig::from_lookup(lookup(&[("OPTICALHUB_PUBLIC_KEY", "pk-1")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("OPTICALHUB_PROJECT_ID"));
}

#[test]
fn blank_public_key_counts_as_missing() {
    let err = AppConfig::from_lookup(lookup(&[("OPTICALHUB_PROJECT_ID", "p"), ("OPTICALHUB_PUBLIC_KEY", "  ")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::Missing("OPTICALHUB_PUBLIC_KEY"));
}

#[test]
fn invalid_port_is_an_error() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("PORT", "eighty"));
    let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "eighty".into() });
    assert_eq!(err.to_string(), "invalid PORT: eighty");
}

#[test]
fn public_config_mirrors_hosted_settings() {
    let cfg = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
    let public = cfg.public_config();
    assert_eq!(public.project_id, "proj-1");
    assert_eq!(public.public_key, "pk-1");
    assert_eq!(public.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(public.api_url, DEFAULT_API_URL);
}
