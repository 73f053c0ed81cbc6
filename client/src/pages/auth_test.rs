use super::*;

#[test]
fn error_message_uses_query_value() {
    assert_eq!(error_message(Some("Token expired")), "Token expired");
}

#[test]
fn error_message_falls_back_when_blank() {
    assert_eq!(error_message(None), FALLBACK_ERROR);
    assert_eq!(error_message(Some("   ")), FALLBACK_ERROR);
}

#[test]
fn auth_copy_per_mode() {
    assert_eq!(auth_copy("signup").0, "Create your account");
    assert_eq!(auth_copy("login").1, "Continue to sign in");
}
