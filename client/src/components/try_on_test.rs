use serde_json::json;

use super::*;

fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().unwrap()
}

// =============================================================
// Session ownership
// =============================================================

#[test]
fn signed_in_customer_owns_sessions() {
    let customer = record(json!({ "Id": 42, "email": "ada@example.com" }));
    assert_eq!(session_owner(true, Some(&customer)), Some(42));
}

#[test]
fn anonymous_visitor_records_nothing() {
    let customer = record(json!({ "Id": 42 }));
    assert_eq!(session_owner(false, Some(&customer)), None);
    assert_eq!(session_owner(true, None), None);
    assert_eq!(session_owner(true, Some(&record(json!({ "Name": "no id" })))), None);
}

#[test]
fn recording_needs_a_photo() {
    assert_eq!(recording_owner(Some(42), "https://img.example/me.png"), Some(42));
    assert_eq!(recording_owner(Some(42), ""), None);
    assert_eq!(recording_owner(None, "https://img.example/me.png"), None);
}

// =============================================================
// Display helpers
// =============================================================

#[test]
fn overlay_prefers_overlay_image() {
    let frame = record(json!({ "image": "shot.png", "overlay_image": "overlay.png" }));
    assert_eq!(frame_overlay(&frame), "overlay.png");
}

#[test]
fn overlay_falls_back_to_product_shot() {
    assert_eq!(frame_overlay(&record(json!({ "image": "shot.png", "overlay_image": "" }))), "shot.png");
    assert_eq!(frame_overlay(&record(json!({ "image": "shot.png" }))), "shot.png");
}

#[test]
fn add_to_cart_requires_sign_in() {
    assert_eq!(
        add_to_cart_notice(false, "Aviator"),
        (NoticeLevel::Warning, "Please sign in to add items to your cart".to_owned())
    );
}

#[test]
fn add_to_cart_names_the_frame() {
    assert_eq!(add_to_cart_notice(true, "Aviator"), (NoticeLevel::Success, "Aviator added to your cart!".to_owned()));
}
