use super::*;

#[test]
fn header_hidden_on_auth_pages() {
    assert!(!header_visible("/login"));
    assert!(!header_visible("/signup"));
    assert!(!header_visible("/callback"));
    assert!(!header_visible("/error"));
}

#[test]
fn header_shown_elsewhere() {
    assert!(header_visible("/"));
    assert!(header_visible("/products/12"));
}

#[test]
fn theme_toggle_label_names_the_other_theme() {
    assert_eq!(theme_toggle_label(Theme::Light), "Switch to dark mode");
    assert_eq!(theme_toggle_label(Theme::Dark), "Switch to light mode");
}
