use super::*;

#[test]
fn stored_dark_wins_over_system() {
    assert_eq!(resolve(Some("dark"), false), Theme::Dark);
}

#[test]
fn stored_light_wins_over_system() {
    assert_eq!(resolve(Some("light"), true), Theme::Light);
}

#[test]
fn unknown_stored_value_is_light() {
    assert_eq!(resolve(Some("sepia"), true), Theme::Light);
}

#[test]
fn missing_value_follows_system() {
    assert_eq!(resolve(None, true), Theme::Dark);
    assert_eq!(resolve(None, false), Theme::Light);
}

#[test]
fn as_str_matches_storage_values() {
    assert_eq!(Theme::Light.as_str(), "light");
    assert_eq!(Theme::Dark.as_str(), "dark");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn read_preference_is_light_in_non_hydrate_tests() {
    assert_eq!(read_preference(), Theme::Light);
}

#[test]
fn toggle_flips_theme() {
    assert_eq!(toggle(Theme::Light), Theme::Dark);
    assert_eq!(toggle(Theme::Dark), Theme::Light);
}

#[test]
fn apply_is_noop_but_callable() {
    apply(Theme::Light);
    apply(Theme::Dark);
}
