use super::*;

#[test]
fn blank_input_gives_stock_page_defaults() {
    let config = PlayerConfig::from_json("   ").unwrap();
    assert_eq!(config, PlayerConfig::default());
    assert_eq!(config.selectors.play_button, ".play-button");
    assert_eq!(config.icons.pause, "fas fa-pause");
    assert_eq!(config.endpoints.login, "/account/login");
    assert_eq!(config.modal_element_id, "addToPlaylistModal");
}

#[test]
fn partial_overrides_keep_remaining_defaults() {
    let raw = r#"{
        "base_url": "https://music.test/",
        "icons": { "pause": "bi bi-pause" },
        "authenticated": true
    }"#;
    let config = PlayerConfig::from_json(raw).unwrap();

    assert_eq!(config.origin(), "https://music.test");
    assert_eq!(config.icons.pause, "bi bi-pause");
    assert_eq!(config.icons.play, "fas fa-play");
    assert_eq!(config.endpoints, Endpoints::default());
    assert_eq!(config.authenticated, Some(true));
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = PlayerConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, PlayerError::Config(_)));
}

#[test]
fn empty_required_values_are_rejected() {
    let err = PlayerConfig::from_json(r#"{ "endpoints": { "stream": "" } }"#).unwrap_err();
    assert_eq!(
        err,
        PlayerError::Config("endpoints.stream must not be empty".to_string())
    );
}

#[test]
fn page_origin_does_not_replace_configured_base() {
    let config = PlayerConfig::from_json(r#"{ "base_url": "https://cdn.test" }"#)
        .unwrap()
        .with_base_url("https://page.test");
    assert_eq!(config.origin(), "https://cdn.test");

    let config = PlayerConfig::default().with_base_url("https://page.test");
    assert_eq!(config.origin(), "https://page.test");
}
