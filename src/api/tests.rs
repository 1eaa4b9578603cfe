use super::*;
use crate::config::PlayerConfig;

fn client() -> TrackServiceClient {
    TrackServiceClient::new(&PlayerConfig::default().with_base_url("https://music.test/"))
}

#[test]
fn builds_stock_endpoints() {
    let client = client();
    let track = TrackId::new("42");

    assert_eq!(client.stream_url(&track), "https://music.test/tracks/stream/42");
    assert_eq!(client.record_url(&track), "https://music.test/tracks/record/42");
    assert_eq!(
        client.playlist_modal_url(&track),
        "https://music.test/playlists/add-to-playlist-modal?trackId=42"
    );
    assert_eq!(client.login_url(), "https://music.test/account/login");
}

#[test]
fn encodes_identifiers_in_paths_and_queries() {
    let client = client();
    let track = TrackId::new("a b/c");

    assert_eq!(
        client.stream_url(&track),
        "https://music.test/tracks/stream/a%20b%2Fc"
    );
    assert_eq!(
        client.playlist_modal_url(&track),
        "https://music.test/playlists/add-to-playlist-modal?trackId=a%20b%2Fc"
    );
}

#[test]
fn relative_urls_without_origin() {
    let client = TrackServiceClient::new(&PlayerConfig::default());
    assert_eq!(client.login_url(), "/account/login");
    assert_eq!(client.record_url(&TrackId::new("7")), "/tracks/record/7");
}

#[test]
fn track_ids_come_from_trimmed_attributes() {
    assert_eq!(
        TrackId::from_attribute(Some(" 42 ".to_string())),
        Some(TrackId::new("42"))
    );
    assert_eq!(TrackId::from_attribute(Some("  ".to_string())), None);
    assert_eq!(TrackId::from_attribute(None), None);
    assert!(TrackId::new("42").matches("42 "));
    assert!(!TrackId::new("42").matches("420"));
}

#[test]
fn card_labels_fall_back_to_the_id() {
    let track = TrackId::new("9");
    let full = TrackCard::new(Some(" Blue ".to_string()), Some("Joni".to_string()));
    assert_eq!(full.label(&track), "Blue - Joni");

    let blank = TrackCard::new(Some("".to_string()), None);
    assert_eq!(blank.title, None);
    assert_eq!(blank.label(&track), "track 9");
}
