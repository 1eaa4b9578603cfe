//! Browser entry point and the functions page templates may call directly.

mod dom;
mod modal;
mod runtime;

use crate::api::TrackId;
use crate::config;
use crate::diagnostics::{log_error, log_info};
use crate::player::Command;
use runtime::{controller, dispatch, install, toggle_like_on};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Element};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(initialize);
        if let Err(err) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log_error("init", &format!("could not wait for DOMContentLoaded: {err:?}"));
        }
    } else {
        initialize();
    }
}

fn initialize() {
    let config = config::load_from_page();
    if !install(config) {
        log_info("init", "controller already initialised");
        return;
    }
    let Some(controller) = controller() else {
        return;
    };
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    dom::wire_buttons(&document, controller.config());
}

fn parse_track(raw: &str) -> Option<TrackId> {
    let track = TrackId::from_attribute(Some(raw.to_string()));
    if track.is_none() {
        log_error("api", "ignoring blank track id");
    }
    track
}

#[wasm_bindgen(js_name = playTrack)]
pub fn play_track(track_id: &str) {
    if let Some(track) = parse_track(track_id) {
        dispatch(Command::PlayTrack { track, card: None });
    }
}

#[wasm_bindgen(js_name = togglePlay)]
pub fn toggle_play() {
    dispatch(Command::TogglePlay);
}

#[wasm_bindgen(js_name = addToPlaylist)]
pub fn add_to_playlist(track_id: &str) {
    if let Some(track) = parse_track(track_id) {
        dispatch(Command::AddToPlaylist(track));
    }
}

/// Returns true when the icon ended up filled.
#[wasm_bindgen(js_name = toggleLike)]
pub fn toggle_like(track_id: &str, button: &Element) -> bool {
    let track = TrackId::from_attribute(Some(track_id.to_string()));
    matches!(
        toggle_like_on(track.as_ref(), button),
        Some(crate::player::LikeState::Liked)
    )
}

#[wasm_bindgen(js_name = setAuthenticated)]
pub fn set_authenticated(value: bool) {
    dispatch(Command::SetAuthenticated(value));
}

#[wasm_bindgen(js_name = isPlaying)]
pub fn is_playing() -> bool {
    controller().map(|c| c.is_playing()).unwrap_or(false)
}

/// Stop playback and forget the current track.
#[wasm_bindgen(js_name = resetPlayer)]
pub fn reset_player() {
    dispatch(Command::Reset);
}
