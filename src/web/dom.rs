// DOM bindings: button discovery, card reads and click wiring.
use crate::api::{TrackCard, TrackId};
use crate::config::{PlayerConfig, Selectors};
use crate::diagnostics::{log_error, log_info};
use crate::player::{Command, LikeIcon, PlayButton};
use crate::web::runtime::{dispatch, toggle_like_on};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, HtmlElement};

const TRACK_ID_ATTRIBUTE: &str = "data-track-id";

pub(crate) struct DomPlayButton {
    element: Element,
    icon_selector: String,
}

impl PlayButton for DomPlayButton {
    fn track_id(&self) -> Option<String> {
        self.element.get_attribute(TRACK_ID_ATTRIBUTE)
    }

    fn set_icon_class(&self, class_name: &str) -> bool {
        match self.element.query_selector(&self.icon_selector) {
            Ok(Some(icon)) => {
                icon.set_class_name(class_name);
                true
            }
            _ => false,
        }
    }
}

pub(crate) struct DomLikeIcon(Element);

impl DomLikeIcon {
    pub(crate) fn inside(button: &Element, icon_selector: &str) -> Option<Self> {
        button.query_selector(icon_selector).ok().flatten().map(Self)
    }
}

impl LikeIcon for DomLikeIcon {
    fn has_class(&self, class_name: &str) -> bool {
        self.0.class_list().contains(class_name)
    }

    fn add_class(&self, class_name: &str) {
        let _ = self.0.class_list().add_1(class_name);
    }

    fn remove_class(&self, class_name: &str) {
        let _ = self.0.class_list().remove_1(class_name);
    }

    fn set_color(&self, color: &str) {
        let Some(html) = self.0.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        if color.is_empty() {
            let _ = style.remove_property("color");
        } else {
            let _ = style.set_property("color", color);
        }
    }
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        log_error("dom", &format!("invalid selector {selector:?}"));
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|idx| nodes.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn play_buttons(document: &Document, config: &PlayerConfig) -> Vec<DomPlayButton> {
    query_all(document, &config.selectors.play_button)
        .into_iter()
        .map(|element| DomPlayButton {
            element,
            icon_selector: config.selectors.icon.clone(),
        })
        .collect()
}

fn track_id_of(element: &Element) -> Option<TrackId> {
    TrackId::from_attribute(element.get_attribute(TRACK_ID_ATTRIBUTE))
}

fn text_of(card: &Element, selector: &str) -> Option<String> {
    card.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
}

/// Title and artist of the card enclosing `button`, if there is one.
fn enclosing_card(button: &Element, selectors: &Selectors) -> Option<TrackCard> {
    let card = button.closest(&selectors.track_card).ok().flatten()?;
    Some(TrackCard::new(
        text_of(&card, &selectors.track_title),
        text_of(&card, &selectors.track_artist),
    ))
}

fn on_click<F>(element: &Element, mut handler: F)
where
    F: FnMut(&Element) + 'static,
{
    let target = element.clone();
    let callback = Closure::wrap(Box::new(move |event: Event| {
        event.stop_propagation();
        handler(&target);
    }) as Box<dyn FnMut(Event)>);
    if element
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        .is_ok()
    {
        callback.forget();
    }
}

/// Attach click listeners to the buttons present right now. Buttons inserted
/// later (for instance inside the playlist modal) are left alone.
pub(crate) fn wire_buttons(document: &Document, config: &PlayerConfig) {
    let selectors = config.selectors.clone();

    let play = query_all(document, &selectors.play_button);
    for button in &play {
        let selectors = selectors.clone();
        on_click(button, move |el| {
            let Some(track) = track_id_of(el) else {
                log_error("dom", "play button without data-track-id");
                return;
            };
            // Only buttons inside a track card start playback.
            let Some(card) = enclosing_card(el, &selectors) else {
                log_info("dom", &format!("play button for track {track} is outside a track card"));
                return;
            };
            dispatch(Command::PlayTrack {
                track,
                card: Some(card),
            });
        });
    }

    let like = query_all(document, &selectors.like_button);
    for button in &like {
        on_click(button, move |el| {
            let track = track_id_of(el);
            toggle_like_on(track.as_ref(), el);
        });
    }

    let add = query_all(document, &selectors.add_to_playlist_button);
    for button in &add {
        on_click(button, move |el| match track_id_of(el) {
            Some(track) => dispatch(Command::AddToPlaylist(track)),
            None => log_error("dom", "add-to-playlist button without data-track-id"),
        });
    }

    log_info(
        "dom",
        &format!(
            "wired {} play, {} like and {} add-to-playlist buttons",
            play.len(),
            like.len(),
            add.len()
        ),
    );
}
