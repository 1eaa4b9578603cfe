// Browser runtime: owns the audio handle and carries out reducer effects.
use crate::api::{TrackId, TrackServiceClient};
use crate::config::PlayerConfig;
use crate::diagnostics::{log_error, log_info};
use crate::error::PlayerError;
use crate::player::{
    toggle_like, update_play_buttons, Command, Effect, LikeState, NavigationTarget, PlaybackTicket,
    PlayerState,
};
use crate::web::dom::{play_buttons, DomLikeIcon};
use crate::web::modal::show_playlist_modal;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Element, Event, HtmlAudioElement, HtmlMediaElement};

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<Controller>>> = const { RefCell::new(None) };
}

type Listener = Closure<dyn FnMut(Event)>;

/// The live audio element plus the listeners registered on it.
struct ActiveHandle {
    ticket: PlaybackTicket,
    audio: HtmlAudioElement,
    listeners: Vec<(&'static str, Listener)>,
}

impl Drop for ActiveHandle {
    fn drop(&mut self) {
        for (event, listener) in &self.listeners {
            let _ = self
                .audio
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
    }
}

pub(crate) struct Controller {
    config: PlayerConfig,
    client: TrackServiceClient,
    state: RefCell<PlayerState>,
    handle: RefCell<Option<ActiveHandle>>,
}

/// Install the page-wide controller. Returns false if one already exists.
pub(crate) fn install(config: PlayerConfig) -> bool {
    CONTROLLER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        let authenticated = config.authenticated.unwrap_or(false);
        *slot = Some(Rc::new(Controller {
            client: TrackServiceClient::new(&config),
            config,
            state: RefCell::new(PlayerState::new(authenticated)),
            handle: RefCell::new(None),
        }));
        true
    })
}

pub(crate) fn controller() -> Option<Rc<Controller>> {
    CONTROLLER.with(|slot| slot.borrow().clone())
}

/// Feed a command to the controller and run its effects.
pub(crate) fn dispatch(command: Command) {
    match controller() {
        Some(controller) => controller.dispatch(command),
        None => log_error("player", "controller not initialised; ignoring command"),
    }
}

/// Commands raised while the state is borrowed run on the next tick.
fn defer_dispatch(command: Command) {
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(0).await;
        dispatch(command);
    });
}

/// Purely cosmetic, so it runs with the stock classes before initialisation too.
pub(crate) fn toggle_like_on(track: Option<&TrackId>, button: &Element) -> Option<LikeState> {
    match controller() {
        Some(controller) => toggle_like_with(controller.config(), track, button),
        None => toggle_like_with(&PlayerConfig::default(), track, button),
    }
}

fn toggle_like_with(
    config: &PlayerConfig,
    track: Option<&TrackId>,
    button: &Element,
) -> Option<LikeState> {
    let Some(icon) = DomLikeIcon::inside(button, &config.selectors.icon) else {
        log_error("like", "like button has no icon");
        return None;
    };
    let state = toggle_like(&icon, &config.icons);
    if let Some(track) = track {
        log_info("like", &format!("track {track}: {state:?}"));
    }
    Some(state)
}

fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn media_failure(event: &Event) -> PlayerError {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlMediaElement>().ok())
        .and_then(|media| media.error())
        .map(|error| PlayerError::from_media_code(error.code()))
        .unwrap_or_else(|| PlayerError::playback("media element reported an error"))
}

impl Controller {
    pub(crate) fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.state
            .try_borrow()
            .map(|state| state.is_playing())
            .unwrap_or(false)
    }

    pub(crate) fn dispatch(&self, command: Command) {
        let effects = match self.state.try_borrow_mut() {
            Ok(mut state) => state.apply(command),
            Err(_) => {
                defer_dispatch(command);
                return;
            }
        };
        for effect in effects {
            self.execute(effect);
        }
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::PauseCurrent => {
                if let Some(handle) = self.handle.borrow().as_ref() {
                    if let Err(err) = handle.audio.pause() {
                        log_error("player", &format!("pause failed: {}", describe_js_error(&err)));
                    }
                }
            }
            Effect::LoadSource { track, ticket } => self.load_source(&track, ticket),
            Effect::StartPlayback(ticket) => self.start_playback(ticket),
            Effect::ResumeCurrent => self.resume_current(),
            Effect::SetPlayIcons { track, playing } => self.set_play_icons(&track, playing),
            Effect::RecordPlay(track) => {
                let client = self.client.clone();
                spawn_local(async move {
                    if let Err(err) = client.record_play(&track).await {
                        log_error("record", &format!("failed to record play of {track}: {err}"));
                    }
                });
            }
            Effect::ShowPlaylistModal(track) => {
                let client = self.client.clone();
                let modal_id = self.config.modal_element_id.clone();
                spawn_local(async move {
                    if let Err(err) = show_playlist_modal(&client, &modal_id, &track).await {
                        log_error("modal", &format!("failed to load modal: {err}"));
                    }
                });
            }
            Effect::Navigate(NavigationTarget::Login) => {
                let url = self.client.login_url();
                if let Some(window) = window() {
                    if let Err(err) = window.location().set_href(&url) {
                        log_error("nav", &format!("redirect failed: {}", describe_js_error(&err)));
                    }
                }
            }
            Effect::DropHandle => {
                // Dropping removes the listeners from the old element.
                let released = self.handle.borrow_mut().take();
                drop(released);
            }
        }
    }

    fn load_source(&self, track: &TrackId, ticket: PlaybackTicket) {
        let url = self.client.stream_url(track);
        let audio = match HtmlAudioElement::new_with_src(&url) {
            Ok(audio) => audio,
            Err(err) => {
                self.dispatch(Command::PlaybackFailed {
                    ticket,
                    reason: describe_js_error(&err),
                });
                return;
            }
        };

        let mut listeners: Vec<(&'static str, Listener)> = Vec::with_capacity(3);
        listeners.push((
            "canplay",
            Closure::wrap(Box::new(move |_: Event| dispatch(Command::ReadyToPlay(ticket)))
                as Box<dyn FnMut(Event)>),
        ));
        listeners.push((
            "ended",
            Closure::wrap(Box::new(move |_: Event| dispatch(Command::PlaybackEnded(ticket)))
                as Box<dyn FnMut(Event)>),
        ));
        listeners.push((
            "error",
            Closure::wrap(Box::new(move |event: Event| {
                dispatch(Command::PlaybackFailed {
                    ticket,
                    reason: media_failure(&event).to_string(),
                })
            }) as Box<dyn FnMut(Event)>),
        ));
        for (event, listener) in &listeners {
            if let Err(err) =
                audio.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            {
                log_error(
                    "player",
                    &format!("could not listen for {event}: {}", describe_js_error(&err)),
                );
            }
        }

        log_info("player", &format!("loading track {track} (#{})", ticket.value()));
        // Replacing the slot drops the superseded handle and its listeners.
        let previous = self.handle.borrow_mut().replace(ActiveHandle {
            ticket,
            audio,
            listeners,
        });
        drop(previous);
    }

    fn current_audio(&self, ticket: Option<PlaybackTicket>) -> Option<HtmlAudioElement> {
        let handle = self.handle.borrow();
        let handle = handle.as_ref()?;
        match ticket {
            Some(ticket) if handle.ticket != ticket => None,
            _ => Some(handle.audio.clone()),
        }
    }

    fn start_playback(&self, ticket: PlaybackTicket) {
        let Some(audio) = self.current_audio(Some(ticket)) else {
            return;
        };
        match audio.play() {
            Ok(promise) => spawn_local(async move {
                let command = match wasm_bindgen_futures::JsFuture::from(promise).await {
                    Ok(_) => Command::PlaybackStarted(ticket),
                    Err(err) => Command::PlaybackFailed {
                        ticket,
                        reason: describe_js_error(&err),
                    },
                };
                dispatch(command);
            }),
            Err(err) => self.dispatch(Command::PlaybackFailed {
                ticket,
                reason: describe_js_error(&err),
            }),
        }
    }

    fn resume_current(&self) {
        let Some(audio) = self.current_audio(None) else {
            return;
        };
        match audio.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    log_error("player", &format!("resume failed: {}", describe_js_error(&err)));
                }
            }),
            Err(err) => log_error("player", &format!("resume failed: {}", describe_js_error(&err))),
        }
    }

    fn set_play_icons(&self, track: &TrackId, playing: bool) {
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };
        let buttons = play_buttons(&document, &self.config);
        update_play_buttons(&buttons, track, playing, &self.config.icons);
    }
}
