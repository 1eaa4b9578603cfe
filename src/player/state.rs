// Playback state machine: commands in, effects out. Owns no browser objects.
use crate::api::{TrackCard, TrackId};
use crate::diagnostics::{log_error, log_info};

/// Identifies one play request. Signals from older handles carry older tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaybackTicket(u64);

impl PlaybackTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    /// Source assigned, waiting for the media element to report it can play.
    Loading,
    Playing,
    Paused,
}

/// The track currently owning the playback handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub ticket: PlaybackTicket,
    pub track: TrackId,
    pub card: Option<TrackCard>,
    pub play_recorded: bool,
}

/// Everything that can happen to the player: user actions and media signals.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    PlayTrack {
        track: TrackId,
        card: Option<TrackCard>,
    },
    TogglePlay,
    AddToPlaylist(TrackId),
    SetAuthenticated(bool),
    Reset,
    ReadyToPlay(PlaybackTicket),
    PlaybackStarted(PlaybackTicket),
    PlaybackEnded(PlaybackTicket),
    PlaybackFailed {
        ticket: PlaybackTicket,
        reason: String,
    },
}

/// Side effects the runtime must carry out, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Pause the current handle. Emitted before any replacement is built.
    PauseCurrent,
    /// Build a new handle for `track` and point it at the stream endpoint.
    LoadSource {
        track: TrackId,
        ticket: PlaybackTicket,
    },
    /// Ask the handle for `ticket` to start; report back with started/failed.
    StartPlayback(PlaybackTicket),
    /// Resume the current handle without waiting for readiness.
    ResumeCurrent,
    SetPlayIcons {
        track: TrackId,
        playing: bool,
    },
    RecordPlay(TrackId),
    ShowPlaylistModal(TrackId),
    Navigate(NavigationTarget),
    /// Release the current handle and its listeners.
    DropHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    Login,
}

#[derive(Debug, Default)]
pub struct PlayerState {
    phase: PlaybackPhase,
    session: Option<Session>,
    authenticated: bool,
    next_ticket: u64,
}

impl PlayerState {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_track(&self) -> Option<&TrackId> {
        self.session.as_ref().map(|s| &s.track)
    }

    /// Whether a signal carrying `ticket` still refers to the live handle.
    pub fn is_current(&self, ticket: PlaybackTicket) -> bool {
        self.session
            .as_ref()
            .map(|s| s.ticket == ticket)
            .unwrap_or(false)
    }

    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::PlayTrack { track, card } => self.play_track(track, card),
            Command::TogglePlay => self.toggle_play(),
            Command::AddToPlaylist(track) => self.add_to_playlist(track),
            Command::SetAuthenticated(value) => {
                self.authenticated = value;
                Vec::new()
            }
            Command::Reset => self.reset(),
            Command::ReadyToPlay(ticket) => self.ready_to_play(ticket),
            Command::PlaybackStarted(ticket) => self.playback_started(ticket),
            Command::PlaybackEnded(ticket) => self.playback_ended(ticket),
            Command::PlaybackFailed { ticket, reason } => self.playback_failed(ticket, &reason),
        }
    }

    fn play_track(&mut self, track: TrackId, card: Option<TrackCard>) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if self.session.is_some() {
            effects.push(Effect::PauseCurrent);
        }

        self.next_ticket += 1;
        let ticket = PlaybackTicket(self.next_ticket);
        self.session = Some(Session {
            ticket,
            track: track.clone(),
            card,
            play_recorded: false,
        });
        self.phase = PlaybackPhase::Loading;
        effects.push(Effect::LoadSource { track, ticket });
        effects
    }

    fn toggle_play(&mut self) -> Vec<Effect> {
        let Some(track) = self.current_track().cloned() else {
            return Vec::new();
        };

        match self.phase {
            PlaybackPhase::Idle => Vec::new(),
            PlaybackPhase::Playing => {
                self.phase = PlaybackPhase::Paused;
                vec![
                    Effect::PauseCurrent,
                    Effect::SetPlayIcons {
                        track,
                        playing: false,
                    },
                ]
            }
            PlaybackPhase::Paused | PlaybackPhase::Loading => {
                self.phase = PlaybackPhase::Playing;
                // Until a start has been confirmed the resume must report back,
                // so the play still gets recorded.
                let resume = match self.session.as_ref() {
                    Some(session) if !session.play_recorded => {
                        Effect::StartPlayback(session.ticket)
                    }
                    _ => Effect::ResumeCurrent,
                };
                vec![
                    resume,
                    Effect::SetPlayIcons {
                        track,
                        playing: true,
                    },
                ]
            }
        }
    }

    fn add_to_playlist(&mut self, track: TrackId) -> Vec<Effect> {
        if !self.authenticated {
            return vec![Effect::Navigate(NavigationTarget::Login)];
        }
        vec![Effect::ShowPlaylistModal(track)]
    }

    fn reset(&mut self) -> Vec<Effect> {
        self.phase = PlaybackPhase::Idle;
        match self.session.take() {
            Some(_) => vec![Effect::PauseCurrent, Effect::DropHandle],
            None => Vec::new(),
        }
    }

    fn ready_to_play(&mut self, ticket: PlaybackTicket) -> Vec<Effect> {
        if !self.accept("ready", ticket) {
            return Vec::new();
        }
        let recorded = self.session.as_ref().map(|s| s.play_recorded).unwrap_or(true);
        match self.phase {
            PlaybackPhase::Loading => vec![Effect::StartPlayback(ticket)],
            // Resumed before the media was ready; still owes the start confirmation.
            PlaybackPhase::Playing if !recorded => vec![Effect::StartPlayback(ticket)],
            // Re-buffering fires readiness again; nothing to restart.
            _ => Vec::new(),
        }
    }

    fn playback_started(&mut self, ticket: PlaybackTicket) -> Vec<Effect> {
        if !self.accept("started", ticket) {
            return Vec::new();
        }
        // A pause that landed while the start was in flight wins.
        let paused_meanwhile = self.phase == PlaybackPhase::Paused;
        if !paused_meanwhile {
            self.phase = PlaybackPhase::Playing;
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        let mut effects = Vec::with_capacity(2);
        if !paused_meanwhile {
            effects.push(Effect::SetPlayIcons {
                track: session.track.clone(),
                playing: true,
            });
        }
        if !session.play_recorded {
            session.play_recorded = true;
            let label = session
                .card
                .as_ref()
                .map(|card| card.label(&session.track))
                .unwrap_or_else(|| format!("track {}", session.track));
            log_info("player", &format!("now playing {label}"));
            effects.push(Effect::RecordPlay(session.track.clone()));
        }
        effects
    }

    fn playback_ended(&mut self, ticket: PlaybackTicket) -> Vec<Effect> {
        if !self.accept("ended", ticket) {
            return Vec::new();
        }
        self.phase = PlaybackPhase::Paused;
        self.current_track()
            .cloned()
            .map(|track| {
                vec![Effect::SetPlayIcons {
                    track,
                    playing: false,
                }]
            })
            .unwrap_or_default()
    }

    fn playback_failed(&mut self, ticket: PlaybackTicket, reason: &str) -> Vec<Effect> {
        if !self.accept("failed", ticket) {
            return Vec::new();
        }
        log_error("player", &format!("playback failed: {reason}"));
        let was_playing = self.is_playing();
        self.phase = PlaybackPhase::Paused;
        // Failures before playback began never showed the pause glyph.
        match self.current_track() {
            Some(track) if was_playing => vec![Effect::SetPlayIcons {
                track: track.clone(),
                playing: false,
            }],
            _ => Vec::new(),
        }
    }

    fn accept(&self, signal: &str, ticket: PlaybackTicket) -> bool {
        if self.is_current(ticket) {
            return true;
        }
        log_info(
            "player",
            &format!("ignoring {signal} from superseded handle #{}", ticket.value()),
        );
        false
    }
}
