// Icon bookkeeping for play and like buttons, independent of the DOM binding.
use crate::api::TrackId;
use crate::config::IconClasses;
use crate::diagnostics::log_error;

/// A rendered play button: exposes its track id and lets us swap its glyph.
pub trait PlayButton {
    fn track_id(&self) -> Option<String>;
    /// Replace the inner icon's class list. Returns false when the icon is missing.
    fn set_icon_class(&self, class_name: &str) -> bool;
}

/// The inner icon of a like button.
pub trait LikeIcon {
    fn has_class(&self, class_name: &str) -> bool;
    fn add_class(&self, class_name: &str);
    fn remove_class(&self, class_name: &str);
    fn set_color(&self, color: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    NotLiked,
}

pub fn play_glyph(icons: &IconClasses, playing: bool) -> &str {
    if playing {
        &icons.pause
    } else {
        &icons.play
    }
}

/// Swap the glyph on every button bound to `track`; returns how many changed.
pub fn update_play_buttons<B: PlayButton>(
    buttons: &[B],
    track: &TrackId,
    playing: bool,
    icons: &IconClasses,
) -> usize {
    let glyph = play_glyph(icons, playing);
    let mut updated = 0;
    for button in buttons {
        let Some(raw) = button.track_id() else {
            continue;
        };
        if !track.matches(&raw) {
            continue;
        }
        if button.set_icon_class(glyph) {
            updated += 1;
        } else {
            log_error("icons", &format!("play button for track {track} has no icon"));
        }
    }
    updated
}

/// Flip a like icon between outline and filled. Purely visual.
pub fn toggle_like<I: LikeIcon>(icon: &I, icons: &IconClasses) -> LikeState {
    if icon.has_class(&icons.not_liked) {
        icon.remove_class(&icons.not_liked);
        icon.add_class(&icons.liked);
        icon.set_color(&icons.accent_color);
        LikeState::Liked
    } else {
        icon.remove_class(&icons.liked);
        icon.add_class(&icons.not_liked);
        icon.set_color("");
        LikeState::NotLiked
    }
}
