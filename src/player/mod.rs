//! Playback and interaction controller.
//! `state` decides what happens, `icons` reflects it onto buttons; the browser
//! runtime in `crate::web` only executes the resulting effects.

mod icons;
mod state;

pub use icons::*;
pub use state::*;
