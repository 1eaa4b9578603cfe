//! trackdeck: playback, like and add-to-playlist wiring for server-rendered
//! music streaming pages, compiled to WebAssembly.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod player;

#[cfg(target_arch = "wasm32")]
mod web;

pub use error::PlayerError;
