//! Terminal input module
//!
//! Maps `crossterm` key events into game actions. Independent of any UI
//! framework; the game loop owns timing, this module only translates keys.

pub mod map;

pub use map::{handle_key_event, should_quit};
