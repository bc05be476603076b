//! Cheat input: raw key events and chat lines classified into [`CheatAction`]s.
//!
//! # Invariants
//! - Trackers only classify; they never touch game state.
//! - The same action set is produced by keyboard chords and chat commands.

pub mod action;
pub mod config;
pub mod key;
pub mod tracker;

pub use action::CheatAction;
pub use config::{ChatCheat, TrackerConfig};
pub use key::{parse_key_script, KeyEvent, KeyParseError, KeyType};
pub use tracker::{CheatCommandTracker, CheatKeyTracker};
