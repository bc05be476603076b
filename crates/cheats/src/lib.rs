//! Cheats: the cheat-mode flag, the toggles it unlocks, and dispatch of
//! recognised cheat actions onto the game world and client.
//!
//! # Invariants
//! - Cheat mode can only be switched on in a single-player session.
//! - Every world-changing effect is a no-op while cheat mode is off.
//! - Each effect is a single delegation to [`skirmish_kernel::GameWorld`]
//!   or [`skirmish_kernel::GameClient`].

pub mod config;
pub mod session;
pub mod state;

pub use config::{CheatConfig, ConfigError};
pub use session::CheatSession;
pub use state::{Cheats, PlacementError, ResourceRevealMode};
