//! Developer Tooling: read-only inspection of a cheat session.
//!
//! # Invariants
//! - Inspection never mutates the world, the client or the cheats.

mod inspector;

pub use inspector::{CheatInspector, PlayerSummary, RevealedDeposit, SessionSummary};
