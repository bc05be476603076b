//! World Kernel: the engine-facing seams the cheat layer delegates to.
//!
//! The real simulation (production, pathfinding, AI, networking) lives
//! outside this workspace. [`GameWorld`] and [`GameClient`] describe the
//! calls the cheats make; [`World`] and [`LocalClient`] are small in-memory
//! implementations that keep just enough state to observe those calls.
//!
//! # Invariants
//! - Every [`GameWorld`] mutation of [`World`] and every territory claim
//!   appends a [`WorldEvent`]. Fixture setters (`add_player`, `set_object`,
//!   `set_resource`, ...) do not.
//! - Node iteration order is row-major and deterministic.

pub mod client;
pub mod engine;
pub mod world;

pub use client::{ClientState, LocalClient};
pub use engine::{GameClient, GameWorld};
pub use world::{MapNode, NodeObject, Player, World, WorldEvent};
