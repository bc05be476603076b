//! Shared value types used across the skirmish crates.
//!
//! # Invariants
//! - Types here are plain data; no crate in the workspace is depended on.

mod types;

pub use types::{
    AiInfo, AiLevel, AiType, BuildingQuality, BuildingType, MapPoint, Nation, PlayerId,
    PlayerState, Resource, ResourceType,
};
