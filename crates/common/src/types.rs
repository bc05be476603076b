use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a player slot in a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// A node on the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: u16,
    pub y: u16,
}

impl MapPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nation {
    Africans,
    Japanese,
    #[default]
    Romans,
    Vikings,
    Babylonians,
}

/// Building kinds the cheat layer needs to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    Headquarters,
    Storehouse,
    Woodcutter,
    Quarry,
    Sawmill,
    Barracks,
    Fortress,
    HarborBuilding,
}

/// What can be built on a node, ordered from least to most permissive.
///
/// Ordering follows the engine's enum order, so `Mine` and `Harbor` compare
/// above `Castle` even though they only allow special buildings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum BuildingQuality {
    #[default]
    Nothing,
    Flag,
    Hut,
    House,
    Castle,
    Mine,
    Harbor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceType {
    #[default]
    Nothing,
    Iron,
    Gold,
    Coal,
    Granite,
    Water,
    Fish,
}

impl ResourceType {
    /// Iron, gold, coal and granite: the resources found by geologists.
    pub fn is_ore(self) -> bool {
        matches!(self, Self::Iron | Self::Gold | Self::Coal | Self::Granite)
    }
}

/// A resource deposit under a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceType,
    pub amount: u8,
}

impl Resource {
    pub fn new(kind: ResourceType, amount: u8) -> Self {
        Self { kind, amount }
    }
}

/// Who controls a player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Free,
    Human,
    Locked,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiType {
    Dummy,
    #[default]
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiLevel {
    Easy,
    Medium,
    #[default]
    Hard,
}

/// AI flavour handed control of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiInfo {
    pub kind: AiType,
    pub level: AiLevel,
}
