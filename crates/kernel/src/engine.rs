use std::time::Duration;

use skirmish_common::{
    AiInfo, BuildingQuality, BuildingType, MapPoint, Nation, PlayerId, PlayerState,
};

use crate::client::ClientState;

/// World operations the cheats are allowed to perform.
///
/// Implemented by the simulation world. Queries for unknown players or
/// out-of-range points return neutral values (`None`, `Nothing`, `false`)
/// rather than panicking.
pub trait GameWorld {
    fn player_count(&self) -> usize;
    fn player_state(&self, player: PlayerId) -> Option<PlayerState>;
    fn player_nation(&self, player: PlayerId) -> Option<Nation>;
    /// Whether the player's current headquarters is a tent. `false` without one.
    fn hq_is_tent(&self, player: PlayerId) -> bool;

    /// Exactly one human player takes part in the session.
    fn is_single_player(&self) -> bool;

    fn owner(&self, pt: MapPoint) -> Option<PlayerId>;
    fn building_quality(&self, pt: MapPoint) -> BuildingQuality;
    /// The six hex neighbours of `pt`, wrapping around the map edges.
    fn neighbours(&self, pt: MapPoint) -> [MapPoint; 6];

    /// Remove whatever object occupies `pt`. Does nothing on an empty node.
    fn destroy_object(&mut self, pt: MapPoint);
    fn create_building(
        &mut self,
        kind: BuildingType,
        pt: MapPoint,
        owner: PlayerId,
        nation: Nation,
        is_tent: bool,
    );
    /// Destroy every building owned by `player`. Returns how many were removed.
    fn destroy_buildings_of(&mut self, player: PlayerId) -> usize;

    /// Tell the game interface that fog of war has to be recomputed.
    fn notify_map_visibility_changed(&mut self);
}

/// Client-side session operations the cheats are allowed to perform.
pub trait GameClient {
    fn state(&self) -> ClientState;
    fn is_replay_mode(&self) -> bool;
    /// Ask the host to change the length of one game frame.
    fn request_frame_length(&mut self, length: Duration);
    /// Hand the local player to the AI, or take it back.
    fn toggle_human_ai_player(&mut self, ai: AiInfo);
}
