use serde::{Deserialize, Serialize};
use skirmish_common::{
    BuildingQuality, BuildingType, MapPoint, Nation, PlayerId, PlayerState, Resource,
};

use crate::engine::GameWorld;

/// Radius of the territory a freshly founded headquarters claims.
pub const HQ_TERRITORY_RADIUS: u16 = 4;

/// An event record produced by every mutation to the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Territory around `center` changed hands.
    TerritoryClaimed {
        center: MapPoint,
        radius: u16,
        owner: PlayerId,
    },
    /// A building was placed on a node.
    BuildingCreated {
        pt: MapPoint,
        kind: BuildingType,
        owner: PlayerId,
    },
    /// A building was removed. Carries what it was for inspection.
    BuildingDestroyed {
        pt: MapPoint,
        kind: BuildingType,
        owner: PlayerId,
    },
    /// A non-building object (tree, sign, flag) was removed from a node.
    ObjectCleared { pt: MapPoint },
    /// The game interface was told to recompute visibility.
    MapVisibilityChanged,
}

/// What occupies a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeObject {
    #[default]
    Nothing,
    /// Trees, stones, decoration.
    Environment,
    Building {
        kind: BuildingType,
        owner: PlayerId,
        nation: Nation,
        is_tent: bool,
    },
}

/// Per-node data stored in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapNode {
    pub owner: Option<PlayerId>,
    pub bq: BuildingQuality,
    pub resource: Resource,
    pub object: NodeObject,
}

/// A player slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub nation: Nation,
    pub state: PlayerState,
    hq: Option<MapPoint>,
}

impl Player {
    /// Position of the player's headquarters, if it still stands.
    pub fn hq(&self) -> Option<MapPoint> {
        self.hq
    }
}

/// A wrapping hex-grid world holding the state the cheats touch.
///
/// Nodes are stored row-major, so iteration is deterministic. Rows with an
/// odd `y` are shifted half a node to the east, which decides which nodes
/// count as neighbours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    width: u16,
    height: u16,
    nodes: Vec<MapNode>,
    players: Vec<Player>,
    /// Append-only event log of all mutations.
    #[serde(skip)]
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world where every node allows castles.
    pub fn new(width: u16, height: u16) -> Self {
        let node = MapNode {
            bq: BuildingQuality::Castle,
            ..MapNode::default()
        };
        Self {
            width,
            height,
            nodes: vec![node; usize::from(width) * usize::from(height)],
            players: Vec::new(),
            event_log: Vec::new(),
        }
    }

    /// Add a player slot and return its id. `None` once every id is taken.
    pub fn add_player(&mut self, nation: Nation, state: PlayerState) -> Option<PlayerId> {
        let id = PlayerId(u8::try_from(self.players.len()).ok()?);
        self.players.push(Player {
            id,
            nation,
            state,
            hq: None,
        });
        Some(id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Change who controls a player slot. Returns false for unknown players.
    pub fn set_player_state(&mut self, id: PlayerId, state: PlayerState) -> bool {
        match self.players.get_mut(id.index()) {
            Some(p) => {
                p.state = state;
                true
            }
            None => false,
        }
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    pub fn node(&self, pt: MapPoint) -> Option<&MapNode> {
        self.index(pt).map(|i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, pt: MapPoint) -> Option<&mut MapNode> {
        self.index(pt).map(|i| &mut self.nodes[i])
    }

    pub fn set_object(&mut self, pt: MapPoint, object: NodeObject) {
        if let Some(node) = self.node_mut(pt) {
            node.object = object;
        }
    }

    pub fn set_resource(&mut self, pt: MapPoint, resource: Resource) {
        if let Some(node) = self.node_mut(pt) {
            node.resource = resource;
        }
    }

    pub fn set_building_quality(&mut self, pt: MapPoint, bq: BuildingQuality) {
        if let Some(node) = self.node_mut(pt) {
            node.bq = bq;
        }
    }

    /// Give every node within `radius` steps of `center` to `owner`.
    pub fn claim_territory(&mut self, center: MapPoint, radius: u16, owner: PlayerId) {
        let r = i32::from(radius);
        for dy in -r..=r {
            for dx in -r..=r {
                let pt = self.offset(center, dx, dy);
                if let Some(node) = self.node_mut(pt) {
                    node.owner = Some(owner);
                }
            }
        }
        self.event_log.push(WorldEvent::TerritoryClaimed {
            center,
            radius,
            owner,
        });
    }

    /// Place a player's starting headquarters and claim the land around it.
    pub fn found_headquarters(&mut self, player: PlayerId, pt: MapPoint) {
        let Some(nation) = self.player(player).map(|p| p.nation) else {
            tracing::warn!(%player, "cannot found headquarters for unknown player");
            return;
        };
        self.claim_territory(pt, HQ_TERRITORY_RADIUS, player);
        self.create_building(BuildingType::Headquarters, pt, player, nation, false);
    }

    /// Positions of all buildings owned by `player`, in row-major order.
    pub fn buildings_of(&self, player: PlayerId) -> Vec<MapPoint> {
        self.points()
            .filter(|pt| {
                matches!(
                    self.node(*pt).map(|n| n.object),
                    Some(NodeObject::Building { owner, .. }) if owner == player
                )
            })
            .collect()
    }

    pub fn building_count(&self, player: PlayerId) -> usize {
        self.buildings_of(player).len()
    }

    /// All map points, row by row.
    pub fn points(&self) -> impl Iterator<Item = MapPoint> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| MapPoint::new(x, y)))
    }

    fn index(&self, pt: MapPoint) -> Option<usize> {
        (pt.x < self.width && pt.y < self.height)
            .then(|| usize::from(pt.y) * usize::from(self.width) + usize::from(pt.x))
    }

    fn offset(&self, pt: MapPoint, dx: i32, dy: i32) -> MapPoint {
        let w = i32::from(self.width.max(1));
        let h = i32::from(self.height.max(1));
        MapPoint::new(
            (i32::from(pt.x) + dx).rem_euclid(w) as u16,
            (i32::from(pt.y) + dy).rem_euclid(h) as u16,
        )
    }
}

impl GameWorld for World {
    fn player_count(&self) -> usize {
        self.players.len()
    }

    fn player_state(&self, player: PlayerId) -> Option<PlayerState> {
        self.player(player).map(|p| p.state)
    }

    fn player_nation(&self, player: PlayerId) -> Option<Nation> {
        self.player(player).map(|p| p.nation)
    }

    fn hq_is_tent(&self, player: PlayerId) -> bool {
        let hq = self.player(player).and_then(Player::hq);
        matches!(
            hq.and_then(|pt| self.node(pt)).map(|n| n.object),
            Some(NodeObject::Building { is_tent: true, .. })
        )
    }

    fn is_single_player(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.state == PlayerState::Human)
            .count()
            == 1
    }

    fn owner(&self, pt: MapPoint) -> Option<PlayerId> {
        self.node(pt).and_then(|n| n.owner)
    }

    fn building_quality(&self, pt: MapPoint) -> BuildingQuality {
        self.node(pt).map(|n| n.bq).unwrap_or_default()
    }

    fn neighbours(&self, pt: MapPoint) -> [MapPoint; 6] {
        // Odd rows sit half a node further east than even rows.
        let shift = i32::from(pt.y % 2);
        [
            self.offset(pt, -1, 0),
            self.offset(pt, shift - 1, -1),
            self.offset(pt, shift, -1),
            self.offset(pt, 1, 0),
            self.offset(pt, shift, 1),
            self.offset(pt, shift - 1, 1),
        ]
    }

    fn destroy_object(&mut self, pt: MapPoint) {
        let Some(node) = self.node_mut(pt) else {
            return;
        };
        let old = std::mem::take(&mut node.object);
        match old {
            NodeObject::Nothing => {}
            NodeObject::Building { kind, owner, .. } => {
                if let Some(p) = self.players.get_mut(owner.index()) {
                    if p.hq == Some(pt) {
                        p.hq = None;
                    }
                }
                self.event_log.push(WorldEvent::BuildingDestroyed { pt, kind, owner });
            }
            _ => self.event_log.push(WorldEvent::ObjectCleared { pt }),
        }
    }

    fn create_building(
        &mut self,
        kind: BuildingType,
        pt: MapPoint,
        owner: PlayerId,
        nation: Nation,
        is_tent: bool,
    ) {
        let Some(node) = self.node_mut(pt) else {
            tracing::warn!(%pt, "building outside the map ignored");
            return;
        };
        node.object = NodeObject::Building {
            kind,
            owner,
            nation,
            is_tent,
        };
        if kind == BuildingType::Headquarters {
            if let Some(p) = self.players.get_mut(owner.index()) {
                p.hq.get_or_insert(pt);
            }
        }
        self.event_log.push(WorldEvent::BuildingCreated { pt, kind, owner });
    }

    fn destroy_buildings_of(&mut self, player: PlayerId) -> usize {
        let buildings = self.buildings_of(player);
        for pt in &buildings {
            self.destroy_object(*pt);
        }
        buildings.len()
    }

    fn notify_map_visibility_changed(&mut self) {
        self.event_log.push(WorldEvent::MapVisibilityChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_common::ResourceType;

    fn two_player_world() -> World {
        let mut w = World::new(32, 32);
        let p0 = w.add_player(Nation::Romans, PlayerState::Human).unwrap();
        let p1 = w.add_player(Nation::Vikings, PlayerState::Human).unwrap();
        w.found_headquarters(p0, MapPoint::new(6, 6));
        w.found_headquarters(p1, MapPoint::new(22, 22));
        w
    }

    #[test]
    fn new_world_is_empty_and_buildable() {
        let w = World::new(8, 4);
        assert_eq!(w.points().count(), 32);
        assert_eq!(w.player_count(), 0);
        assert_eq!(w.building_quality(MapPoint::new(3, 2)), BuildingQuality::Castle);
        assert_eq!(w.owner(MapPoint::new(3, 2)), None);
        assert!(w.events().is_empty());
    }

    #[test]
    fn out_of_range_queries_are_neutral() {
        let w = World::new(4, 4);
        let outside = MapPoint::new(10, 10);
        assert!(w.node(outside).is_none());
        assert_eq!(w.building_quality(outside), BuildingQuality::Nothing);
        assert_eq!(w.owner(outside), None);
    }

    #[test]
    fn founding_headquarters_claims_land() {
        let w = two_player_world();
        assert_eq!(w.building_count(PlayerId(0)), 1);
        assert_eq!(w.building_count(PlayerId(1)), 1);
        assert_eq!(w.owner(MapPoint::new(6, 6)), Some(PlayerId(0)));
        assert_eq!(w.owner(MapPoint::new(10, 2)), Some(PlayerId(0)));
        assert_eq!(w.owner(MapPoint::new(11, 6)), None);
        assert_eq!(w.player(PlayerId(1)).unwrap().hq(), Some(MapPoint::new(22, 22)));
    }

    #[test]
    fn territory_wraps_around_edges() {
        let mut w = World::new(16, 16);
        let p = w.add_player(Nation::Romans, PlayerState::Human).unwrap();
        w.claim_territory(MapPoint::new(0, 0), 1, p);
        assert_eq!(w.owner(MapPoint::new(15, 15)), Some(p));
        assert_eq!(w.owner(MapPoint::new(1, 15)), Some(p));
        assert_eq!(w.owner(MapPoint::new(2, 0)), None);
    }

    #[test]
    fn neighbours_depend_on_row_parity() {
        let w = World::new(16, 16);
        let even = w.neighbours(MapPoint::new(5, 4));
        assert_eq!(
            even,
            [
                MapPoint::new(4, 4),
                MapPoint::new(4, 3),
                MapPoint::new(5, 3),
                MapPoint::new(6, 4),
                MapPoint::new(5, 5),
                MapPoint::new(4, 5),
            ]
        );
        let odd = w.neighbours(MapPoint::new(5, 5));
        assert_eq!(
            odd,
            [
                MapPoint::new(4, 5),
                MapPoint::new(5, 4),
                MapPoint::new(6, 4),
                MapPoint::new(6, 5),
                MapPoint::new(6, 6),
                MapPoint::new(5, 6),
            ]
        );
    }

    #[test]
    fn neighbours_wrap() {
        let w = World::new(8, 8);
        let n = w.neighbours(MapPoint::new(0, 0));
        assert!(n.contains(&MapPoint::new(7, 0)));
        assert!(n.contains(&MapPoint::new(7, 7)));
        assert!(n.contains(&MapPoint::new(0, 7)));
    }

    #[test]
    fn single_player_counts_humans_only() {
        let mut w = World::new(8, 8);
        let p0 = w.add_player(Nation::Romans, PlayerState::Human).unwrap();
        assert!(w.is_single_player());
        let p1 = w.add_player(Nation::Japanese, PlayerState::Human).unwrap();
        assert!(!w.is_single_player());
        w.set_player_state(p1, PlayerState::Ai);
        assert!(w.is_single_player());
        w.set_player_state(p0, PlayerState::Locked);
        assert!(!w.is_single_player());
    }

    #[test]
    fn destroy_buildings_of_one_player() {
        let mut w = two_player_world();
        w.create_building(
            BuildingType::Woodcutter,
            MapPoint::new(8, 6),
            PlayerId(0),
            Nation::Romans,
            false,
        );
        w.drain_events();

        assert_eq!(w.destroy_buildings_of(PlayerId(0)), 2);
        assert_eq!(w.building_count(PlayerId(0)), 0);
        assert_eq!(w.building_count(PlayerId(1)), 1);
        assert_eq!(w.player(PlayerId(0)).unwrap().hq(), None);
        assert_eq!(w.events().len(), 2);
        // Land stays with the player
        assert_eq!(w.owner(MapPoint::new(6, 6)), Some(PlayerId(0)));
    }

    #[test]
    fn destroy_object_logs_kind_of_removal() {
        let mut w = World::new(8, 8);
        let pt = MapPoint::new(2, 2);
        w.destroy_object(pt);
        assert!(w.events().is_empty());

        w.set_object(pt, NodeObject::Environment);
        w.destroy_object(pt);
        assert_eq!(w.events(), &[WorldEvent::ObjectCleared { pt }]);
        assert_eq!(w.node(pt).unwrap().object, NodeObject::Nothing);
    }

    #[test]
    fn hq_tent_flag_is_read_from_the_building() {
        let mut w = World::new(16, 16);
        let p = w.add_player(Nation::Babylonians, PlayerState::Human).unwrap();
        assert!(!w.hq_is_tent(p));
        w.create_building(
            BuildingType::Headquarters,
            MapPoint::new(3, 3),
            p,
            Nation::Babylonians,
            true,
        );
        assert!(w.hq_is_tent(p));
    }

    #[test]
    fn player_ids_run_out_after_256_slots() {
        let mut w = World::new(4, 4);
        for i in 0..=255u8 {
            assert_eq!(w.add_player(Nation::Romans, PlayerState::Ai), Some(PlayerId(i)));
        }
        assert_eq!(w.add_player(Nation::Romans, PlayerState::Ai), None);
        assert_eq!(w.player_count(), 256);
    }

    #[test]
    fn setup_helpers_are_not_logged() {
        let mut w = World::new(8, 8);
        let pt = MapPoint::new(1, 1);
        let p = w.add_player(Nation::Romans, PlayerState::Human).unwrap();
        w.set_player_state(p, PlayerState::Ai);
        w.set_object(pt, NodeObject::Environment);
        w.set_resource(pt, Resource::new(ResourceType::Coal, 5));
        w.set_building_quality(pt, BuildingQuality::Hut);
        assert!(w.events().is_empty());
        assert_eq!(w.node(pt).unwrap().resource.kind, ResourceType::Coal);
    }

    #[test]
    fn visibility_notification_is_logged() {
        let mut w = World::new(4, 4);
        w.notify_map_visibility_changed();
        assert_eq!(w.drain_events(), vec![WorldEvent::MapVisibilityChanged]);
        assert!(w.events().is_empty());
    }
}
