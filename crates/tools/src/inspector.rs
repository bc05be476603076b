use std::fmt;
use std::time::Duration;

use serde::Serialize;
use skirmish_cheats::{Cheats, ResourceRevealMode};
use skirmish_common::{AiInfo, MapPoint, Nation, PlayerId, PlayerState, Resource};
use skirmish_kernel::{ClientState, GameClient, LocalClient, World};

/// Read-only queries over a cheat session for debugging and the CLI.
pub struct CheatInspector;

impl CheatInspector {
    pub fn summary(cheats: &Cheats, world: &World, client: &LocalClient) -> SessionSummary {
        SessionSummary {
            cheat_mode: cheats.is_cheat_mode_on(),
            all_visible: cheats.is_all_visible(),
            all_buildings_enabled: cheats.are_all_buildings_enabled(),
            resource_reveal_mode: cheats.resource_reveal_mode(),
            client_state: client.state(),
            frame_length: client.requested_frame_length().unwrap_or(client.frame_length()),
            ai_takeover: client.ai_takeover(),
            players: Self::players(world),
            revealed: Self::revealed_resources(cheats, world),
        }
    }

    /// Deposits the current resource reveal mode shows, in row-major order.
    pub fn revealed_resources(cheats: &Cheats, world: &World) -> Vec<RevealedDeposit> {
        world
            .points()
            .filter_map(|pt| {
                let resource = world.node(pt)?.resource;
                (resource.amount > 0 && cheats.reveals_resource(resource.kind))
                    .then_some(RevealedDeposit { pt, resource })
            })
            .collect()
    }

    pub fn players(world: &World) -> Vec<PlayerSummary> {
        world
            .players()
            .iter()
            .map(|p| PlayerSummary {
                id: p.id,
                nation: p.nation,
                state: p.state,
                buildings: world.building_count(p.id),
                has_hq: p.hq().is_some(),
            })
            .collect()
    }
}

/// Snapshot of a cheat session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub cheat_mode: bool,
    pub all_visible: bool,
    pub all_buildings_enabled: bool,
    pub resource_reveal_mode: ResourceRevealMode,
    pub client_state: ClientState,
    /// Pending frame length if one was requested, otherwise the current one.
    pub frame_length: Duration,
    pub ai_takeover: Option<AiInfo>,
    pub players: Vec<PlayerSummary>,
    pub revealed: Vec<RevealedDeposit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub nation: Nation,
    pub state: PlayerState,
    pub buildings: usize,
    pub has_hq: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedDeposit {
    pub pt: MapPoint,
    pub resource: Resource,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cheats: mode={} visible={} all_buildings={} resources={:?}",
            on_off(self.cheat_mode),
            on_off(self.all_visible),
            on_off(self.all_buildings_enabled),
            self.resource_reveal_mode
        )?;
        writeln!(
            f,
            "Client: state={:?} frame={}ms ai_takeover={}",
            self.client_state,
            self.frame_length.as_millis(),
            on_off(self.ai_takeover.is_some())
        )?;
        for p in &self.players {
            writeln!(f, "  {p}")?;
        }
        if !self.revealed.is_empty() {
            writeln!(f, "Revealed deposits: {}", self.revealed.len())?;
            for d in &self.revealed {
                writeln!(f, "  {} {:?} x{}", d.pt, d.resource.kind, d.resource.amount)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PlayerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{:?}, {:?}] buildings={} hq={}",
            self.id,
            self.nation,
            self.state,
            self.buildings,
            if self.has_hq { "yes" } else { "no" }
        )
    }
}

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_common::ResourceType;

    fn world() -> World {
        let mut w = World::new(32, 32);
        let p = w.add_player(Nation::Romans, PlayerState::Human).unwrap();
        w.found_headquarters(p, MapPoint::new(5, 5));
        w.add_player(Nation::Vikings, PlayerState::Ai).unwrap();
        w
    }

    #[test]
    fn summary_of_fresh_session() {
        let world = world();
        let summary = CheatInspector::summary(&Cheats::default(), &world, &LocalClient::new());
        assert!(!summary.cheat_mode);
        assert_eq!(summary.resource_reveal_mode, ResourceRevealMode::Nothing);
        assert_eq!(summary.frame_length, Duration::from_millis(50));
        assert_eq!(summary.players.len(), 2);
        assert_eq!(summary.players[0].buildings, 1);
        assert!(summary.players[0].has_hq);
        assert!(!summary.players[1].has_hq);
    }

    #[test]
    fn summary_shows_pending_frame_length() {
        let world = world();
        let mut cheats = Cheats::default();
        cheats.toggle_cheat_mode(&world);
        let mut client = LocalClient::in_game(PlayerId(0));
        cheats.set_game_speed(&mut client, 1);

        let summary = CheatInspector::summary(&cheats, &world, &client);
        assert!(summary.cheat_mode);
        assert_eq!(summary.frame_length, Duration::from_millis(25));
        assert_eq!(summary.client_state, ClientState::Game);
    }

    #[test]
    fn summary_display() {
        let world = world();
        let summary = CheatInspector::summary(&Cheats::default(), &world, &LocalClient::new());
        let s = format!("{summary}");
        assert!(s.contains("mode=off"));
        assert!(s.contains("frame=50ms"));
        assert!(s.contains("player 0 [Romans, Human] buildings=1 hq=yes"));
    }

    #[test]
    fn revealed_deposits_follow_reveal_mode() {
        let mut world = world();
        world.set_resource(MapPoint::new(1, 1), Resource::new(ResourceType::Gold, 4));
        world.set_resource(MapPoint::new(2, 1), Resource::new(ResourceType::Fish, 7));
        world.set_resource(MapPoint::new(3, 1), Resource::new(ResourceType::Coal, 0));

        let mut cheats = Cheats::default();
        cheats.toggle_resource_reveal_mode();
        assert!(CheatInspector::revealed_resources(&cheats, &world).is_empty());

        cheats.toggle_cheat_mode(&world);
        let revealed = CheatInspector::revealed_resources(&cheats, &world);
        assert_eq!(
            revealed,
            vec![RevealedDeposit {
                pt: MapPoint::new(1, 1),
                resource: Resource::new(ResourceType::Gold, 4),
            }]
        );

        cheats.toggle_resource_reveal_mode();
        let summary = CheatInspector::summary(&cheats, &world, &LocalClient::new());
        assert_eq!(summary.revealed.len(), 2);
        assert_eq!(summary.revealed[1].pt, MapPoint::new(2, 1));
        assert!(format!("{summary}").contains("(2, 1) Fish x7"));
    }

    #[test]
    fn summary_serialises_to_json() {
        let world = world();
        let summary = CheatInspector::summary(&Cheats::default(), &world, &LocalClient::new());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["cheat_mode"], false);
        assert_eq!(json["players"][1]["state"], "Ai");
    }
}
