use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use skirmish_common::{
    BuildingQuality, BuildingType, MapPoint, PlayerId, PlayerState, ResourceType,
};
use skirmish_kernel::{ClientState, GameClient, GameWorld};

use crate::config::CheatConfig;

/// Which resources the map shows while cheating. Each mode includes the
/// ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceRevealMode {
    #[default]
    Nothing,
    Ores,
    Fish,
    Water,
}

impl ResourceRevealMode {
    fn next(self) -> Self {
        match self {
            Self::Nothing => Self::Ores,
            Self::Ores => Self::Fish,
            Self::Fish => Self::Water,
            Self::Water => Self::Nothing,
        }
    }
}

/// Why a cheat headquarters cannot go on a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("cheat mode is off")]
    CheatModeOff,
    #[error("{0} is already owned")]
    Owned(MapPoint),
    #[error("{0} is next to a border")]
    NearBorder(MapPoint),
    #[error("{pt} only allows {bq:?}")]
    Quality { pt: MapPoint, bq: BuildingQuality },
    #[error("{0} does not exist")]
    UnknownPlayer(PlayerId),
}

/// Cheat mode and the toggles it unlocks.
///
/// Collaborators are passed per call, the same way an editor takes the
/// world it edits.
#[derive(Debug, Clone)]
pub struct Cheats {
    config: CheatConfig,
    cheat_mode: bool,
    all_visible: bool,
    all_buildings_enabled: bool,
    resource_reveal_mode: ResourceRevealMode,
}

impl Default for Cheats {
    fn default() -> Self {
        Self::new(&CheatConfig::default())
    }
}

impl Cheats {
    pub fn new(config: &CheatConfig) -> Self {
        Self {
            config: config.clone(),
            cheat_mode: false,
            all_visible: false,
            all_buildings_enabled: false,
            resource_reveal_mode: ResourceRevealMode::Nothing,
        }
    }

    pub fn is_cheat_mode_on(&self) -> bool {
        self.cheat_mode
    }

    /// Flip cheat mode. Ignored unless exactly one human is playing.
    pub fn toggle_cheat_mode(&mut self, world: &dyn GameWorld) {
        if !world.is_single_player() {
            tracing::warn!("cheat mode is only available in single-player games");
            return;
        }
        self.cheat_mode = !self.cheat_mode;
        tracing::info!(on = self.cheat_mode, "cheat mode toggled");
    }

    /// Reveal or hide the whole map.
    ///
    /// Once revealed, switching cheat mode off leaves the map revealed with
    /// no way to hide it again, as in the classic game.
    pub fn toggle_all_visible(&mut self, world: &mut dyn GameWorld) {
        if !self.allowed("toggle-all-visible") {
            return;
        }
        self.all_visible = !self.all_visible;
        tracing::info!(on = self.all_visible, "map visibility toggled");
        world.notify_map_visibility_changed();
    }

    pub fn is_all_visible(&self) -> bool {
        self.all_visible
    }

    /// Advance Nothing -> Ores -> Fish -> Water -> Nothing.
    ///
    /// The mode is remembered while cheat mode is off and takes effect again
    /// once it is switched back on.
    pub fn toggle_resource_reveal_mode(&mut self) {
        self.resource_reveal_mode = self.resource_reveal_mode.next();
        tracing::debug!(mode = ?self.resource_reveal_mode, "resource reveal mode changed");
    }

    pub fn resource_reveal_mode(&self) -> ResourceRevealMode {
        if self.cheat_mode {
            self.resource_reveal_mode
        } else {
            ResourceRevealMode::Nothing
        }
    }

    /// Whether a resource of this type should be drawn on the map.
    pub fn reveals_resource(&self, kind: ResourceType) -> bool {
        match self.resource_reveal_mode() {
            ResourceRevealMode::Nothing => false,
            ResourceRevealMode::Ores => kind.is_ore(),
            ResourceRevealMode::Fish => kind.is_ore() || kind == ResourceType::Fish,
            ResourceRevealMode::Water => {
                kind.is_ore() || matches!(kind, ResourceType::Fish | ResourceType::Water)
            }
        }
    }

    pub fn toggle_all_buildings_enabled(&mut self) {
        if !self.allowed("toggle-all-buildings-enabled") {
            return;
        }
        self.all_buildings_enabled = !self.all_buildings_enabled;
        tracing::info!(on = self.all_buildings_enabled, "all buildings enabled toggled");
    }

    pub fn are_all_buildings_enabled(&self) -> bool {
        self.all_buildings_enabled
    }

    /// Check whether a cheat headquarters may be placed at `pt`.
    ///
    /// The node and all of its neighbours must be unowned, so the new HQ
    /// keeps at least one node between itself and any border. The node must
    /// allow at least a hut.
    pub fn check_cheat_building(
        &self,
        world: &dyn GameWorld,
        pt: MapPoint,
    ) -> Result<(), PlacementError> {
        if !self.cheat_mode {
            return Err(PlacementError::CheatModeOff);
        }
        if world.owner(pt).is_some() {
            return Err(PlacementError::Owned(pt));
        }
        if world.neighbours(pt).iter().any(|nb| world.owner(*nb).is_some()) {
            return Err(PlacementError::NearBorder(pt));
        }
        let bq = world.building_quality(pt);
        if bq < BuildingQuality::Hut {
            return Err(PlacementError::Quality { pt, bq });
        }
        Ok(())
    }

    pub fn can_place_cheat_building(&self, world: &dyn GameWorld, pt: MapPoint) -> bool {
        self.check_cheat_building(world, pt).is_ok()
    }

    /// Put a new headquarters for `player` at `pt`, replacing whatever
    /// object was there. It comes with the default stock of a new HQ and is
    /// a tent if the player's existing HQ is one.
    pub fn place_cheat_building(
        &self,
        world: &mut dyn GameWorld,
        pt: MapPoint,
        player: PlayerId,
    ) -> Result<(), PlacementError> {
        self.check_cheat_building(world, pt)?;
        let nation = world
            .player_nation(player)
            .ok_or(PlacementError::UnknownPlayer(player))?;
        let is_tent = world.hq_is_tent(player);

        world.destroy_object(pt);
        world.create_building(BuildingType::Headquarters, pt, player, nation, is_tent);
        tracing::info!(%pt, %player, "cheat headquarters placed");
        Ok(())
    }

    /// Request the frame length for speed step `step` (0 is normal speed).
    pub fn set_game_speed(&self, client: &mut dyn GameClient, step: u8) {
        if !self.allowed("set-game-speed") {
            return;
        }
        let steps = self.config.tracker.speed_steps;
        if step >= steps {
            tracing::warn!(step, max = steps, "speed step out of range");
            return;
        }
        let length = self.config.frame_length(step);
        tracing::info!(step, ?length, "game speed requested");
        client.request_frame_length(length);
    }

    /// Let the AI play for the local player, or take control back.
    /// Only in a running game that is not a replay.
    pub fn toggle_human_ai_player(&self, client: &mut dyn GameClient) {
        if !self.allowed("toggle-human-ai-player") {
            return;
        }
        let state = client.state();
        if state != ClientState::Game {
            tracing::warn!(?state, "AI takeover needs a running game");
            return;
        }
        if client.is_replay_mode() {
            tracing::warn!("AI takeover is not available in replays");
            return;
        }
        client.toggle_human_ai_player(self.config.takeover_ai);
    }

    /// Destroy every building of the given players.
    pub fn destroy_buildings(&self, world: &mut dyn GameWorld, players: &BTreeSet<PlayerId>) {
        if !self.allowed("destroy-buildings") {
            return;
        }
        for player in players {
            let count = world.destroy_buildings_of(*player);
            tracing::info!(%player, count, "buildings destroyed");
        }
    }

    pub fn destroy_all_ai_buildings(&self, world: &mut dyn GameWorld) {
        let ai_players = players_where(world, |state| state == PlayerState::Ai);
        self.destroy_buildings(world, &ai_players);
    }

    /// Destroy every building of every player.
    pub fn armageddon(&self, world: &mut dyn GameWorld) {
        let everyone = players_where(world, |_| true);
        self.destroy_buildings(world, &everyone);
    }

    /// Whether a gated cheat may run right now.
    fn allowed(&self, cheat: &'static str) -> bool {
        if !self.cheat_mode {
            tracing::debug!(cheat, "ignored while cheat mode is off");
        }
        self.cheat_mode
    }
}

fn players_where(world: &dyn GameWorld, pred: impl Fn(PlayerState) -> bool) -> BTreeSet<PlayerId> {
    (0..world.player_count())
        .filter_map(|i| u8::try_from(i).ok().map(PlayerId))
        .filter(|p| world.player_state(*p).is_some_and(&pred))
        .collect()
}
