use skirmish_input::{CheatAction, CheatCommandTracker, CheatKeyTracker, KeyEvent};
use skirmish_kernel::{GameClient, GameWorld};

use crate::config::CheatConfig;
use crate::state::Cheats;

/// Input trackers wired to the cheat state.
///
/// Feed it every key event and chat line; recognised cheats are applied to
/// the world and client passed in.
#[derive(Debug, Clone)]
pub struct CheatSession {
    keys: CheatKeyTracker,
    commands: CheatCommandTracker,
    cheats: Cheats,
}

impl Default for CheatSession {
    fn default() -> Self {
        Self::new(&CheatConfig::default())
    }
}

impl CheatSession {
    pub fn new(config: &CheatConfig) -> Self {
        Self {
            keys: CheatKeyTracker::new(&config.tracker),
            commands: CheatCommandTracker::new(&config.tracker),
            cheats: Cheats::new(config),
        }
    }

    pub fn cheats(&self) -> &Cheats {
        &self.cheats
    }

    /// Direct access for effects not bound to input, such as placing a
    /// cheat headquarters from a map click.
    pub fn cheats_mut(&mut self) -> &mut Cheats {
        &mut self.cheats
    }

    /// Track a key press. Returns the cheat it triggered, applied or not.
    pub fn on_key(
        &mut self,
        ke: &KeyEvent,
        world: &mut dyn GameWorld,
        client: &mut dyn GameClient,
    ) -> Option<CheatAction> {
        let action = self.keys.track_key(ke)?;
        tracing::debug!(key = %ke, action = action.name(), "cheat key recognised");
        self.apply(action.clone(), world, client);
        Some(action)
    }

    /// Track a chat line. Returns the cheat it triggered, applied or not.
    pub fn on_chat(
        &mut self,
        cmd: &str,
        world: &mut dyn GameWorld,
        client: &mut dyn GameClient,
    ) -> Option<CheatAction> {
        let action = self.commands.track_chat_command(cmd)?;
        tracing::debug!(cmd, action = action.name(), "cheat command recognised");
        self.apply(action.clone(), world, client);
        Some(action)
    }

    pub fn apply(
        &mut self,
        action: CheatAction,
        world: &mut dyn GameWorld,
        client: &mut dyn GameClient,
    ) {
        let _span = tracing::debug_span!("cheat", action = action.name()).entered();
        match action {
            CheatAction::ToggleCheatMode => self.cheats.toggle_cheat_mode(world),
            CheatAction::ToggleAllVisible => self.cheats.toggle_all_visible(world),
            CheatAction::ToggleResourceRevealMode => self.cheats.toggle_resource_reveal_mode(),
            CheatAction::ToggleHumanAiPlayer => self.cheats.toggle_human_ai_player(client),
            CheatAction::SetGameSpeed(step) => self.cheats.set_game_speed(client, step),
            CheatAction::DestroyBuildings(players) => {
                self.cheats.destroy_buildings(world, &players)
            }
            CheatAction::DestroyAllAiBuildings => self.cheats.destroy_all_ai_buildings(world),
            CheatAction::Armageddon => self.cheats.armageddon(world),
            CheatAction::ToggleAllBuildingsEnabled => self.cheats.toggle_all_buildings_enabled(),
        }
    }
}
