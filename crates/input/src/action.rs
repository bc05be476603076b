use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use skirmish_common::PlayerId;

/// A cheat recognised from keyboard or chat input.
///
/// The cheat layer consumes actions, never raw input events, so key chords
/// and chat commands share the same effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheatAction {
    /// The trigger phrase was typed.
    ToggleCheatMode,
    /// Reveal or hide the whole map.
    ToggleAllVisible,
    /// Cycle which resources are shown on the map.
    ToggleResourceRevealMode,
    /// Hand the local player to the AI or take it back.
    ToggleHumanAiPlayer,
    /// Run the game at speed step `n`; 0 is normal speed.
    SetGameSpeed(u8),
    /// Destroy every building of the given players.
    DestroyBuildings(BTreeSet<PlayerId>),
    DestroyAllAiBuildings,
    /// Destroy every building of every player.
    Armageddon,
    /// Allow every building type regardless of unlocks.
    ToggleAllBuildingsEnabled,
}

impl CheatAction {
    /// Short name used in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleCheatMode => "toggle-cheat-mode",
            Self::ToggleAllVisible => "toggle-all-visible",
            Self::ToggleResourceRevealMode => "toggle-resource-reveal",
            Self::ToggleHumanAiPlayer => "toggle-human-ai",
            Self::SetGameSpeed(_) => "set-game-speed",
            Self::DestroyBuildings(_) => "destroy-buildings",
            Self::DestroyAllAiBuildings => "destroy-ai-buildings",
            Self::Armageddon => "armageddon",
            Self::ToggleAllBuildingsEnabled => "toggle-all-buildings",
        }
    }
}
