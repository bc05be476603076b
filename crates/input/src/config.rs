use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::CheatAction;

/// Cheats reachable through the chat box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatCheat {
    Armageddon,
    EnableAllBuildings,
}

impl From<ChatCheat> for CheatAction {
    fn from(cheat: ChatCheat) -> Self {
        match cheat {
            ChatCheat::Armageddon => CheatAction::Armageddon,
            ChatCheat::EnableAllBuildings => CheatAction::ToggleAllBuildingsEnabled,
        }
    }
}

/// What the trackers listen for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Characters that toggle cheat mode when typed in order.
    pub phrase: String,
    /// Number of Alt+digit speed steps, starting at Alt+1.
    pub speed_steps: u8,
    /// Exact chat lines and the cheat each one triggers.
    pub chat_commands: BTreeMap<String, ChatCheat>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            phrase: "winter".into(),
            speed_steps: 6,
            chat_commands: BTreeMap::from([
                ("apocalypsis".to_string(), ChatCheat::Armageddon),
                ("impulse9".to_string(), ChatCheat::EnableAllBuildings),
            ]),
        }
    }
}
