use std::collections::{BTreeMap, BTreeSet};

use skirmish_common::PlayerId;

use crate::action::CheatAction;
use crate::config::{ChatCheat, TrackerConfig};
use crate::key::{KeyEvent, KeyType};

/// Function keys F1..F8 pressed with Ctrl+Shift address player slots 0..7.
const PLAYER_KEYS: u8 = 8;

/// Watches the key stream for the cheat phrase and cheat chords.
///
/// The phrase has to be typed without other characters in between, but
/// modifier-only presses the driver never reports do not interrupt it.
/// So "w", Ctrl, "inter" counts while "waaainter" or "w" F3 "inter" do not.
/// Restarting with the first character of the phrase is always allowed,
/// which makes "wwwinter" count as well.
#[derive(Debug, Clone)]
pub struct CheatKeyTracker {
    phrase: Vec<char>,
    speed_steps: u8,
    /// Number of phrase characters matched so far.
    index: usize,
}

impl CheatKeyTracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            phrase: config.phrase.chars().collect(),
            speed_steps: config.speed_steps,
            index: 0,
        }
    }

    /// Classify one key event. Special keys are checked first, then speed
    /// chords, then the phrase.
    pub fn track_key(&mut self, ke: &KeyEvent) -> Option<CheatAction> {
        if !ke.is_char() {
            self.reset();
            return special_key_action(ke);
        }

        if let Some(step) = self.speed_step(ke) {
            self.reset();
            return Some(CheatAction::SetGameSpeed(step));
        }

        self.track_char(ke.c)
    }

    /// Forget any partially typed phrase.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// How many characters of the phrase have been matched.
    pub fn progress(&self) -> usize {
        self.index
    }

    /// Alt+1 is step 0, Alt+2 step 1, up to the configured number of steps.
    fn speed_step(&self, ke: &KeyEvent) -> Option<u8> {
        if !ke.alt {
            return None;
        }
        let step = ke.c.to_digit(10)?.checked_sub(1)?;
        (step < u32::from(self.speed_steps)).then_some(step as u8)
    }

    fn track_char(&mut self, c: char) -> Option<CheatAction> {
        if self.phrase.get(self.index) != Some(&c) {
            self.index = 0;
        }
        if self.phrase.get(self.index) != Some(&c) {
            return None;
        }

        self.index += 1;
        if self.index < self.phrase.len() {
            return None;
        }

        self.index = 0;
        tracing::trace!("cheat phrase completed");
        Some(CheatAction::ToggleCheatMode)
    }
}

fn special_key_action(ke: &KeyEvent) -> Option<CheatAction> {
    if ke.ctrl && ke.shift {
        return match ke.kind.function_index()? {
            i if i < PLAYER_KEYS => Some(CheatAction::DestroyBuildings(BTreeSet::from([
                PlayerId(i),
            ]))),
            i if i == PLAYER_KEYS => Some(CheatAction::DestroyAllAiBuildings),
            _ => None,
        };
    }

    match ke.kind {
        KeyType::F7 if ke.alt => Some(CheatAction::ToggleResourceRevealMode),
        KeyType::F7 => Some(CheatAction::ToggleAllVisible),
        KeyType::F10 => Some(CheatAction::ToggleHumanAiPlayer),
        _ => None,
    }
}

/// Matches whole chat lines against the configured cheat commands.
#[derive(Debug, Clone)]
pub struct CheatCommandTracker {
    commands: BTreeMap<String, ChatCheat>,
}

impl CheatCommandTracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            commands: config.chat_commands.clone(),
        }
    }

    pub fn track_chat_command(&self, cmd: &str) -> Option<CheatAction> {
        self.commands.get(cmd).copied().map(CheatAction::from)
    }
}
