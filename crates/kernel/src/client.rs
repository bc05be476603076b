use std::time::Duration;

use serde::{Deserialize, Serialize};
use skirmish_common::{AiInfo, PlayerId};

use crate::engine::GameClient;

/// Frame length of a game running at normal speed.
pub const DEFAULT_FRAME_LENGTH: Duration = Duration::from_millis(50);

/// Connection lifecycle of a game client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClientState {
    #[default]
    Stopped,
    Connect,
    Config,
    Loading,
    Loaded,
    Game,
}

/// A client for a local game: no host round-trip, requests apply on commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalClient {
    state: ClientState,
    replay_mode: bool,
    local_player: PlayerId,
    frame_length: Duration,
    requested_frame_length: Option<Duration>,
    ai_takeover: Option<AiInfo>,
}

impl Default for LocalClient {
    fn default() -> Self {
        Self {
            state: ClientState::default(),
            replay_mode: false,
            local_player: PlayerId(0),
            frame_length: DEFAULT_FRAME_LENGTH,
            requested_frame_length: None,
            ai_takeover: None,
        }
    }
}

impl LocalClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client already in a running game for `local_player`.
    pub fn in_game(local_player: PlayerId) -> Self {
        Self {
            state: ClientState::Game,
            local_player,
            ..Self::default()
        }
    }

    pub fn set_state(&mut self, state: ClientState) {
        self.state = state;
    }

    pub fn set_replay_mode(&mut self, on: bool) {
        self.replay_mode = on;
    }

    pub fn local_player(&self) -> PlayerId {
        self.local_player
    }

    pub fn frame_length(&self) -> Duration {
        self.frame_length
    }

    pub fn requested_frame_length(&self) -> Option<Duration> {
        self.requested_frame_length
    }

    /// The AI currently playing for the local player, if any.
    pub fn ai_takeover(&self) -> Option<AiInfo> {
        self.ai_takeover
    }

    /// Apply a pending frame length request. Returns the length now in effect.
    pub fn commit_frame_length(&mut self) -> Duration {
        if let Some(length) = self.requested_frame_length.take() {
            tracing::debug!(?length, "frame length changed");
            self.frame_length = length;
        }
        self.frame_length
    }
}

impl GameClient for LocalClient {
    fn state(&self) -> ClientState {
        self.state
    }

    fn is_replay_mode(&self) -> bool {
        self.replay_mode
    }

    fn request_frame_length(&mut self, length: Duration) {
        self.requested_frame_length = Some(length);
    }

    fn toggle_human_ai_player(&mut self, ai: AiInfo) {
        self.ai_takeover = match self.ai_takeover {
            Some(_) => None,
            None => Some(ai),
        };
        tracing::debug!(
            player = self.local_player.0,
            ai_controlled = self.ai_takeover.is_some(),
            "local player control toggled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_is_stopped_at_normal_speed() {
        let client = LocalClient::new();
        assert_eq!(client.state(), ClientState::Stopped);
        assert_eq!(client.frame_length(), DEFAULT_FRAME_LENGTH);
        assert!(client.requested_frame_length().is_none());
    }

    #[test]
    fn frame_length_request_applies_on_commit() {
        let mut client = LocalClient::in_game(PlayerId(0));
        client.request_frame_length(Duration::from_millis(12));
        assert_eq!(client.frame_length(), DEFAULT_FRAME_LENGTH);

        assert_eq!(client.commit_frame_length(), Duration::from_millis(12));
        assert!(client.requested_frame_length().is_none());
        // Committing again keeps the current length
        assert_eq!(client.commit_frame_length(), Duration::from_millis(12));
    }

    #[test]
    fn ai_takeover_toggles() {
        let mut client = LocalClient::in_game(PlayerId(0));
        let ai = AiInfo::default();
        client.toggle_human_ai_player(ai);
        assert_eq!(client.ai_takeover(), Some(ai));
        client.toggle_human_ai_player(ai);
        assert_eq!(client.ai_takeover(), None);
    }
}
