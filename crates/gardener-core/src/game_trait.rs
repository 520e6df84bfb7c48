use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::player::{Player, Seat};

/// Core trait for a split-screen game simulation.
///
/// The frontend (window, headless runner, test) owns the frame loop and
/// feeds per-seat input; the game only handles rules and state.
pub trait SplitScreenGame {
    /// Per-seat input collected between two ticks.
    type Input: Clone + Default + Serialize + DeserializeOwned;
    /// Events emitted during a tick (sound cues, rule transitions, match end).
    type Event: Clone + std::fmt::Debug;

    /// Game metadata for menus.
    fn metadata(&self) -> GameMetadata;

    /// Called once when both players are ready.
    fn init(&mut self, players: &[Player], config: &GameConfig);

    /// Advance the simulation by `dt` seconds, consuming pending input.
    fn update(&mut self, dt: f32) -> Vec<Self::Event>;

    /// Snapshot the game state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Restore a snapshot produced by `serialize_state`. Malformed bytes
    /// leave the state untouched.
    fn apply_state(&mut self, state: &[u8]);

    /// Queue input for the next tick.
    fn apply_input(&mut self, seat: Seat, input: Self::Input);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the match is decided.
    fn is_round_complete(&self) -> bool;

    /// Final scores, one entry per seat.
    fn round_results(&self) -> Vec<PlayerScore>;
}

/// Game metadata for menus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub min_players: u8,
    pub max_players: u8,
    pub estimated_round_duration: Duration,
}

/// Configuration for a game session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed. `None` lets the game pick its configured default.
    pub seed: Option<u64>,
    pub custom: HashMap<String, serde_json::Value>,
}

/// Score entry for a seat at the end of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub seat: Seat,
    pub score: i32,
    pub winner: bool,
}

/// Generates the `SplitScreenGame` methods that only shuffle state around:
/// `serialize_state`, `apply_state`, `pause`, `resume`, `is_round_complete`.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields, and `$StateType` to have a `round_complete: bool` field.
#[macro_export]
macro_rules! split_screen_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            $crate::rmp_serde::to_vec(&self.state).unwrap_or_default()
        }

        fn apply_state(&mut self, state: &[u8]) {
            match $crate::rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::debug!(error = %e, "Ignored malformed state snapshot"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_round_complete(&self) -> bool {
            self.state.round_complete
        }
    };
}
