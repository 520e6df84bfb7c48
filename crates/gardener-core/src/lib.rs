pub mod assets;
pub mod audio;
pub mod game_trait;
pub mod keymap;
pub mod player;
pub mod settings;

// Re-exported for `split_screen_boilerplate!`.
pub use rmp_serde;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::HashMap;

    use crate::game_trait::{GameConfig, PlayerScore, SplitScreenGame};
    use crate::player::{CharacterId, Player, Seat};

    /// Create `n` test players (at most two), seat one first, each on a
    /// distinct character.
    pub fn make_players(n: usize) -> Vec<Player> {
        Seat::ALL
            .into_iter()
            .take(n)
            .map(|seat| Player {
                seat,
                display_name: format!("Player{}", seat.number()),
                character: CharacterId::ALL[seat.index()],
            })
            .collect()
    }

    /// Create a GameConfig with a fixed seed.
    pub fn default_config(seed: u64) -> GameConfig {
        GameConfig {
            seed: Some(seed),
            custom: HashMap::new(),
        }
    }

    /// Run N game ticks without input, returning all accumulated events.
    pub fn run_game_ticks<G: SplitScreenGame>(game: &mut G, n: usize, dt: f32) -> Vec<G::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed<G: SplitScreenGame>(game: &G, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every SplitScreenGame implementation calls these from its own
    // #[cfg(test)] module with a concrete game instance.

    /// After init() with both players, serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_player_state<G: SplitScreenGame>(game: &mut G) {
        let players = make_players(2);
        game.init(&players, &default_config(7));
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
    }

    /// apply_input() with valid input followed by update() must change state.
    pub fn contract_apply_input_changes_state<G: SplitScreenGame>(
        game: &mut G,
        valid_input: G::Input,
        seat: Seat,
    ) {
        let before = game.serialize_state();
        game.apply_input(seat, valid_input);
        game.update(0.1);
        assert_game_state_changed(game, &before);
    }

    /// update() with dt>0 must advance game state.
    pub fn contract_update_advances_time<G: SplitScreenGame>(game: &mut G) {
        let before = game.serialize_state();
        game.update(1.0);
        let after = game.serialize_state();
        assert_ne!(
            before, after,
            "update(dt>0) must advance game state (timer)"
        );
    }

    /// Driving the game with `drive` before each tick must eventually
    /// reach is_round_complete().
    pub fn contract_round_eventually_completes<G, F>(
        game: &mut G,
        max_ticks: usize,
        dt: f32,
        mut drive: F,
    ) where
        G: SplitScreenGame,
        F: FnMut(&mut G),
    {
        for _ in 0..max_ticks {
            drive(game);
            game.update(dt);
            if game.is_round_complete() {
                return;
            }
        }
        assert!(
            game.is_round_complete(),
            "Game must complete within {max_ticks} ticks"
        );
    }

    /// serialize→apply→serialize must be stable after one roundtrip.
    pub fn contract_state_roundtrip_preserves<G: SplitScreenGame>(game: &mut G) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        game.apply_state(&state_b);
        let state_c = game.serialize_state();
        assert_eq!(
            state_b, state_c,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// Malformed snapshots must leave state untouched.
    pub fn contract_malformed_state_ignored<G: SplitScreenGame>(game: &mut G) {
        let before = game.serialize_state();
        game.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(
            before,
            game.serialize_state(),
            "Malformed state must be ignored"
        );
    }

    /// pause() must freeze the simulation, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<G: SplitScreenGame>(game: &mut G) {
        game.pause();
        let before = game.serialize_state();
        game.update(1.0);
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(1.0);
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// round_results() must return one entry per seat and at most one winner.
    pub fn contract_round_results_complete<G: SplitScreenGame>(game: &G) -> Vec<PlayerScore> {
        let results = game.round_results();
        assert_eq!(
            results.len(),
            Seat::ALL.len(),
            "round_results must have one entry per seat"
        );
        assert!(
            results.iter().filter(|r| r.winner).count() <= 1,
            "At most one seat can win"
        );
        results
    }
}
