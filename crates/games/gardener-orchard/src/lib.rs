pub mod bot;
pub mod characters;
pub mod config;
pub mod controls;
pub mod cycle;
pub mod interaction;
pub mod inventory;
pub mod layout;
pub mod physics;
pub mod problems;
pub mod screens;

use std::collections::HashMap;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use gardener_core::audio::{AudioMixer, AudioSink, SoundCue};
use gardener_core::game_trait::{GameConfig, GameMetadata, PlayerScore, SplitScreenGame};
use gardener_core::player::{CharacterId, Player, Seat};
use gardener_core::split_screen_boilerplate;

use config::OrchardConfig;
use cycle::{CycleOutcome, TreeCycle};
use interaction::Interaction;
use inventory::{Inventory, TableInput, item_name};
use layout::Garden;
use physics::{Body, MoveIntent};
use problems::{ProblemType, TreeKind};
use screens::{Countdown, EndScreen, EndSignal};

/// Input from one seat, collected between ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchardInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub interact: bool,
    /// Number keys 1..=8 pressed since the last tick, in press order.
    pub select: Vec<u8>,
}

impl OrchardInput {
    fn intent(&self) -> MoveIntent {
        MoveIntent {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
        }
    }
}

/// Everything the game reports back to the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchardEvent {
    Sound(SoundCue),
    StopSound(SoundCue),
    /// Stop the background music and play the fanfare.
    VictorySequence,
    /// The fanfare ended and the credits music starts.
    CreditsStarted,
    CountdownFinished,
    ProblemSpawned { seat: Seat, problem: ProblemType },
    ProblemExpired { seat: Seat, problem: ProblemType },
    ProblemTreated { seat: Seat, problem: ProblemType, slot: u8 },
    FruitDropped { seat: Seat },
    FruitPickedUp { seat: Seat },
    FruitDeposited { seat: Seat, box_state: u8 },
    MatchOver { winner: Seat },
    ReturnToMenu,
}

/// Match phase. Only one of the countdown, play and end screen runs per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Countdown,
    Playing,
    GameOver,
}

/// One seat's half of the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatState {
    pub character: CharacterId,
    pub body: Body,
    pub cycle: TreeCycle,
    pub box_state: u8,
    pub holding_fruit: bool,
}

impl SeatState {
    pub fn new<R: rand::Rng>(
        seat: Seat,
        character: CharacterId,
        garden: &Garden,
        rng: &mut R,
        config: &OrchardConfig,
    ) -> Self {
        Self {
            character,
            body: Body::new(garden.spawn.0, garden.spawn.1),
            cycle: TreeCycle::new(TreeKind::for_seat(seat), rng, config),
            box_state: 0,
            holding_fruit: false,
        }
    }
}

/// Serializable match state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchardState {
    pub seats: [SeatState; 2],
    pub inventory: Inventory,
    pub phase: Phase,
    pub countdown: Countdown,
    pub end_screen: EndScreen,
    pub winner: Option<Seat>,
    pub round_complete: bool,
    pub elapsed: f32,
    pub background_stopped: bool,
}

impl OrchardState {
    pub fn seat(&self, seat: Seat) -> &SeatState {
        &self.seats[seat.index()]
    }
}

fn seat_rng(seed: u64, seat: Seat) -> StdRng {
    StdRng::seed_from_u64(seed ^ u64::from(seat.number()).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// The Gardener orchard match for two seats.
pub struct Orchard {
    state: OrchardState,
    gardens: [Garden; 2],
    rngs: [StdRng; 2],
    pending_inputs: HashMap<Seat, OrchardInput>,
    queued_events: Vec<OrchardEvent>,
    paused: bool,
    config: OrchardConfig,
}

impl Orchard {
    pub fn new() -> Self {
        Self::with_config(OrchardConfig::load())
    }

    pub fn with_config(config: OrchardConfig) -> Self {
        let config = config.sanitized();
        let gardens = [Garden::for_seat(Seat::One), Garden::for_seat(Seat::Two)];
        let mut rngs = [
            seat_rng(config.seed, Seat::One),
            seat_rng(config.seed, Seat::Two),
        ];
        let seats = Seat::ALL.map(|seat| {
            SeatState::new(
                seat,
                CharacterId::ALL[seat.index()],
                &gardens[seat.index()],
                &mut rngs[seat.index()],
                &config,
            )
        });
        Self {
            state: OrchardState {
                seats,
                inventory: Inventory::new(),
                phase: Phase::Countdown,
                countdown: Countdown::default(),
                end_screen: EndScreen::default(),
                winner: None,
                round_complete: false,
                elapsed: 0.0,
                background_stopped: false,
            },
            gardens,
            rngs,
            pending_inputs: HashMap::new(),
            queued_events: Vec::new(),
            paused: false,
            config,
        }
    }

    pub fn state(&self) -> &OrchardState {
        &self.state
    }

    pub fn config(&self) -> &OrchardConfig {
        &self.config
    }

    pub fn garden(&self, seat: Seat) -> &Garden {
        &self.gardens[seat.index()]
    }

    /// Decode a msgpack-encoded `OrchardInput` and queue it.
    pub fn apply_encoded_input(&mut self, seat: Seat, bytes: &[u8]) {
        match rmp_serde::from_slice::<OrchardInput>(bytes) {
            Ok(input) => self.apply_input(seat, input),
            Err(e) => {
                tracing::debug!(%seat, error = %e, "Dropped malformed orchard input");
            },
        }
    }

    fn update_countdown(&mut self, dt: f32, events: &mut Vec<OrchardEvent>) {
        self.pending_inputs.clear();
        if self.state.countdown.update(dt, &self.config) {
            tracing::info!("Countdown finished, match started");
            self.state.phase = Phase::Playing;
            events.push(OrchardEvent::CountdownFinished);
        }
    }

    fn update_game_over(&mut self, dt: f32, events: &mut Vec<OrchardEvent>) {
        if !self.state.background_stopped {
            self.state.background_stopped = true;
            events.push(OrchardEvent::StopSound(SoundCue::BackgroundMusic));
        }
        let pressed = self
            .pending_inputs
            .drain()
            .any(|(_, input)| input.interact);
        if pressed && self.state.end_screen.press_menu_button(&self.config) {
            events.push(OrchardEvent::Sound(SoundCue::Button));
            events.push(OrchardEvent::StopSound(SoundCue::Credits));
        }
        for signal in self.state.end_screen.update(dt, &self.config) {
            match signal {
                EndSignal::CreditsStarted => events.push(OrchardEvent::CreditsStarted),
                EndSignal::ReturnToMenu => {
                    tracing::info!("Returning to menu");
                    events.push(OrchardEvent::ReturnToMenu);
                },
            }
        }
    }

    fn update_playing(&mut self, dt: f32, events: &mut Vec<OrchardEvent>) {
        let inputs = Seat::ALL.map(|seat| self.pending_inputs.remove(&seat).unwrap_or_default());

        for seat in Seat::ALL {
            let i = seat.index();
            let character = characters::spec(self.state.seats[i].character);
            self.state.seats[i].body.step(
                inputs[i].intent(),
                dt,
                self.gardens[i].colliders(),
                character,
                &self.config,
            );
        }

        for seat in Seat::ALL {
            let i = seat.index();
            let box_state = self.state.seats[i].box_state;
            let outcomes =
                self.state.seats[i]
                    .cycle
                    .update(dt, box_state, &mut self.rngs[i], &self.config);
            for outcome in outcomes {
                match outcome {
                    CycleOutcome::ProblemSpawned(problem) => {
                        tracing::debug!(%seat, ?problem, "Problem appeared");
                        events.push(OrchardEvent::Sound(SoundCue::Error));
                        events.push(OrchardEvent::ProblemSpawned { seat, problem });
                    },
                    CycleOutcome::ProblemExpired(problem) => {
                        tracing::debug!(%seat, ?problem, "Problem expired, fruit growth lost");
                        events.push(OrchardEvent::Sound(SoundCue::Failure));
                        events.push(OrchardEvent::ProblemExpired { seat, problem });
                    },
                    CycleOutcome::FruitDropped { last } => {
                        tracing::debug!(%seat, last, "Fruit dropped");
                        events.push(OrchardEvent::FruitDropped { seat });
                    },
                }
            }
        }

        for seat in Seat::ALL {
            let i = seat.index();
            let reach = interaction::reach(&self.state.seats[i], &self.gardens[i], &self.config);
            let cues = self.state.inventory.update_seat(
                seat,
                TableInput {
                    near_table: reach.table,
                    interact: inputs[i].interact,
                    select: &inputs[i].select,
                    holding_fruit: self.state.seats[i].holding_fruit,
                },
                dt,
                &self.config,
            );
            events.extend(cues.into_iter().map(OrchardEvent::Sound));
        }

        for seat in Seat::ALL {
            let i = seat.index();
            if !inputs[i].interact {
                continue;
            }
            let reach = interaction::reach(&self.state.seats[i], &self.gardens[i], &self.config);
            let selected = self.state.inventory.selected(seat);
            let mut cues = Vec::new();
            let result = interaction::interact(
                &mut self.state.seats[i],
                reach,
                selected,
                &mut self.rngs[i],
                &self.config,
                &mut cues,
            );
            events.extend(cues.into_iter().map(OrchardEvent::Sound));
            match result {
                Some(Interaction::Treated { problem, slot }) => {
                    tracing::debug!(%seat, ?problem, slot, item = item_name(slot), "Problem treated");
                    events.push(OrchardEvent::ProblemTreated {
                        seat,
                        problem,
                        slot,
                    });
                },
                Some(Interaction::PickedUp) => {
                    tracing::debug!(%seat, "Fruit picked up");
                    events.push(OrchardEvent::FruitPickedUp { seat });
                },
                Some(Interaction::Deposited { box_state, .. }) => {
                    tracing::debug!(%seat, box_state, "Fruit deposited");
                    events.push(OrchardEvent::FruitDeposited { seat, box_state });
                },
                None => {},
            }
        }

        let winner = Seat::ALL
            .into_iter()
            .find(|seat| self.state.seat(*seat).box_state >= self.config.max_box_state);
        if let Some(winner) = winner
            && self.state.end_screen.set_game_over(winner)
        {
            tracing::info!(%winner, elapsed = self.state.elapsed, "Match over");
            self.state.winner = Some(winner);
            self.state.round_complete = true;
            self.state.phase = Phase::GameOver;
            events.push(OrchardEvent::VictorySequence);
            events.push(OrchardEvent::MatchOver { winner });
        }
    }
}

impl Default for Orchard {
    fn default() -> Self {
        Self::with_config(OrchardConfig::default())
    }
}

impl SplitScreenGame for Orchard {
    type Input = OrchardInput;
    type Event = OrchardEvent;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Gardener".to_string(),
            description: "Tend your tree, treat its problems, and be first to fill your fruit box."
                .to_string(),
            min_players: 2,
            max_players: 2,
            estimated_round_duration: Duration::from_secs(120),
        }
    }

    fn init(&mut self, players: &[Player], config: &GameConfig) {
        if let Some(fruits) = config
            .custom
            .get("fruits_to_win")
            .and_then(|v| v.as_u64())
        {
            self.config.max_box_state = u8::try_from(fruits).unwrap_or(u8::MAX).max(1);
        }
        let seed = config.seed.unwrap_or(self.config.seed);
        self.rngs = Seat::ALL.map(|seat| seat_rng(seed, seat));
        let seats = Seat::ALL.map(|seat| {
            let character = players
                .iter()
                .find(|p| p.seat == seat)
                .map(|p| p.character)
                .unwrap_or(CharacterId::ALL[seat.index()]);
            SeatState::new(
                seat,
                character,
                &self.gardens[seat.index()],
                &mut self.rngs[seat.index()],
                &self.config,
            )
        });
        self.state = OrchardState {
            seats,
            inventory: Inventory::new(),
            phase: Phase::Countdown,
            countdown: Countdown::default(),
            end_screen: EndScreen::default(),
            winner: None,
            round_complete: false,
            elapsed: 0.0,
            background_stopped: false,
        };
        self.pending_inputs.clear();
        self.paused = false;
        self.queued_events = vec![
            OrchardEvent::Sound(SoundCue::BackgroundMusic),
            OrchardEvent::Sound(SoundCue::Start),
        ];
        tracing::info!(seed, players = players.len(), "Orchard match initialised");
    }

    fn update(&mut self, dt: f32) -> Vec<OrchardEvent> {
        if self.paused {
            return Vec::new();
        }
        let mut events = std::mem::take(&mut self.queued_events);
        self.state.elapsed += dt;

        match self.state.phase {
            Phase::Countdown => self.update_countdown(dt, &mut events),
            Phase::Playing => self.update_playing(dt, &mut events),
            Phase::GameOver => self.update_game_over(dt, &mut events),
        }
        events
    }

    split_screen_boilerplate!(state_type: OrchardState);

    fn apply_input(&mut self, seat: Seat, input: OrchardInput) {
        if let Some(existing) = self.pending_inputs.get_mut(&seat) {
            existing.up = input.up;
            existing.down = input.down;
            existing.left = input.left;
            existing.right = input.right;
            // Presses between ticks are kept until the tick consumes them.
            existing.interact |= input.interact;
            existing.select.extend(input.select);
        } else {
            self.pending_inputs.insert(seat, input);
        }
    }

    fn round_results(&self) -> Vec<PlayerScore> {
        Seat::ALL
            .iter()
            .map(|&seat| PlayerScore {
                seat,
                score: i32::from(self.state.seat(seat).box_state),
                winner: self.state.winner == Some(seat),
            })
            .collect()
    }
}

/// Route a game event to the audio mixer.
pub fn play_event<S: AudioSink>(mixer: &mut AudioMixer<S>, event: &OrchardEvent) {
    match event {
        OrchardEvent::Sound(cue) => {
            mixer.play(*cue);
        },
        OrchardEvent::StopSound(cue) => mixer.stop(*cue),
        OrchardEvent::VictorySequence => mixer.play_victory_sequence(),
        OrchardEvent::CreditsStarted => {
            mixer.victory_finished();
            mixer.play(SoundCue::Credits);
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use gardener_core::audio::NullSink;
    use gardener_core::test_helpers::{self, default_config, make_players, run_game_ticks};

    use super::*;
    use crate::problems::Problem;

    const DT: f32 = 1.0 / 60.0;

    fn started_game(seed: u64) -> Orchard {
        let mut game = Orchard::default();
        game.init(&make_players(2), &default_config(seed));
        run_game_ticks(&mut game, 4 * 60 + 10, DT);
        assert_eq!(game.state().phase, Phase::Playing);
        game
    }

    fn teleport(game: &mut Orchard, seat: Seat, feet: (f32, f32)) {
        let s = &mut game.state.seats[seat.index()];
        let c = characters::spec(s.character);
        s.body.x = feet.0 - c.hitbox_offset.0 - c.hitbox_size.0 / 2.0;
        s.body.y = feet.1 - c.hitbox_offset.1 - c.hitbox_size.1 / 2.0;
    }

    fn press(game: &mut Orchard, seat: Seat, input: OrchardInput) -> Vec<OrchardEvent> {
        game.apply_input(seat, input);
        game.update(DT)
    }

    fn interact() -> OrchardInput {
        OrchardInput {
            interact: true,
            ..Default::default()
        }
    }

    // ================================================================
    // Trait contract
    // ================================================================

    #[test]
    fn contract_init_creates_player_state() {
        let mut game = Orchard::default();
        test_helpers::contract_init_creates_player_state(&mut game);
    }

    #[test]
    fn contract_update_advances_time() {
        let mut game = Orchard::default();
        game.init(&make_players(2), &default_config(1));
        test_helpers::contract_update_advances_time(&mut game);
    }

    #[test]
    fn contract_apply_input_changes_state() {
        let mut game = started_game(2);
        test_helpers::contract_apply_input_changes_state(
            &mut game,
            OrchardInput {
                right: true,
                ..Default::default()
            },
            Seat::One,
        );
    }

    #[test]
    fn contract_pause_stops_updates() {
        let mut game = Orchard::default();
        game.init(&make_players(2), &default_config(3));
        test_helpers::contract_pause_stops_updates(&mut game);
    }

    #[test]
    fn contract_state_roundtrip_preserves() {
        let mut game = started_game(4);
        test_helpers::contract_state_roundtrip_preserves(&mut game);
        test_helpers::contract_malformed_state_ignored(&mut game);
    }

    #[test]
    fn contract_round_eventually_completes() {
        let mut game = Orchard::default();
        game.init(&make_players(2), &default_config(5));
        test_helpers::contract_round_eventually_completes(&mut game, 60 * 60 * 10, DT, |g| {
            for seat in Seat::ALL {
                let input = bot::generate_bot_input(g.state(), seat, g.config());
                g.apply_input(seat, input);
            }
        });
        let results = test_helpers::contract_round_results_complete(&game);
        assert!(results.iter().any(|r| r.winner && r.score == 1));
    }

    // ================================================================
    // Match flow
    // ================================================================

    #[test]
    fn init_queues_start_cues() {
        let mut game = Orchard::default();
        game.init(&make_players(2), &default_config(6));
        let events = game.update(DT);
        assert!(events.contains(&OrchardEvent::Sound(SoundCue::BackgroundMusic)));
        assert!(events.contains(&OrchardEvent::Sound(SoundCue::Start)));
        assert!(!game.update(DT).contains(&OrchardEvent::Sound(SoundCue::Start)));
    }

    #[test]
    fn countdown_blocks_movement() {
        let mut game = Orchard::default();
        game.init(&make_players(2), &default_config(7));
        let before = game.state().seat(Seat::One).body.clone();
        for _ in 0..60 {
            press(
                &mut game,
                Seat::One,
                OrchardInput {
                    left: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(game.state().seat(Seat::One).body, before);
        assert_eq!(game.state().phase, Phase::Countdown);
    }

    #[test]
    fn interact_press_survives_until_tick() {
        let mut game = started_game(8);
        game.apply_input(Seat::One, interact());
        game.apply_input(Seat::One, OrchardInput::default());
        assert!(game.pending_inputs[&Seat::One].interact);
        game.apply_input(
            Seat::One,
            OrchardInput {
                select: vec![4],
                up: true,
                ..Default::default()
            },
        );
        let pending = &game.pending_inputs[&Seat::One];
        assert!(pending.interact && pending.up);
        assert_eq!(pending.select, vec![4]);
    }

    #[test]
    fn number_presses_between_ticks_all_apply() {
        let mut game = started_game(14);
        teleport(&mut game, Seat::Two, (1508.0, 1115.0));
        press(&mut game, Seat::Two, interact());
        assert!(game.state().inventory.seat(Seat::Two).open);

        let five = OrchardInput {
            select: vec![5],
            ..Default::default()
        };
        game.apply_input(Seat::Two, five.clone());
        game.apply_input(Seat::Two, five.clone());
        assert_eq!(game.pending_inputs[&Seat::Two].select, vec![5, 5]);
        game.update(DT);
        // Picked and put back.
        assert_eq!(game.state().inventory.selected(Seat::Two), None);

        game.apply_input(Seat::Two, five);
        game.apply_input(
            Seat::Two,
            OrchardInput {
                select: vec![7],
                ..Default::default()
            },
        );
        game.update(DT);
        assert_eq!(game.state().inventory.selected(Seat::Two), Some(7));
        assert!(game.state().inventory.items[4].available);
    }

    #[test]
    fn inverted_interval_config_is_repaired() {
        let mut game = Orchard::with_config(OrchardConfig {
            problem_interval_min: 15,
            problem_interval_max: 5,
            menu_button_secs: 0.0,
            ..Default::default()
        });
        game.init(&make_players(2), &default_config(15));
        assert_eq!(game.config().problem_interval_min, 5);
        assert_eq!(game.config().problem_interval_max, 15);
        assert!(game.config().menu_button_secs > 0.0);
        run_game_ticks(&mut game, 60 * 30, DT);
        assert_eq!(game.state().phase, Phase::Playing);
    }

    #[test]
    fn malformed_encoded_input_is_dropped() {
        let mut game = started_game(9);
        game.apply_encoded_input(Seat::Two, &[0xff, 0x00]);
        assert!(game.pending_inputs.is_empty());
        let bytes = rmp_serde::to_vec(&interact()).unwrap();
        game.apply_encoded_input(Seat::Two, &bytes);
        assert!(game.pending_inputs[&Seat::Two].interact);
    }

    #[test]
    fn full_fruit_loop_wins_the_match() {
        let mut game = started_game(10);

        // Pick the right item for a forced problem.
        game.state.seats[1].cycle.problem = Some(Problem {
            kind: ProblemType::Pests,
            spawned_at: 0.0,
            time_left: 30.0,
        });
        teleport(&mut game, Seat::Two, (1508.0, 1115.0));
        press(&mut game, Seat::Two, interact());
        assert!(game.state().inventory.seat(Seat::Two).open);
        press(
            &mut game,
            Seat::Two,
            OrchardInput {
                select: vec![5],
                ..Default::default()
            },
        );
        assert_eq!(game.state().inventory.selected(Seat::Two), Some(5));

        // Treat it three times.
        teleport(&mut game, Seat::Two, (1553.0, 660.0));
        for round in 1..=3 {
            game.state.seats[1].cycle.problem = Some(Problem {
                kind: ProblemType::Pests,
                spawned_at: 0.0,
                time_left: 30.0,
            });
            let events = press(&mut game, Seat::Two, interact());
            assert!(events.contains(&OrchardEvent::Sound(SoundCue::Spray)));
            if round < 3 {
                assert_eq!(game.state().seat(Seat::Two).cycle.fruit_stage, round);
            }
        }
        let events = game.update(DT);
        assert!(events.contains(&OrchardEvent::FruitDropped { seat: Seat::Two }));
        assert!(game.state().seat(Seat::Two).cycle.last_fruit_appeared);

        // Holding an item blocks the pickup; return it first.
        press(&mut game, Seat::Two, interact());
        assert!(!game.state().seat(Seat::Two).holding_fruit);
        game.state.inventory.return_item(5, Seat::Two, &mut Vec::new());

        let events = press(&mut game, Seat::Two, interact());
        assert!(events.contains(&OrchardEvent::FruitPickedUp { seat: Seat::Two }));
        assert!(game.state().seat(Seat::Two).holding_fruit);

        teleport(&mut game, Seat::Two, (1628.0, 1100.0));
        let events = press(&mut game, Seat::Two, interact());
        assert!(events.contains(&OrchardEvent::Sound(SoundCue::Victory)));
        assert!(events.contains(&OrchardEvent::MatchOver { winner: Seat::Two }));
        assert!(events.contains(&OrchardEvent::VictorySequence));
        assert!(game.is_round_complete());
        assert_eq!(game.state().phase, Phase::GameOver);
        assert_eq!(game.state().seat(Seat::Two).box_state, 1);

        let results = game.round_results();
        assert!(results[1].winner && !results[0].winner);
        assert_eq!(results[1].score, 1);
    }

    #[test]
    fn seat_one_wins_ties() {
        let mut game = started_game(11);
        for seat in Seat::ALL {
            game.state.seats[seat.index()].holding_fruit = true;
            teleport(&mut game, seat, (1628.0, 1100.0));
            game.apply_input(seat, interact());
        }
        let events = game.update(DT);
        let overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, OrchardEvent::MatchOver { .. }))
            .collect();
        assert_eq!(overs, vec![&OrchardEvent::MatchOver { winner: Seat::One }]);
    }

    #[test]
    fn match_over_emitted_once_then_menu() {
        let mut game = started_game(12);
        game.state.seats[0].holding_fruit = true;
        teleport(&mut game, Seat::One, (1628.0, 1100.0));
        press(&mut game, Seat::One, interact());
        assert!(game.is_round_complete());

        let mut all = Vec::new();
        for _ in 0..120 {
            all.extend(game.update(DT));
        }
        assert!(!all.iter().any(|e| matches!(e, OrchardEvent::MatchOver { .. })));
        assert_eq!(
            all.iter()
                .filter(|e| **e == OrchardEvent::StopSound(SoundCue::BackgroundMusic))
                .count(),
            1
        );
        assert!(all.contains(&OrchardEvent::CreditsStarted));

        let events = press(&mut game, Seat::Two, interact());
        assert!(events.contains(&OrchardEvent::Sound(SoundCue::Button)));
        let later = run_game_ticks(&mut game, 30, DT);
        assert!(later.contains(&OrchardEvent::ReturnToMenu));
    }

    #[test]
    fn same_seed_same_inputs_same_state() {
        let run = || {
            let mut game = Orchard::default();
            game.init(&make_players(2), &default_config(99));
            for tick in 0..(60 * 40) {
                for seat in Seat::ALL {
                    let input = bot::generate_bot_input(game.state(), seat, game.config());
                    game.apply_input(seat, input);
                }
                if tick % 7 == 0 {
                    game.apply_input(Seat::Two, interact());
                }
                game.update(DT);
            }
            game.serialize_state()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn fruits_to_win_from_session_config() {
        let mut game = Orchard::default();
        let mut config = default_config(13);
        config
            .custom
            .insert("fruits_to_win".to_string(), serde_json::json!(2));
        game.init(&make_players(2), &config);
        assert_eq!(game.config().max_box_state, 2);
        run_game_ticks(&mut game, 4 * 60 + 10, DT);

        game.state.seats[0].holding_fruit = true;
        teleport(&mut game, Seat::One, (1628.0, 1100.0));
        press(&mut game, Seat::One, interact());
        assert_eq!(game.state().seat(Seat::One).box_state, 1);
        assert!(!game.is_round_complete());

        game.state.seats[0].holding_fruit = true;
        let events = press(&mut game, Seat::One, interact());
        assert!(events.contains(&OrchardEvent::MatchOver { winner: Seat::One }));
    }

    #[test]
    fn events_route_to_mixer() {
        let mut mixer = AudioMixer::new(NullSink, true, true);
        play_event(&mut mixer, &OrchardEvent::VictorySequence);
        assert!(mixer.is_victory_playing());
        play_event(&mut mixer, &OrchardEvent::CreditsStarted);
        assert!(!mixer.is_victory_playing());
    }

    mod proptests {
        use proptest::prelude::*;

        use super::super::*;
        use gardener_core::test_helpers::{default_config, make_players};

        fn arb_input() -> impl Strategy<Value = OrchardInput> {
            (
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                prop::collection::vec(0u8..10, 0..3),
            )
                .prop_map(|(up, down, left, right, interact, select)| OrchardInput {
                    up,
                    down,
                    left,
                    right,
                    interact,
                    select,
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn random_play_keeps_invariants(
                seed in any::<u64>(),
                inputs in prop::collection::vec((arb_input(), arb_input()), 1..400),
            ) {
                let mut game = Orchard::default();
                game.init(&make_players(2), &default_config(seed));
                let mut match_overs = 0;
                for (a, b) in inputs {
                    game.apply_input(Seat::One, a);
                    game.apply_input(Seat::Two, b);
                    for event in game.update(0.05) {
                        if matches!(event, OrchardEvent::MatchOver { .. }) {
                            match_overs += 1;
                        }
                    }
                    let state = game.state();
                    for seat in Seat::ALL {
                        let s = state.seat(seat);
                        prop_assert!(s.cycle.fruit_stage <= game.config().max_fruit_stage);
                        prop_assert!(s.box_state <= game.config().max_box_state);
                        let hb = s.body.hitbox(characters::spec(s.character));
                        for c in game.garden(seat).colliders() {
                            prop_assert!(!c.intersects(&hb));
                        }
                    }
                    for item in &state.inventory.items {
                        prop_assert_eq!(item.available, item.held_by.is_none());
                    }
                }
                prop_assert!(match_overs <= 1);
            }
        }
    }
}
