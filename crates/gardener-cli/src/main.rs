mod script;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use gardener_core::assets::AssetManifest;
use gardener_core::audio::{AudioError, AudioMixer, AudioSink, SoundCue};
use gardener_core::game_trait::{GameConfig, SplitScreenGame};
use gardener_core::player::{Player, Seat};
use gardener_core::settings::UserSettings;
use gardener_orchard::bot::generate_bot_input;
use gardener_orchard::config::OrchardConfig;
use gardener_orchard::controls::Controls;
use gardener_orchard::{Orchard, OrchardEvent, play_event};

use script::KeyScript;

/// Seconds the end screen keeps running after the match is decided when
/// nobody presses the menu button.
const END_SCREEN_SECS: f32 = 5.0;

/// Audio backend for headless runs: every cue becomes a log line.
struct LogSink {
    assets: AssetManifest,
}

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        let path = self.assets.sound_path(cue);
        tracing::debug!(?cue, volume, path = %path.display(), "Play");
        Ok(())
    }

    fn stop(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        tracing::debug!(?cue, "Stop");
        Ok(())
    }
}

fn arg<T: std::str::FromStr>(prefix: &str) -> Option<T> {
    std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix(prefix).map(String::from))
        .and_then(|v| v.parse::<T>().ok())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = arg::<u64>("--seed=");
    let max_secs = arg::<f32>("--max-secs=").unwrap_or(600.0);
    let script_path = arg::<PathBuf>("--script=");

    let settings = UserSettings::load();
    let orchard_config = OrchardConfig::load();
    let assets = AssetManifest::from_env();
    let missing = assets.verify();
    if !missing.is_empty() {
        tracing::warn!(count = missing.len(), "Running without some assets");
    }

    let mut script = match script_path {
        Some(path) => match KeyScript::load(&path) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(path = %path.display(), "{e}");
                std::process::exit(2);
            },
        },
        None => KeyScript::default(),
    };
    let scripted = Seat::ALL.map(|seat| script.drives(seat));

    let players: Vec<Player> = Seat::ALL
        .into_iter()
        .map(|seat| Player {
            seat,
            display_name: seat.to_string(),
            character: settings.character(seat),
        })
        .collect();

    let mut mixer = AudioMixer::new(
        LogSink { assets },
        settings.music_enabled,
        settings.sound_enabled,
    );
    let mut game = Orchard::with_config(orchard_config);
    let mut controls = Controls::new();
    let config = GameConfig {
        seed,
        ..Default::default()
    };
    game.init(&players, &config);

    let dt = 1.0 / game.tick_rate();
    let mut clock = 0.0_f32;
    let mut decided_at = None;
    tracing::info!(
        name = %game.metadata().name,
        ?seed,
        scripted_seats = ?scripted,
        "Starting match"
    );

    'run: while clock < max_secs {
        script.advance(clock, &mut controls);
        for seat in Seat::ALL {
            let input = if scripted[seat.index()] {
                controls.take_input(seat)
            } else {
                generate_bot_input(game.state(), seat, game.config())
            };
            game.apply_input(seat, input);
        }

        for event in game.update(dt) {
            play_event(&mut mixer, &event);
            match event {
                OrchardEvent::MatchOver { winner } => {
                    tracing::info!(%winner, secs = clock, "Winner decided");
                    decided_at = Some(clock);
                },
                OrchardEvent::ReturnToMenu => break 'run,
                OrchardEvent::ProblemExpired { seat, problem } => {
                    tracing::info!(%seat, ?problem, "Problem expired");
                },
                _ => {},
            }
        }

        clock += dt;
        if let Some(at) = decided_at
            && clock - at >= END_SCREEN_SECS
        {
            break;
        }
    }
    mixer.stop_all();

    if !game.is_round_complete() {
        tracing::warn!(secs = clock, "Match stopped before a winner was decided");
    }
    for score in game.round_results() {
        let marker = if score.winner { " (winner)" } else { "" };
        println!("{}: {} fruit{marker}", score.seat, score.score);
    }
}
