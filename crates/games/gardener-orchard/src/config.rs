use serde::{Deserialize, Serialize};

use crate::layout::TILE_SIZE;

/// Environment variable pointing at an orchard config file.
pub const CONFIG_ENV: &str = "GARDENER_ORCHARD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/orchard.toml";
/// Floor for animation and screen timings; several of them are divisors.
const MIN_DURATION: f32 = 0.01;

/// Data-driven configuration for the orchard rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchardConfig {
    /// Shortest wait before a new problem appears (whole seconds).
    pub problem_interval_min: u32,
    /// Longest wait before a new problem appears (whole seconds).
    pub problem_interval_max: u32,
    /// Seconds a problem stays before it expires and the tree loses its progress.
    pub problem_time_limit: f32,
    /// Growth stage at which a fruit drops.
    pub max_fruit_stage: u8,
    /// Fruits needed in a box to win.
    pub max_box_state: u8,
    /// Seconds an unused item stays with a player before returning to the table.
    pub auto_return_secs: f32,
    /// Duration of the number-key pulse animation.
    pub pulse_secs: f32,
    /// Reach for tree, fruit and box interactions, in tiles.
    pub interact_range_tiles: f32,
    /// Reach for opening the inventory table, in tiles.
    pub table_range_tiles: f32,
    /// Walking speed (units/s).
    pub move_speed: f32,
    /// Walk animation speed (frames/s).
    pub anim_fps: f32,
    /// Frames in a walk cycle.
    pub anim_frames: u8,
    /// Length of each countdown step ("3", "2", "1", "GO!").
    pub countdown_step_secs: f32,
    /// Fade in and fade out time within a countdown step.
    pub countdown_fade_secs: f32,
    /// Press animation of the end screen menu button.
    pub menu_button_secs: f32,
    /// Seed used when the session does not supply one.
    pub seed: u64,
}

impl Default for OrchardConfig {
    fn default() -> Self {
        Self {
            problem_interval_min: 8,
            problem_interval_max: 12,
            problem_time_limit: 30.0,
            max_fruit_stage: 3,
            max_box_state: 1,
            auto_return_secs: 20.0,
            pulse_secs: 0.5,
            interact_range_tiles: 2.0,
            table_range_tiles: 1.15,
            move_speed: 150.0,
            anim_fps: 12.0,
            anim_frames: 6,
            countdown_step_secs: 1.0,
            countdown_fade_secs: 0.3,
            menu_button_secs: 0.3,
            seed: 0x0067_6172_6465_6e00,
        }
    }
}

impl OrchardConfig {
    /// Load config from `GARDENER_ORCHARD_CONFIG` or `config/orchard.toml`.
    /// Falls back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<OrchardConfig>(&content) {
                Ok(cfg) => cfg.sanitized(),
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    OrchardConfig::default()
                },
            },
            Err(_) => OrchardConfig::default(),
        }
    }

    /// Fix values that would make the rules meaningless.
    pub fn sanitized(mut self) -> Self {
        if self.problem_interval_min > self.problem_interval_max {
            tracing::warn!(
                min = self.problem_interval_min,
                max = self.problem_interval_max,
                "Problem interval min exceeds max, swapping"
            );
            std::mem::swap(
                &mut self.problem_interval_min,
                &mut self.problem_interval_max,
            );
        }
        self.max_fruit_stage = self.max_fruit_stage.max(1);
        self.max_box_state = self.max_box_state.max(1);
        self.anim_frames = self.anim_frames.max(1);
        self.pulse_secs = self.pulse_secs.max(MIN_DURATION);
        self.countdown_step_secs = self.countdown_step_secs.max(MIN_DURATION);
        self.countdown_fade_secs = self.countdown_fade_secs.max(MIN_DURATION);
        self.menu_button_secs = self.menu_button_secs.max(MIN_DURATION);
        self
    }

    pub fn interact_range(&self) -> f32 {
        self.interact_range_tiles * TILE_SIZE
    }

    pub fn table_range(&self) -> f32 {
        self.table_range_tiles * TILE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rules() {
        let c = OrchardConfig::default();
        assert_eq!((c.problem_interval_min, c.problem_interval_max), (8, 12));
        assert_eq!(c.problem_time_limit, 30.0);
        assert_eq!(c.max_fruit_stage, 3);
        assert_eq!(c.max_box_state, 1);
        assert_eq!(c.interact_range(), 96.0);
        assert!((c.table_range() - 55.2).abs() < 1e-3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: OrchardConfig = toml::from_str("max_box_state = 3\nmove_speed = 200.0").unwrap();
        assert_eq!(c.max_box_state, 3);
        assert_eq!(c.move_speed, 200.0);
        assert_eq!(c.problem_time_limit, 30.0);
    }

    #[test]
    fn sanitize_swaps_interval() {
        let c = OrchardConfig {
            problem_interval_min: 15,
            problem_interval_max: 5,
            max_box_state: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!((c.problem_interval_min, c.problem_interval_max), (5, 15));
        assert_eq!(c.max_box_state, 1);
    }

    #[test]
    fn sanitize_floors_zero_durations() {
        let c = OrchardConfig {
            countdown_step_secs: 0.0,
            countdown_fade_secs: 0.0,
            menu_button_secs: -1.0,
            pulse_secs: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        for secs in [
            c.countdown_step_secs,
            c.countdown_fade_secs,
            c.menu_button_secs,
            c.pulse_secs,
        ] {
            assert!(secs > 0.0, "{secs}");
        }
        // Sane values pass through untouched.
        assert_eq!(OrchardConfig::default().sanitized().countdown_fade_secs, 0.3);
    }
}
