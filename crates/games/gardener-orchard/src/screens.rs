use serde::{Deserialize, Serialize};

use gardener_core::player::Seat;

use crate::config::OrchardConfig;

const COUNTDOWN_LABELS: [&str; 4] = ["3", "2", "1", "GO!"];

/// Seconds the victory fanfare plays before the credits start.
pub const VICTORY_SECS: f32 = 1.0;
/// Winner portrait animation speed.
const PORTRAIT_FRAME_SECS: f32 = 0.1;
const PORTRAIT_FRAMES: u8 = 6;
/// Smallest menu button scale during its press animation.
const BUTTON_PRESSED_SCALE: f32 = 0.95;

/// "3, 2, 1, GO!" shown before play starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub active: bool,
    pub step: u8,
    pub timer: f32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            active: true,
            step: 0,
            timer: 0.0,
        }
    }
}

impl Countdown {
    /// Advance the countdown. Returns true on the tick it finishes.
    pub fn update(&mut self, dt: f32, config: &OrchardConfig) -> bool {
        if !self.active {
            return false;
        }
        self.timer += dt;
        if self.timer >= config.countdown_step_secs {
            self.timer = 0.0;
            self.step += 1;
            if usize::from(self.step) >= COUNTDOWN_LABELS.len() {
                self.active = false;
                return true;
            }
        }
        false
    }

    pub fn label(&self) -> Option<&'static str> {
        if !self.active {
            return None;
        }
        COUNTDOWN_LABELS.get(usize::from(self.step)).copied()
    }

    /// Opacity of the current label: fades in, holds, fades out.
    pub fn alpha(&self, config: &OrchardConfig) -> f32 {
        let fade = config.countdown_fade_secs;
        let step = config.countdown_step_secs;
        if self.timer < fade {
            self.timer / fade
        } else if self.timer > step - fade {
            ((step - self.timer) / fade).max(0.0)
        } else {
            1.0
        }
    }
}

/// Signals from the end screen to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSignal {
    /// The fanfare is over; start the credits music.
    CreditsStarted,
    /// The menu button finished its press animation.
    ReturnToMenu,
}

/// Winner announcement shown after the match is decided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndScreen {
    pub winner: Option<Seat>,
    pub victory_timer: f32,
    pub credits_started: bool,
    pub button_timer: f32,
    pub button_scale: f32,
    pub button_pressed: bool,
    pub portrait_frame: u8,
    portrait_timer: f32,
}

impl EndScreen {
    pub fn is_active(&self) -> bool {
        self.winner.is_some()
    }

    /// Record the winner. Returns false if a winner was already set.
    pub fn set_game_over(&mut self, winner: Seat) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.winner = Some(winner);
        self.victory_timer = VICTORY_SECS;
        self.button_scale = 1.0;
        true
    }

    /// Start the menu button press. Returns false if it was already pressed.
    pub fn press_menu_button(&mut self, config: &OrchardConfig) -> bool {
        if !self.is_active() || self.button_pressed {
            return false;
        }
        self.button_pressed = true;
        self.button_timer = config.menu_button_secs;
        true
    }

    pub fn update(&mut self, dt: f32, config: &OrchardConfig) -> Vec<EndSignal> {
        let mut signals = Vec::new();
        if !self.is_active() {
            return signals;
        }

        if !self.credits_started {
            self.victory_timer -= dt;
            if self.victory_timer <= 0.0 {
                self.credits_started = true;
                signals.push(EndSignal::CreditsStarted);
            }
        }

        if self.button_timer > 0.0 {
            self.button_timer -= dt;
            if self.button_timer <= 0.0 {
                self.button_timer = 0.0;
                self.button_scale = 1.0;
                signals.push(EndSignal::ReturnToMenu);
            } else {
                let t = 1.0 - self.button_timer / config.menu_button_secs;
                let pulse = (t * std::f32::consts::PI).sin();
                self.button_scale = 1.0 - pulse * (1.0 - BUTTON_PRESSED_SCALE);
            }
        }

        self.portrait_timer += dt;
        if self.portrait_timer >= PORTRAIT_FRAME_SECS {
            self.portrait_timer -= PORTRAIT_FRAME_SECS;
            self.portrait_frame = (self.portrait_frame + 1) % PORTRAIT_FRAMES;
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_runs_four_steps() {
        let config = OrchardConfig::default();
        let mut c = Countdown::default();
        let mut labels = Vec::new();
        let mut finished_at = None;
        for tick in 0..300 {
            if let Some(l) = c.label()
                && labels.last() != Some(&l)
            {
                labels.push(l);
            }
            if c.update(0.05, &config) {
                finished_at = Some(tick);
            }
        }
        assert_eq!(labels, vec!["3", "2", "1", "GO!"]);
        assert!(!c.active);
        // 4 steps × 20 ticks, give or take float accumulation.
        let t = finished_at.unwrap();
        assert!((79..=83).contains(&t), "finished at tick {t}");
    }

    #[test]
    fn countdown_fades() {
        let config = OrchardConfig::default();
        let mut c = Countdown::default();
        assert_eq!(c.alpha(&config), 0.0);
        c.timer = 0.15;
        assert!((c.alpha(&config) - 0.5).abs() < 1e-5);
        c.timer = 0.5;
        assert_eq!(c.alpha(&config), 1.0);
        c.timer = 0.85;
        assert!((c.alpha(&config) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn game_over_set_once() {
        let mut end = EndScreen::default();
        assert!(!end.is_active());
        assert!(end.set_game_over(Seat::Two));
        assert!(!end.set_game_over(Seat::One));
        assert_eq!(end.winner, Some(Seat::Two));
    }

    #[test]
    fn credits_follow_fanfare() {
        let config = OrchardConfig::default();
        let mut end = EndScreen::default();
        end.set_game_over(Seat::One);
        assert!(end.update(0.5, &config).is_empty());
        assert_eq!(end.update(0.5, &config), vec![EndSignal::CreditsStarted]);
        assert!(end.update(0.5, &config).is_empty());
    }

    #[test]
    fn menu_button_returns_after_animation() {
        let config = OrchardConfig::default();
        let mut end = EndScreen::default();
        assert!(!end.press_menu_button(&config));
        end.set_game_over(Seat::One);
        end.credits_started = true;
        assert!(end.press_menu_button(&config));
        assert!(!end.press_menu_button(&config));

        assert!(end.update(0.15, &config).is_empty());
        assert!(end.button_scale < 1.0 && end.button_scale > BUTTON_PRESSED_SCALE - 1e-4);
        assert_eq!(end.update(0.2, &config), vec![EndSignal::ReturnToMenu]);
        assert_eq!(end.button_scale, 1.0);
    }

    #[test]
    fn zero_timings_still_finish() {
        let config = OrchardConfig {
            countdown_fade_secs: 0.0,
            countdown_step_secs: 0.0,
            menu_button_secs: 0.0,
            ..Default::default()
        }
        .sanitized();

        let mut c = Countdown::default();
        for timer in [0.0, 0.005, 0.01, 0.02] {
            c.timer = timer;
            let a = c.alpha(&config);
            assert!(a.is_finite() && (0.0..=1.0).contains(&a), "alpha {a} at {timer}");
        }
        let mut finished = false;
        for _ in 0..8 {
            finished |= c.update(1.0 / 60.0, &config);
        }
        assert!(finished);

        let mut end = EndScreen::default();
        end.set_game_over(Seat::One);
        assert!(end.press_menu_button(&config));
        let returned = (0..3)
            .flat_map(|_| end.update(1.0 / 60.0, &config))
            .any(|s| s == EndSignal::ReturnToMenu);
        assert!(returned);
    }
}
