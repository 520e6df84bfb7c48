//! Keyboard state for both seats sharing one keyboard.

use gardener_core::keymap::{self, KeyAction};
use gardener_core::player::Seat;

use crate::OrchardInput;

#[derive(Debug, Clone, Copy, Default)]
struct Held {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

/// Tracks held direction keys and one-shot presses per seat.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    held: [Held; 2],
    pressed: [OrchardInput; 2],
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Returns the seat the key belongs to.
    pub fn key_down(&mut self, code: &str) -> Option<Seat> {
        let (seat, action) = keymap::lookup(code)?;
        let i = seat.index();
        match action {
            KeyAction::Up => self.held[i].up = true,
            KeyAction::Down => self.held[i].down = true,
            KeyAction::Left => self.held[i].left = true,
            KeyAction::Right => self.held[i].right = true,
            KeyAction::Interact => self.pressed[i].interact = true,
            KeyAction::Select(slot) => self.pressed[i].select.push(slot),
        }
        Some(seat)
    }

    pub fn key_up(&mut self, code: &str) -> Option<Seat> {
        let (seat, action) = keymap::lookup(code)?;
        let held = &mut self.held[seat.index()];
        match action {
            KeyAction::Up => held.up = false,
            KeyAction::Down => held.down = false,
            KeyAction::Left => held.left = false,
            KeyAction::Right => held.right = false,
            KeyAction::Interact | KeyAction::Select(_) => {},
        }
        Some(seat)
    }

    /// Input for this tick. One-shot presses are consumed.
    pub fn take_input(&mut self, seat: Seat) -> OrchardInput {
        let i = seat.index();
        let held = self.held[i];
        let pressed = std::mem::take(&mut self.pressed[i]);
        OrchardInput {
            up: held.up,
            down: held.down,
            left: held.left,
            right: held.right,
            interact: pressed.interact,
            select: pressed.select,
        }
    }
}
