//! Keyboard layout for the two seats sharing one keyboard.
//!
//! Key names follow the DOM `KeyboardEvent.code` convention so any frontend
//! can map its own key events onto them.

use crate::player::Seat;

/// What a key does for the seat that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Interact,
    /// Inventory slot 1..=8.
    Select(u8),
}

/// Bindings for one seat.
#[derive(Debug, Clone, Copy)]
pub struct SeatBindings {
    pub up: &'static str,
    pub down: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    pub interact: &'static str,
    pub slots: [&'static str; 8],
}

const SEAT_ONE: SeatBindings = SeatBindings {
    up: "KeyW",
    down: "KeyS",
    left: "KeyA",
    right: "KeyD",
    interact: "KeyE",
    slots: [
        "Digit1", "Digit2", "Digit3", "Digit4", "Digit5", "Digit6", "Digit7", "Digit8",
    ],
};

const SEAT_TWO: SeatBindings = SeatBindings {
    up: "ArrowUp",
    down: "ArrowDown",
    left: "ArrowLeft",
    right: "ArrowRight",
    interact: "Enter",
    slots: [
        "Numpad1", "Numpad2", "Numpad3", "Numpad4", "Numpad5", "Numpad6", "Numpad7", "Numpad8",
    ],
};

pub fn bindings(seat: Seat) -> &'static SeatBindings {
    match seat {
        Seat::One => &SEAT_ONE,
        Seat::Two => &SEAT_TWO,
    }
}

/// Resolve a key code to the seat and action it drives.
pub fn lookup(code: &str) -> Option<(Seat, KeyAction)> {
    Seat::ALL.into_iter().find_map(|seat| {
        let b = bindings(seat);
        let action = if code == b.up {
            KeyAction::Up
        } else if code == b.down {
            KeyAction::Down
        } else if code == b.left {
            KeyAction::Left
        } else if code == b.right {
            KeyAction::Right
        } else if code == b.interact {
            KeyAction::Interact
        } else {
            let slot = b.slots.iter().position(|s| *s == code)?;
            KeyAction::Select(slot as u8 + 1)
        };
        Some((seat, action))
    })
}
