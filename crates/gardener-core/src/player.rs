use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two local players. Seat one plays the left half of the
/// split screen, seat two the right half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::One, Seat::Two];

    /// Zero-based index, usable for per-seat arrays.
    pub const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    /// One-based number as shown to players.
    pub const fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Selectable character sprite set, numbered 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CharacterId(u8);

impl CharacterId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub const ALL: [CharacterId; 3] = [CharacterId(1), CharacterId(2), CharacterId(3)];

    pub fn new(id: u8) -> Result<Self, CharacterError> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(CharacterError::OutOfRange(id))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for CharacterId {
    type Error = CharacterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CharacterId> for u8 {
    fn from(value: CharacterId) -> Self {
        value.0
    }
}

/// Rejected character selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterError {
    OutOfRange(u8),
    AlreadyTaken { character: u8, seat: Seat },
}

impl fmt::Display for CharacterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(id) => write!(
                f,
                "character {id} is out of range ({}..={})",
                CharacterId::MIN,
                CharacterId::MAX
            ),
            Self::AlreadyTaken { character, seat } => {
                write!(f, "character {character} is already taken by {seat}")
            },
        }
    }
}

impl std::error::Error for CharacterError {}

/// A local player taking part in a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub display_name: String,
    pub character: CharacterId,
}
