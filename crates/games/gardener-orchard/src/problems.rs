use serde::{Deserialize, Serialize};

use gardener_core::player::Seat;

/// Tree-care task that blocks fruit growth until resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemType {
    Watering,
    Fertilizing,
    Fungus,
    Pests,
    Virus,
    Tending,
}

impl ProblemType {
    pub const ALL: [ProblemType; 6] = [
        ProblemType::Watering,
        ProblemType::Fertilizing,
        ProblemType::Fungus,
        ProblemType::Pests,
        ProblemType::Virus,
        ProblemType::Tending,
    ];
}

/// An active problem on a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub kind: ProblemType,
    /// Tree clock when the problem appeared.
    pub spawned_at: f32,
    /// Seconds left before it expires.
    pub time_left: f32,
}

/// Which tree a seat tends. The kind only decides how likely each problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeKind {
    Apple,
    Pear,
}

const APPLE_TABLE: [(ProblemType, f64); 6] = [
    (ProblemType::Watering, 0.214),
    (ProblemType::Fungus, 0.214),
    (ProblemType::Fertilizing, 0.143),
    (ProblemType::Pests, 0.143),
    (ProblemType::Virus, 0.143),
    (ProblemType::Tending, 0.143),
];

const PEAR_TABLE: [(ProblemType, f64); 6] = [
    (ProblemType::Tending, 0.214),
    (ProblemType::Pests, 0.214),
    (ProblemType::Watering, 0.143),
    (ProblemType::Fungus, 0.143),
    (ProblemType::Fertilizing, 0.143),
    (ProblemType::Virus, 0.143),
];

impl TreeKind {
    /// Seat one grows apples, seat two pears.
    pub fn for_seat(seat: Seat) -> Self {
        match seat {
            Seat::One => TreeKind::Apple,
            Seat::Two => TreeKind::Pear,
        }
    }

    /// Problem probabilities for this tree, most likely first.
    pub fn table(self) -> &'static [(ProblemType, f64)] {
        match self {
            TreeKind::Apple => &APPLE_TABLE,
            TreeKind::Pear => &PEAR_TABLE,
        }
    }

    /// Result when a roll lands past the table's cumulative total.
    pub fn fallback(self) -> ProblemType {
        self.table()[0].0
    }

    /// Pick a problem from a uniform roll in `[0, 1)`.
    pub fn roll(self, roll: f64) -> ProblemType {
        let mut cumulative = 0.0;
        for &(kind, weight) in self.table() {
            cumulative += weight;
            if roll <= cumulative {
                return kind;
            }
        }
        self.fallback()
    }
}
