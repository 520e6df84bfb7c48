use rand::Rng;

use gardener_core::audio::SoundCue;

use crate::SeatState;
use crate::characters;
use crate::config::OrchardConfig;
use crate::inventory::{treats, use_cue};
use crate::layout::Garden;
use crate::physics::distance;
use crate::problems::ProblemType;

/// Result of a successful interact press away from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Treated { problem: ProblemType, slot: u8 },
    PickedUp,
    /// `filled` is set when this fruit filled the box.
    Deposited { box_state: u8, filled: bool },
}

/// What the seat can reach from where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reach {
    pub tree: bool,
    pub fruit: bool,
    pub fruit_box: bool,
    pub table: bool,
}

pub fn reach(seat: &SeatState, garden: &Garden, config: &OrchardConfig) -> Reach {
    let feet = seat.body.feet(characters::spec(seat.character));
    let range = config.interact_range();
    Reach {
        tree: distance(feet, garden.tree_point) <= range,
        fruit: distance(feet, garden.fruit_spot.center()) <= range,
        fruit_box: distance(feet, garden.fruit_box.center()) <= range,
        table: distance(feet, garden.table.center()) <= config.table_range(),
    }
}

/// Handle an interact press. Treating the tree wins over picking up fruit,
/// which wins over depositing.
pub fn interact<R: Rng>(
    seat: &mut SeatState,
    reach: Reach,
    selected: Option<u8>,
    rng: &mut R,
    config: &OrchardConfig,
    cues: &mut Vec<SoundCue>,
) -> Option<Interaction> {
    if reach.tree
        && !seat.holding_fruit
        && let Some(slot) = selected
        && let Some(problem) = seat.cycle.problem.as_ref().map(|p| p.kind)
        && treats(slot) == Some(problem)
    {
        cues.push(use_cue(slot));
        seat.cycle.add_stage(config);
        seat.cycle.resolve_problem(rng, config);
        return Some(Interaction::Treated { problem, slot });
    }

    if reach.fruit && seat.cycle.fruit_on_ground && !seat.holding_fruit && selected.is_none() {
        seat.holding_fruit = true;
        seat.cycle.set_fruit_on_ground(false, rng, config);
        seat.cycle.reset_stage();
        cues.push(SoundCue::FruitLifted);
        return Some(Interaction::PickedUp);
    }

    if reach.fruit_box && seat.holding_fruit {
        cues.push(SoundCue::Opening);
        let mut filled = false;
        if seat.box_state < config.max_box_state {
            seat.box_state += 1;
            if seat.box_state == config.max_box_state {
                filled = true;
                cues.push(SoundCue::Victory);
            }
        }
        seat.holding_fruit = false;
        return Some(Interaction::Deposited {
            box_state: seat.box_state,
            filled,
        });
    }

    None
}
