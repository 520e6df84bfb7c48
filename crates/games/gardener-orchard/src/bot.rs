use gardener_core::player::Seat;

use crate::characters;
use crate::config::OrchardConfig;
use crate::interaction::{self, Reach};
use crate::inventory::{SLOT_COUNT, treats};
use crate::layout::Garden;
use crate::{OrchardInput, OrchardState, Phase, SeatState};

/// Standing spots (feet positions) in front of each landmark.
const TABLE_SPOT: (f32, f32) = (1508.0, 1115.0);
const BOX_SPOT: (f32, f32) = (1628.0, 1100.0);
const TREE_SPOT: (f32, f32) = (1553.0, 660.0);

/// Either end of the walkway between the two beds.
const HUB_ABOVE: (f32, f32) = (1560.0, 950.0);
const HUB_BELOW: (f32, f32) = (1560.0, 1070.0);
const WALKWAY_TOP: f32 = 975.0;
const WALKWAY_BOTTOM: f32 = 1045.0;

/// Per-axis dead zone. Larger than one tick of movement so the bot settles.
const DEAD_ZONE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Orchard,
    Walkway,
    Work,
}

fn region(y: f32) -> Region {
    if y < WALKWAY_TOP {
        Region::Orchard
    } else if y > WALKWAY_BOTTOM {
        Region::Work
    } else {
        Region::Walkway
    }
}

/// Next point to head for on the way from `from` to `target`.
fn waypoint(from: (f32, f32), target: (f32, f32)) -> (f32, f32) {
    let (here, there) = (region(from.1), region(target.1));
    let aligned = (from.0 - HUB_ABOVE.0).abs() <= DEAD_ZONE;
    match (here, there) {
        (a, b) if a == b => target,
        (Region::Walkway, Region::Orchard) => HUB_ABOVE,
        (Region::Walkway, _) => HUB_BELOW,
        (Region::Orchard, _) if aligned => HUB_BELOW,
        (Region::Orchard, _) => HUB_ABOVE,
        (Region::Work, _) if aligned => HUB_ABOVE,
        (Region::Work, _) => HUB_BELOW,
    }
}

fn steer(input: &mut OrchardInput, from: (f32, f32), target: (f32, f32)) {
    let to = waypoint(from, target);
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    input.left = dx < -DEAD_ZONE;
    input.right = dx > DEAD_ZONE;
    input.up = dy < -DEAD_ZONE;
    input.down = dy > DEAD_ZONE;
}

/// At the table: open the panel, then press `slot`.
fn press_at_table(input: &mut OrchardInput, reach: Reach, open: bool, slot: u8) {
    if !reach.table {
        return;
    }
    if open {
        input.select = vec![slot];
    } else {
        input.interact = true;
    }
}

/// Generate a bot input for `seat` from the current match state.
///
/// The bot walks between the tree, the table and the fruit box through the
/// walkway, fetches the item for whatever problem is active, carries fruit to
/// the box and returns items it no longer needs.
pub fn generate_bot_input(state: &OrchardState, seat: Seat, config: &OrchardConfig) -> OrchardInput {
    let mut input = OrchardInput::default();
    if state.phase != Phase::Playing {
        return input;
    }

    let me: &SeatState = state.seat(seat);
    let garden = Garden::for_seat(seat);
    let reach = interaction::reach(me, &garden, config);
    let feet = me.body.feet(characters::spec(me.character));
    let panel = state.inventory.seat(seat);
    let selected = panel.selected;

    if me.holding_fruit {
        steer(&mut input, feet, BOX_SPOT);
        input.interact = reach.fruit_box;
        return input;
    }

    if me.cycle.fruit_on_ground {
        if let Some(slot) = selected {
            steer(&mut input, feet, TABLE_SPOT);
            press_at_table(&mut input, reach, panel.open, slot);
        } else {
            steer(&mut input, feet, TREE_SPOT);
            input.interact = reach.fruit;
        }
        return input;
    }

    if let Some(problem) = me.cycle.problem.as_ref().map(|p| p.kind) {
        if selected.and_then(treats) == Some(problem) {
            steer(&mut input, feet, TREE_SPOT);
            input.interact = reach.tree;
            return input;
        }
        steer(&mut input, feet, TABLE_SPOT);
        let free = (1..=SLOT_COUNT as u8)
            .find(|&slot| treats(slot) == Some(problem) && state.inventory.can_select(slot, seat));
        if let Some(slot) = free {
            press_at_table(&mut input, reach, panel.open, slot);
        }
        return input;
    }

    steer(&mut input, feet, TABLE_SPOT);
    if let Some(slot) = selected {
        press_at_table(&mut input, reach, panel.open, slot);
    }
    input
}
