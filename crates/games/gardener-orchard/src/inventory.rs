use serde::{Deserialize, Serialize};

use gardener_core::audio::SoundCue;
use gardener_core::player::Seat;

use crate::config::OrchardConfig;
use crate::problems::ProblemType;

/// Number of item slots on the shared table.
pub const SLOT_COUNT: usize = 8;

/// Problem an item slot treats. The three fertilizer levels all treat
/// `Fertilizing`.
pub fn treats(slot: u8) -> Option<ProblemType> {
    match slot {
        1 => Some(ProblemType::Watering),
        2..=4 => Some(ProblemType::Fertilizing),
        5 => Some(ProblemType::Pests),
        6 => Some(ProblemType::Fungus),
        7 => Some(ProblemType::Virus),
        8 => Some(ProblemType::Tending),
        _ => None,
    }
}

/// Sound played when the item in `slot` is used on a tree.
pub fn use_cue(slot: u8) -> SoundCue {
    match slot {
        1 => SoundCue::WateringCan,
        2..=4 => SoundCue::Mud,
        5..=7 => SoundCue::Spray,
        _ => SoundCue::Prick,
    }
}

pub fn item_name(slot: u8) -> &'static str {
    match slot {
        1 => "watering can",
        2 => "fertilizer (level 1)",
        3 => "fertilizer (level 2)",
        4 => "fertilizer (level 3)",
        5 => "insect spray",
        6 => "fungus spray",
        7 => "virus spray",
        8 => "syringe",
        _ => "nothing",
    }
}

/// First slot that treats `problem`.
pub fn slot_for(problem: ProblemType) -> u8 {
    (1..=SLOT_COUNT as u8)
        .find(|&slot| treats(slot) == Some(problem))
        .unwrap_or(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub slot: u8,
    pub available: bool,
    pub held_by: Option<Seat>,
}

/// Per-seat view of the shared table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatInventory {
    pub open: bool,
    pub selected: Option<u8>,
    /// Seconds the selected item has gone unused.
    pub return_timer: f32,
    /// Remaining pulse time per number key.
    pub pulse_timers: [f32; SLOT_COUNT],
}

impl SeatInventory {
    /// Scale of the number-key label for `slot`, 1.0 when idle.
    pub fn pulse_scale(&self, slot: u8, config: &OrchardConfig) -> f32 {
        let Some(&timer) = self.pulse_timers.get(usize::from(slot).wrapping_sub(1)) else {
            return 1.0;
        };
        if timer <= 0.0 {
            return 1.0;
        }
        let t = (config.pulse_secs - timer) / config.pulse_secs;
        1.0 + (t * std::f32::consts::TAU).sin() * 0.2
    }
}

/// What a seat did with the table this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableInput<'a> {
    pub near_table: bool,
    pub interact: bool,
    /// Number keys pressed since the last tick, oldest first.
    pub select: &'a [u8],
    pub holding_fruit: bool,
}

/// The eight shared items plus each seat's panel state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
    pub seats: [SeatInventory; 2],
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            items: (1..=SLOT_COUNT as u8)
                .map(|slot| InventoryItem {
                    slot,
                    available: true,
                    held_by: None,
                })
                .collect(),
            seats: Default::default(),
        }
    }

    pub fn seat(&self, seat: Seat) -> &SeatInventory {
        &self.seats[seat.index()]
    }

    pub fn selected(&self, seat: Seat) -> Option<u8> {
        self.seats[seat.index()].selected
    }

    fn item_mut(&mut self, slot: u8) -> Option<&mut InventoryItem> {
        self.items.iter_mut().find(|i| i.slot == slot)
    }

    pub fn can_select(&self, slot: u8, seat: Seat) -> bool {
        self.items
            .iter()
            .find(|i| i.slot == slot)
            .is_some_and(|i| i.available && i.held_by != Some(seat.other()))
    }

    /// Take `slot` for `seat` if it is on the table.
    pub fn select(&mut self, slot: u8, seat: Seat) -> bool {
        match self.item_mut(slot) {
            Some(item) if item.available => {
                item.available = false;
                item.held_by = Some(seat);
                self.seats[seat.index()].selected = Some(slot);
                true
            },
            _ => false,
        }
    }

    /// Put `slot` back on the table if `seat` holds it.
    pub fn return_item(&mut self, slot: u8, seat: Seat, cues: &mut Vec<SoundCue>) -> bool {
        match self.item_mut(slot) {
            Some(item) if item.held_by == Some(seat) => {
                item.available = true;
                item.held_by = None;
                self.seats[seat.index()].selected = None;
                cues.push(SoundCue::Button);
                true
            },
            _ => false,
        }
    }

    /// Run one tick of table handling for `seat`: opening and closing the
    /// panel, number keys, pulse animation and the auto-return timer.
    pub fn update_seat(
        &mut self,
        seat: Seat,
        input: TableInput<'_>,
        dt: f32,
        config: &OrchardConfig,
    ) -> Vec<SoundCue> {
        let mut cues = Vec::new();
        let idx = seat.index();

        if input.near_table && input.interact {
            self.seats[idx].open = !self.seats[idx].open;
            cues.push(SoundCue::Opening);
        } else if !input.near_table && self.seats[idx].open {
            self.seats[idx].open = false;
            cues.push(SoundCue::Opening);
        }

        for &slot in input.select {
            if !(1..=SLOT_COUNT as u8).contains(&slot) || !self.seats[idx].open {
                continue;
            }
            self.handle_selection(seat, slot, input.holding_fruit, &mut cues);
            self.seats[idx].pulse_timers[usize::from(slot) - 1] = config.pulse_secs;
        }

        for timer in &mut self.seats[idx].pulse_timers {
            if *timer > 0.0 {
                *timer = (*timer - dt).max(0.0);
            }
        }

        match self.seats[idx].selected {
            Some(slot) if !input.holding_fruit => {
                self.seats[idx].return_timer += dt;
                if self.seats[idx].return_timer >= config.auto_return_secs {
                    tracing::debug!(%seat, slot, item = item_name(slot), "Unused item returned to the table");
                    self.return_item(slot, seat, &mut cues);
                    self.seats[idx].return_timer = 0.0;
                }
            },
            _ => self.seats[idx].return_timer = 0.0,
        }

        cues
    }

    fn handle_selection(
        &mut self,
        seat: Seat,
        slot: u8,
        holding_fruit: bool,
        cues: &mut Vec<SoundCue>,
    ) {
        if holding_fruit {
            return;
        }
        match self.selected(seat) {
            Some(current) if current == slot => {
                self.return_item(slot, seat, cues);
            },
            current => {
                if !self.can_select(slot, seat) {
                    return;
                }
                if let Some(current) = current {
                    self.return_item(current, seat, cues);
                }
                self.select(slot, seat);
                cues.push(SoundCue::Button);
            },
        }
    }
}
