use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::OrchardConfig;
use crate::problems::{Problem, ProblemType, TreeKind};

/// Something that happened to a tree during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    ProblemSpawned(ProblemType),
    ProblemExpired(ProblemType),
    /// A fruit reached full growth and fell. `last` is set when it is the
    /// fruit that will fill the box, after which no more problems appear.
    FruitDropped { last: bool },
}

/// Growth state of one seat's tree: the active problem, the fruit stage and
/// the problem timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeCycle {
    pub tree: TreeKind,
    pub problem: Option<Problem>,
    pub fruit_stage: u8,
    pub fruit_on_ground: bool,
    pub last_fruit_appeared: bool,
    /// Tree clock time at which the next problem appears. `f32::MAX` while
    /// nothing is scheduled.
    pub next_problem_at: f32,
    pub clock: f32,
}

impl TreeCycle {
    pub fn new<R: Rng>(tree: TreeKind, rng: &mut R, config: &OrchardConfig) -> Self {
        let mut cycle = Self {
            tree,
            problem: None,
            fruit_stage: 0,
            fruit_on_ground: false,
            last_fruit_appeared: false,
            next_problem_at: f32::MAX,
            clock: 0.0,
        };
        cycle.schedule_next(rng, config);
        cycle
    }

    fn schedule_next<R: Rng>(&mut self, rng: &mut R, config: &OrchardConfig) {
        let wait = rng.random_range(config.problem_interval_min..=config.problem_interval_max);
        self.next_problem_at = self.clock + wait as f32;
    }

    fn unschedule(&mut self) {
        self.next_problem_at = f32::MAX;
    }

    /// Advance the tree by `dt` seconds.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        box_state: u8,
        rng: &mut R,
        config: &OrchardConfig,
    ) -> Vec<CycleOutcome> {
        let mut outcomes = Vec::new();
        self.clock += dt;
        let max_box = config.max_box_state;

        if self.last_fruit_appeared || box_state >= max_box {
            self.problem = None;
            self.unschedule();
        } else if !self.fruit_on_ground {
            if let Some(problem) = &mut self.problem {
                problem.time_left -= dt;
                // f32 accumulation leaves a residue; expire on the tick
                // nearest the limit.
                if problem.time_left <= dt * 0.5 {
                    let kind = problem.kind;
                    self.problem = None;
                    self.fruit_stage = 0;
                    self.schedule_next(rng, config);
                    outcomes.push(CycleOutcome::ProblemExpired(kind));
                }
            } else if self.clock >= self.next_problem_at {
                let kind = self.tree.roll(rng.random::<f64>());
                self.problem = Some(Problem {
                    kind,
                    spawned_at: self.clock,
                    time_left: config.problem_time_limit,
                });
                self.unschedule();
                outcomes.push(CycleOutcome::ProblemSpawned(kind));
            }
        }

        if self.fruit_stage >= config.max_fruit_stage && !self.fruit_on_ground {
            self.fruit_on_ground = true;
            let last = box_state.saturating_add(1) >= max_box;
            if last {
                self.unschedule();
                self.last_fruit_appeared = true;
            }
            outcomes.push(CycleOutcome::FruitDropped { last });
        }

        outcomes
    }

    /// Grow the fruit one stage, capped at the configured maximum.
    pub fn add_stage(&mut self, config: &OrchardConfig) {
        if self.fruit_stage < config.max_fruit_stage {
            self.fruit_stage += 1;
        }
    }

    pub fn reset_stage(&mut self) {
        self.fruit_stage = 0;
    }

    /// Lifting the fruit off the ground restarts the problem timer.
    pub fn set_fruit_on_ground<R: Rng>(&mut self, value: bool, rng: &mut R, config: &OrchardConfig) {
        self.fruit_on_ground = value;
        if !value && !self.last_fruit_appeared {
            self.schedule_next(rng, config);
        }
    }

    /// Clear the active problem after it was treated.
    pub fn resolve_problem<R: Rng>(&mut self, rng: &mut R, config: &OrchardConfig) {
        self.problem = None;
        if !self.fruit_on_ground && !self.last_fruit_appeared {
            self.schedule_next(rng, config);
        }
    }
}
