use serde::{Deserialize, Serialize};

use crate::characters::CharacterSpec;
use crate::config::OrchardConfig;

/// Map size in world units (66×37 tiles, trimmed to whole pixels).
pub const MAP_WIDTH: f32 = 3200.0;
pub const MAP_HEIGHT: f32 = 1792.0;

/// Axis-aligned rectangle, top-left origin, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Eight-way facing, in sprite sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    DownRight,
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
}

impl Facing {
    /// Facing for a movement vector (y down). `None` for a zero vector.
    pub fn from_vector(dx: f32, dy: f32) -> Option<Facing> {
        let facing = match (dx.partial_cmp(&0.0)?, dy.partial_cmp(&0.0)?) {
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Equal) => return None,
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Greater) => Facing::Down,
            (std::cmp::Ordering::Greater, std::cmp::Ordering::Greater) => Facing::DownRight,
            (std::cmp::Ordering::Greater, std::cmp::Ordering::Equal) => Facing::Right,
            (std::cmp::Ordering::Greater, std::cmp::Ordering::Less) => Facing::UpRight,
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Less) => Facing::Up,
            (std::cmp::Ordering::Less, std::cmp::Ordering::Less) => Facing::UpLeft,
            (std::cmp::Ordering::Less, std::cmp::Ordering::Equal) => Facing::Left,
            (std::cmp::Ordering::Less, std::cmp::Ordering::Greater) => Facing::DownLeft,
        };
        Some(facing)
    }

    /// Sprite sheet index.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Directional keys held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    fn vector(self) -> Option<(f32, f32)> {
        if !(self.up || self.down || self.left || self.right) {
            return None;
        }
        let dx = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let dy = f32::from(u8::from(self.down)) - f32::from(u8::from(self.up));
        Some((dx, dy))
    }
}

/// A walking character: sprite position, facing and walk animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Sprite top-left corner.
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub anim_frame: f32,
    pub moving: bool,
}

impl Body {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            facing: Facing::Down,
            anim_frame: 0.0,
            moving: false,
        }
    }

    pub fn hitbox_at(&self, x: f32, y: f32, character: &CharacterSpec) -> Rect {
        Rect::new(
            x + character.hitbox_offset.0,
            y + character.hitbox_offset.1,
            character.hitbox_size.0,
            character.hitbox_size.1,
        )
    }

    pub fn hitbox(&self, character: &CharacterSpec) -> Rect {
        self.hitbox_at(self.x, self.y, character)
    }

    /// Point used for all reach checks.
    pub fn feet(&self, character: &CharacterSpec) -> (f32, f32) {
        self.hitbox(character).center()
    }

    /// Move for one tick. Blocked moves slide along whichever axis is free.
    pub fn step(
        &mut self,
        intent: MoveIntent,
        dt: f32,
        colliders: &[Rect],
        character: &CharacterSpec,
        config: &OrchardConfig,
    ) {
        self.moving = false;

        if let Some((dx, dy)) = intent.vector() {
            let len = (dx * dx + dy * dy).sqrt();
            let (dx, dy) = if len > 0.0 { (dx / len, dy / len) } else { (dx, dy) };
            if let Some(facing) = Facing::from_vector(dx, dy) {
                self.facing = facing;
            }

            let dx = dx * config.move_speed * dt;
            let dy = dy * config.move_speed * dt;
            let blocked = |r: Rect| colliders.iter().any(|c| c.intersects(&r));

            let (mut move_x, mut move_y) = (dx, dy);
            if blocked(self.hitbox_at(self.x + dx, self.y + dy, character)) {
                if blocked(self.hitbox_at(self.x + dx, self.y, character)) {
                    move_x = 0.0;
                }
                if blocked(self.hitbox_at(self.x, self.y + dy, character)) {
                    move_y = 0.0;
                }
                // Both axes free on their own but not together: a corner.
                if move_x != 0.0 && move_y != 0.0 {
                    move_y = 0.0;
                }
            }

            if move_x != 0.0 || move_y != 0.0 {
                self.x += move_x;
                self.y += move_y;
                self.moving = true;
                self.anim_frame += config.anim_fps * dt;
                let frames = f32::from(config.anim_frames);
                if self.anim_frame >= frames {
                    self.anim_frame -= frames;
                }
            }
        }

        if !self.moving {
            self.anim_frame = 0.0;
        }

        let (w, h) = character.scaled_frame(self.facing.index());
        self.x = self.x.clamp(0.0, MAP_WIDTH - w);
        self.y = self.y.clamp(0.0, MAP_HEIGHT - h);
    }
}
