//! Garden geometry. Both seats play on identical plots laid out in the same
//! world coordinates; only the decorations differ.

use gardener_core::player::Seat;

use crate::characters::SPRITE_SCALE;
use crate::physics::{MAP_HEIGHT, MAP_WIDTH, Rect};

pub const TILE_SIZE: f32 = 48.0;
/// One source-art pixel in world units.
const PX: f32 = TILE_SIZE / 16.0;

const GRASS_TILES_X: i32 = 11;
const GRASS_TILES_Y: i32 = 17;

/// Top-left tile of the grass plot, centred in the map.
fn grass_origin() -> (f32, f32) {
    let tiles_x = (MAP_WIDTH / TILE_SIZE) as i32;
    let tiles_y = (MAP_HEIGHT / TILE_SIZE) as i32;
    (
        ((tiles_x - GRASS_TILES_X) / 2) as f32,
        ((tiles_y - GRASS_TILES_Y) / 2) as f32,
    )
}

/// World position of a point given in plot tiles.
fn tile_pos(tx: f32, ty: f32) -> (f32, f32) {
    let (gx, gy) = grass_origin();
    ((gx + tx) * TILE_SIZE, (gy + ty) * TILE_SIZE)
}

/// Static obstacle with a name for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub name: &'static str,
    pub rect: Rect,
}

/// Everything a seat can walk into or interact with.
#[derive(Debug, Clone)]
pub struct Garden {
    pub obstacles: Vec<Obstacle>,
    colliders: Vec<Rect>,
    pub table: Rect,
    pub fruit_box: Rect,
    /// Where a fully grown fruit lands.
    pub fruit_spot: Rect,
    /// Point near the crown that counts as "at the tree".
    pub tree_point: (f32, f32),
    /// Sprite top-left where the seat's character appears.
    pub spawn: (f32, f32),
}

impl Garden {
    pub fn for_seat(seat: Seat) -> Self {
        let table = {
            let (x, y) = tile_pos(3.0, 14.0);
            Rect::new(x + 0.428 * TILE_SIZE, y - 0.328 * TILE_SIZE, 32.0 * PX, 17.0 * PX)
        };
        let fruit_box = {
            let (x, y) = tile_pos(5.88, 13.91);
            Rect::new(x + 0.428 * TILE_SIZE, y - 0.228 * TILE_SIZE, 20.0 * PX, 17.0 * PX)
        };
        let fruit_spot = {
            let (x, y) = tile_pos(5.0, 3.05);
            Rect::new(x, y, 28.0, 28.0)
        };
        let tree_height = 39.0 * SPRITE_SCALE;
        let tree_point = {
            let (x, y) = tile_pos(4.87, -0.18);
            (x + TILE_SIZE / 2.0, y + 0.86 * TILE_SIZE + tree_height / 2.0)
        };
        let trunk = {
            let (x, y) = tile_pos(4.87, -0.18);
            let (w, h) = (6.0 * SPRITE_SCALE, 25.0 * SPRITE_SCALE);
            let base = y + 0.86 * TILE_SIZE + tree_height;
            Rect::new(x + (TILE_SIZE - w) / 2.0, base - h - 3.0 * SPRITE_SCALE, w, h)
        };

        let mut obstacles = vec![
            Obstacle { name: "table", rect: table },
            Obstacle { name: "tree trunk", rect: trunk },
            Obstacle { name: "fruit box", rect: fruit_box },
        ];
        obstacles.extend(fence());
        obstacles.extend(plot_borders());
        obstacles.extend(decorations(seat));

        let (sx, sy) = tile_pos(2.0, 8.0);
        let colliders = obstacles.iter().map(|o| o.rect).collect();
        Self {
            obstacles,
            colliders,
            table,
            fruit_box,
            fruit_spot,
            tree_point,
            spawn: (sx + 1.5 * TILE_SIZE, sy),
        }
    }

    pub fn colliders(&self) -> &[Rect] {
        &self.colliders
    }
}

fn fence() -> [Obstacle; 4] {
    let (gx, gy) = tile_pos(0.0, 0.0);
    let x = gx + 2.186 * TILE_SIZE;
    let y = gy + 1.05 * TILE_SIZE;
    [
        Obstacle {
            name: "fence left",
            rect: Rect::new(x, y, 10.0 * PX, 235.0 * PX),
        },
        Obstacle {
            name: "fence right",
            rect: Rect::new(x + 96.0 * PX, y, 10.0 * PX, 235.0 * PX),
        },
        Obstacle {
            name: "fence top",
            rect: Rect::new(x + 10.0 * PX, y, 86.0 * PX, 13.0 * PX),
        },
        Obstacle {
            name: "fence bottom",
            rect: Rect::new(x + 10.0 * PX, y + 221.0 * PX, 86.0 * PX, 13.0 * PX),
        },
    ]
}

/// Beds that split the plot into an orchard half and a work half, leaving a
/// walkway in the middle, plus the divider between table and box.
fn plot_borders() -> [Obstacle; 3] {
    let bed = |tx: f32, ty: f32| {
        let (x, y) = tile_pos(tx, ty);
        Rect::new(x, y, 32.0 * PX, 12.0 * PX)
    };
    let (dx, dy) = tile_pos(5.57, 13.668);
    [
        Obstacle {
            name: "left bed",
            rect: bed(2.79, 10.65),
        },
        Obstacle {
            name: "right bed",
            rect: bed(6.22, 10.65),
        },
        Obstacle {
            name: "divider",
            rect: Rect::new(dx, dy, 10.0 * PX, 23.0 * PX),
        },
    ]
}

fn decorations(seat: Seat) -> [Obstacle; 2] {
    let at = |tx: f32, ty: f32, off: (f32, f32), size: (f32, f32)| {
        let (x, y) = tile_pos(tx, ty);
        Rect::new(
            x + off.0 * TILE_SIZE,
            y + off.1 * TILE_SIZE,
            size.0 * SPRITE_SCALE,
            size.1 * SPRITE_SCALE,
        )
    };
    match seat {
        Seat::One => [
            Obstacle {
                name: "bush",
                rect: at(7.0, 2.0, (0.12, 0.32), (26.8, 18.0)),
            },
            Obstacle {
                name: "log",
                rect: at(7.0, 9.0, (0.07, 0.57), (30.0, 19.0)),
            },
        ],
        Seat::Two => [
            Obstacle {
                name: "barrel",
                rect: at(7.0, 2.0, (0.32, 0.24), (21.5, 18.0)),
            },
            Obstacle {
                name: "pond",
                rect: at(7.0, 9.0, (0.11, 0.12), (27.0, 25.0)),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use gardener_core::player::CharacterId;

    use super::*;
    use crate::characters;
    use crate::physics::{Body, distance};

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        distance(a, b) < 0.05
    }

    #[test]
    fn landmarks_at_expected_positions() {
        let g = Garden::for_seat(Seat::One);
        assert!(close(g.tree_point, (1553.76, 571.14)), "{:?}", g.tree_point);
        assert!(close(g.table.center(), (1508.544, 1161.756)), "{:?}", g.table);
        assert!(close(g.fruit_box.center(), (1628.784, 1162.236)), "{:?}", g.fruit_box);
        assert!(close(g.fruit_spot.center(), (1550.0, 640.4)));
        assert!(close(g.spawn, (1464.0, 864.0)));
    }

    #[test]
    fn seats_differ_only_in_decorations() {
        let one = Garden::for_seat(Seat::One);
        let two = Garden::for_seat(Seat::Two);
        assert_eq!(one.obstacles.len(), two.obstacles.len());
        let names = |g: &Garden| g.obstacles.iter().map(|o| o.name).collect::<Vec<_>>();
        assert!(names(&one).contains(&"bush"));
        assert!(names(&two).contains(&"pond"));
        assert_eq!(one.table, two.table);
        assert_eq!(one.tree_point, two.tree_point);
    }

    #[test]
    fn spawn_is_clear_for_every_character() {
        for seat in Seat::ALL {
            let g = Garden::for_seat(seat);
            for id in CharacterId::ALL {
                let body = Body::new(g.spawn.0, g.spawn.1);
                let hb = body.hitbox(characters::spec(id));
                for o in &g.obstacles {
                    assert!(!o.rect.intersects(&hb), "{seat} character {} spawns in {}", id.get(), o.name);
                }
            }
        }
    }
}
