use gardener_core::player::CharacterId;

/// Sprites are drawn at three times their pixel size.
pub const SPRITE_SCALE: f32 = 3.0;

/// One facing's animation strip: frame size and total sheet width, in
/// unscaled sprite pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
    pub sheet_width: f32,
}

const fn frame(width: f32, height: f32, sheet_width: f32) -> FrameSize {
    FrameSize {
        width,
        height,
        sheet_width,
    }
}

/// Per-character sprite and hitbox data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterSpec {
    /// Collision box offset from the sprite's top-left corner (world units).
    pub hitbox_offset: (f32, f32),
    /// Collision box size (world units).
    pub hitbox_size: (f32, f32),
    /// Frame sizes in facing-index order.
    pub frames: [FrameSize; 8],
}

const CHARACTER_1: CharacterSpec = CharacterSpec {
    hitbox_offset: (7.5, 66.9),
    hitbox_size: (32.01, 15.99),
    frames: [
        frame(16.0, 28.0, 96.0),
        frame(18.0, 28.0, 108.0),
        frame(17.0, 28.0, 102.0),
        frame(16.0, 28.0, 96.0),
        frame(16.0, 28.0, 96.0),
        frame(16.0, 28.0, 96.0),
        frame(17.0, 28.0, 102.0),
        frame(16.0, 28.0, 96.0),
    ],
};

const CHARACTER_2: CharacterSpec = CharacterSpec {
    hitbox_offset: (7.5, 47.1),
    hitbox_size: (32.01, 15.99),
    frames: [
        frame(16.0, 21.0, 96.0),
        frame(18.0, 21.0, 108.0),
        frame(17.0, 21.0, 102.0),
        frame(16.0, 22.0, 96.0),
        frame(16.0, 22.0, 96.0),
        frame(16.0, 22.0, 96.0),
        frame(17.0, 21.0, 102.0),
        frame(18.0, 21.0, 108.0),
    ],
};

const CHARACTER_3: CharacterSpec = CharacterSpec {
    hitbox_offset: (7.5, 48.6),
    hitbox_size: (32.01, 15.99),
    frames: [
        frame(16.0, 22.0, 96.0),
        frame(18.0, 22.0, 108.0),
        frame(17.0, 22.0, 102.0),
        frame(16.0, 23.0, 96.0),
        frame(16.0, 23.0, 96.0),
        frame(16.0, 23.0, 96.0),
        frame(17.0, 22.0, 102.0),
        frame(18.0, 22.0, 108.0),
    ],
};

pub fn spec(character: CharacterId) -> &'static CharacterSpec {
    match character.get() {
        2 => &CHARACTER_2,
        3 => &CHARACTER_3,
        _ => &CHARACTER_1,
    }
}

impl CharacterSpec {
    /// Scaled sprite size for a facing.
    pub fn scaled_frame(&self, facing: usize) -> (f32, f32) {
        let f = self.frames[facing % self.frames.len()];
        (f.width * SPRITE_SCALE, f.height * SPRITE_SCALE)
    }

    /// Frames in one facing's strip.
    pub fn frame_count(&self, facing: usize) -> usize {
        let f = self.frames[facing % self.frames.len()];
        (f.sheet_width / f.width) as usize
    }
}
