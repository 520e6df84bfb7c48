use std::path::PathBuf;

use crate::audio::SoundCue;
use crate::player::CharacterId;

/// Environment variable overriding the asset root.
pub const ASSETS_ENV: &str = "GARDENER_ASSETS";
pub const DEFAULT_ASSET_ROOT: &str = "assets";

const AUDIO_DIR: &str = "game/musicAndSound";

const TEXTURES: &[&str] = &[
    "game/general/tileGrass.png",
    "game/general/tileWater.png",
    "game/general/tree.png",
    "game/general/fence.png",
    "game/general/apple.png",
    "game/general/pear.png",
    "game/general/fruitShadow.png",
    "game/level1/table1.png",
    "game/level1/boxOfApplesTile.png",
    "game/level1/bush.png",
    "game/level1/brevno.png",
    "game/level2/table2.png",
    "game/level2/boxOfPearsTile.png",
    "game/level2/barrel.png",
    "game/level2/pond.png",
    "game/icons/drop.png",
    "game/icons/1levelFertilizer.png",
    "game/icons/2levelFertilizer.png",
    "game/icons/3levelFertilizer.png",
    "game/icons/crossedOutInsect.png",
    "game/icons/fungus.png",
    "game/icons/virus.png",
    "game/icons/syringe.png",
    "game/startAndEnd/3Start.png",
    "game/startAndEnd/2Start.png",
    "game/startAndEnd/1Start.png",
    "game/startAndEnd/goStart.png",
    "game/startAndEnd/winner.png",
    "game/startAndEnd/glavnoeMenu.png",
];

/// Sprite sheet names for the eight facings, in facing-index order.
pub const FACING_SHEETS: [&str; 8] = [
    "down",
    "downRight",
    "right",
    "upRight",
    "up",
    "upLeft",
    "left",
    "downLeft",
];

/// Every file the game loads, relative to an asset root.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    root: PathBuf,
}

impl AssetManifest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset root from `GARDENER_ASSETS`, else `assets`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(ASSETS_ENV).unwrap_or_else(|_| DEFAULT_ASSET_ROOT.to_string()))
    }

    pub fn sound_path(&self, cue: SoundCue) -> PathBuf {
        self.root.join(AUDIO_DIR).join(cue.file_name())
    }

    pub fn character_sheet(&self, character: CharacterId, facing: usize) -> PathBuf {
        let sheet = FACING_SHEETS[facing % FACING_SHEETS.len()];
        self.root
            .join("game/characters")
            .join(format!("character{}", character.get()))
            .join(format!("{sheet}.png"))
    }

    /// All paths in the manifest.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = TEXTURES.iter().map(|t| self.root.join(t)).collect();
        for character in CharacterId::ALL {
            for facing in 0..FACING_SHEETS.len() {
                paths.push(self.character_sheet(character, facing));
            }
        }
        paths.extend(SoundCue::ALL.iter().map(|cue| self.sound_path(*cue)));
        paths
    }

    /// Check every manifest entry exists. Missing files are logged and
    /// returned; the caller keeps running without them.
    pub fn verify(&self) -> Vec<PathBuf> {
        let missing: Vec<PathBuf> = self.paths().into_iter().filter(|p| !p.is_file()).collect();
        for path in &missing {
            tracing::warn!(path = %path.display(), "Missing asset");
        }
        if missing.is_empty() {
            tracing::info!(root = %self.root.display(), "All assets present");
        }
        missing
    }
}
