use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::player::{CharacterError, CharacterId, Seat};

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "GARDENER_SETTINGS";
/// Default settings file location.
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.toml";

/// Persisted user preferences: character picks and audio toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub player1_character: CharacterId,
    pub player2_character: CharacterId,
    pub music_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            player1_character: CharacterId::ALL[0],
            player2_character: CharacterId::ALL[1],
            music_enabled: true,
            sound_enabled: true,
        }
    }
}

/// Failure reading or writing the settings file.
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Serialize(toml::ser::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            },
            Self::Serialize(e) => write!(f, "failed to serialize settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(e) => Some(e),
        }
    }
}

impl UserSettings {
    /// Settings path from `GARDENER_SETTINGS`, else the default location.
    pub fn default_path() -> PathBuf {
        std::env::var(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Read settings from `path`. A missing file is a first run and yields
    /// defaults; an unreadable or invalid file is an error.
    pub fn read_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            },
        };
        let mut settings: Self = toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.repair();
        Ok(settings)
    }

    /// Load from the default path, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::read_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{e}, using default settings");
                Self::default()
            },
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let contents = toml::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, contents).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn character(&self, seat: Seat) -> CharacterId {
        match seat {
            Seat::One => self.player1_character,
            Seat::Two => self.player2_character,
        }
    }

    /// Pick a character for `seat`. Both seats must use different characters.
    pub fn select_character(
        &mut self,
        seat: Seat,
        character: CharacterId,
    ) -> Result<(), CharacterError> {
        if self.character(seat.other()) == character {
            return Err(CharacterError::AlreadyTaken {
                character: character.get(),
                seat: seat.other(),
            });
        }
        match seat {
            Seat::One => self.player1_character = character,
            Seat::Two => self.player2_character = character,
        }
        Ok(())
    }

    /// Both seats on the same character can only come from a hand-edited
    /// file; move seat two to the first free character.
    fn repair(&mut self) {
        if self.player1_character != self.player2_character {
            return;
        }
        if let Some(free) = CharacterId::ALL
            .into_iter()
            .find(|c| *c != self.player1_character)
        {
            tracing::warn!(
                character = self.player1_character.get(),
                replacement = free.get(),
                "Both players had the same character, reassigning player 2"
            );
            self.player2_character = free;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "gardener-settings-{}-{name}.toml",
            std::process::id()
        ))
    }

    #[test]
    fn defaults_pick_distinct_characters() {
        let s = UserSettings::default();
        assert_eq!(s.player1_character.get(), 1);
        assert_eq!(s.player2_character.get(), 2);
        assert!(s.music_enabled);
        assert!(s.sound_enabled);
    }

    #[test]
    fn missing_file_is_first_run() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(
            UserSettings::read_from(&path).unwrap(),
            UserSettings::default()
        );
    }

    #[test]
    fn save_then_read() {
        let path = temp_path("save");
        let mut s = UserSettings::default();
        s.music_enabled = false;
        s.select_character(Seat::One, CharacterId::ALL[2]).unwrap();
        s.save_to(&path).unwrap();

        let loaded = UserSettings::read_from(&path).unwrap();
        assert_eq!(loaded, s);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let s: UserSettings = toml::from_str("sound_enabled = false").unwrap();
        assert!(!s.sound_enabled);
        assert!(s.music_enabled);
        assert_eq!(s.player2_character.get(), 2);
    }

    #[test]
    fn invalid_character_is_parse_error() {
        let path = temp_path("invalid");
        std::fs::write(&path, "player1_character = 7").unwrap();
        let err = UserSettings::read_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn cannot_take_other_seats_character() {
        let mut s = UserSettings::default();
        let err = s
            .select_character(Seat::One, s.player2_character)
            .unwrap_err();
        assert_eq!(
            err,
            CharacterError::AlreadyTaken {
                character: 2,
                seat: Seat::Two
            }
        );
        assert_eq!(s.player1_character.get(), 1);
    }

    #[test]
    fn duplicate_characters_are_repaired() {
        let path = temp_path("dup");
        std::fs::write(&path, "player1_character = 3\nplayer2_character = 3").unwrap();
        let s = UserSettings::read_from(&path).unwrap();
        assert_eq!(s.player1_character.get(), 3);
        assert_eq!(s.player2_character.get(), 1);
        let _ = std::fs::remove_file(&path);
    }
}
