use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every sound the game can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    BackgroundMusic,
    Credits,
    Start,
    Victory,
    /// A problem appeared on a tree.
    Error,
    /// A problem timed out.
    Failure,
    WateringCan,
    Mud,
    Spray,
    Prick,
    FruitLifted,
    Opening,
    Button,
}

/// Whether the music toggle or the sound toggle gates a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCategory {
    Music,
    Effect,
}

impl SoundCue {
    pub const ALL: [SoundCue; 13] = [
        SoundCue::BackgroundMusic,
        SoundCue::Credits,
        SoundCue::Start,
        SoundCue::Victory,
        SoundCue::Error,
        SoundCue::Failure,
        SoundCue::WateringCan,
        SoundCue::Mud,
        SoundCue::Spray,
        SoundCue::Prick,
        SoundCue::FruitLifted,
        SoundCue::Opening,
        SoundCue::Button,
    ];

    pub fn category(self) -> SoundCategory {
        match self {
            SoundCue::BackgroundMusic | SoundCue::Credits | SoundCue::Start | SoundCue::Victory => {
                SoundCategory::Music
            },
            _ => SoundCategory::Effect,
        }
    }

    /// Looping tracks keep playing once started; replaying them is a no-op.
    pub fn is_looping(self) -> bool {
        matches!(self, SoundCue::BackgroundMusic | SoundCue::Credits)
    }

    /// File under the audio asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::BackgroundMusic => "backgroundMusic.mp3",
            SoundCue::Credits => "musicForCredits.mp3",
            SoundCue::Start => "start.wav",
            SoundCue::Victory => "soundOfVictory.mp3",
            SoundCue::Error => "soundError.mp3",
            SoundCue::Failure => "soundOfFailure.wav",
            SoundCue::WateringCan => "soundLeica.wav",
            SoundCue::Mud => "soundOfMud.wav",
            SoundCue::Spray => "soundSpray.wav",
            SoundCue::Prick => "theSoundOfAPrick.wav",
            SoundCue::FruitLifted => "theSoundOfFruitBeingLifted.wav",
            SoundCue::Opening => "soundOpening.wav",
            SoundCue::Button => "button.wav",
        }
    }

    /// Playback volume in `0.0..=1.0`.
    pub fn volume(self) -> f32 {
        match self {
            SoundCue::BackgroundMusic => 0.35,
            SoundCue::Error | SoundCue::Failure => 0.63,
            SoundCue::Mud => 0.6,
            _ => 1.0,
        }
    }
}

/// Failure reported by an audio backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioError(pub String);

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audio device error: {}", self.0)
    }
}

impl std::error::Error for AudioError {}

/// Backend that actually makes noise. Playback is fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError>;
    fn stop(&mut self, cue: SoundCue) -> Result<(), AudioError>;
}

/// Sink that drops everything, for tests and muted runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _cue: SoundCue, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self, _cue: SoundCue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Applies the music/sound toggles and loop bookkeeping in front of a sink.
/// Sink errors are logged and swallowed.
pub struct AudioMixer<S: AudioSink> {
    sink: S,
    music_enabled: bool,
    sound_enabled: bool,
    playing_loops: HashSet<SoundCue>,
    victory_playing: bool,
}

impl<S: AudioSink> AudioMixer<S> {
    pub fn new(sink: S, music_enabled: bool, sound_enabled: bool) -> Self {
        Self {
            sink,
            music_enabled,
            sound_enabled,
            playing_loops: HashSet::new(),
            victory_playing: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    fn allowed(&self, cue: SoundCue) -> bool {
        match cue.category() {
            SoundCategory::Music => self.music_enabled,
            SoundCategory::Effect => self.sound_enabled,
        }
    }

    /// Play a cue if its toggle allows it. Returns whether the sink was asked to play.
    pub fn play(&mut self, cue: SoundCue) -> bool {
        if !self.allowed(cue) {
            return false;
        }
        if cue.is_looping() && !self.playing_loops.insert(cue) {
            return false;
        }
        if cue == SoundCue::Victory {
            self.victory_playing = true;
        }
        if let Err(e) = self.sink.play(cue, cue.volume()) {
            tracing::warn!(?cue, "{e}");
            self.playing_loops.remove(&cue);
            return false;
        }
        true
    }

    pub fn stop(&mut self, cue: SoundCue) {
        if cue == SoundCue::Victory && self.victory_playing {
            return;
        }
        self.playing_loops.remove(&cue);
        if let Err(e) = self.sink.stop(cue) {
            tracing::warn!(?cue, "{e}");
        }
    }

    /// Stop the background loop and start the victory fanfare.
    pub fn play_victory_sequence(&mut self) {
        self.stop(SoundCue::BackgroundMusic);
        self.play(SoundCue::Victory);
    }

    /// The backend reports the fanfare has ended.
    pub fn victory_finished(&mut self) {
        self.victory_playing = false;
    }

    pub fn is_victory_playing(&self) -> bool {
        self.victory_playing
    }

    /// Stop everything except a fanfare that is still playing.
    pub fn stop_all(&mut self) {
        for cue in SoundCue::ALL {
            if cue == SoundCue::Victory {
                continue;
            }
            self.stop(cue);
        }
    }
}
