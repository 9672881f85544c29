use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::CueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Spin,
    Win,
    Lose,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Spin => "spin",
            Cue::Win => "win",
            Cue::Lose => "lose",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Audio output. `play` restarts the cue from its beginning.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        (**self).play(cue)
    }
}

/// Mute check plus failure swallowing in front of a [`CuePlayer`].
#[derive(Debug)]
pub struct CueGate<P> {
    player: P,
}

impl<P: CuePlayer> CueGate<P> {
    pub fn new(player: P) -> Self {
        Self { player }
    }

    pub fn trigger(&mut self, cue: Cue, muted: bool) {
        if muted {
            return;
        }
        if let Err(err) = self.player.play(cue) {
            warn!(cue = %cue, error = %err, "cue playback failed");
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Remembers every cue it is asked to play. Can be told to fail, in which
/// case the cue is still recorded.
#[derive(Debug, Default, Clone)]
pub struct RecordingCues {
    pub played: Vec<Cue>,
    pub fail: bool,
}

impl RecordingCues {
    pub fn failing() -> Self {
        Self {
            played: Vec::new(),
            fail: true,
        }
    }
}

impl CuePlayer for RecordingCues {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        self.played.push(cue);
        if self.fail {
            return Err(CueError::Unavailable(format!("/sounds/{}.mp3", cue.name())));
        }
        Ok(())
    }
}
