use std::fmt;

/// Playback lifecycle.
///
/// `Stopped` after a load, `Playing` ⇄ `Paused` while reading, `Finished` once
/// the last unit has been emitted. Only a reload leaves `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Finished,
}

impl PlaybackState {
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Stopped => "STOPPED",
            PlaybackState::Playing => "READING",
            PlaybackState::Paused => "PAUSED",
            PlaybackState::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
