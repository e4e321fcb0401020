/// Control requests for the playback controller.
///
/// Input handling never mutates the controller directly: it produces these and
/// the owner of the controller applies them one at a time with
/// `PlaybackController::apply`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    TogglePause,
    /// Move the cursor by this many units
    Seek(isize),
    NextSentence,
    PreviousSentence,
    SetRate(f64),
    /// Step the rate multiplier, clamped to the configured bounds
    AdjustRate(f64),
    SetWpm(u32),
    AdjustWpm(i32),
    /// Reload the current document from the top
    Restart,
}

impl Command {
    /// Commands that reposition the cursor.
    pub fn moves_cursor(&self) -> bool {
        matches!(
            self,
            Command::Seek(_) | Command::NextSentence | Command::PreviousSentence | Command::Restart
        )
    }
}
