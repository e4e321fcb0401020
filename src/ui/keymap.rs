//! Key bindings for the reader.

use crate::engine::config::TimingConfig;
use crate::playback::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Playback(Command),
    ToggleHelp,
    /// Esc: closes the help popup, or quits when nothing is open
    Back,
    Quit,
}

/// Rows of the help popup, in display order.
pub const KEY_HELP: &[(&str, &str)] = &[
    ("Space", "Play / Pause"),
    ("← / h", "Back one word"),
    ("→ / l", "Forward one word"),
    ("↓ / j", "Back ten words / help down"),
    ("↑ / k", "Forward ten words / help up"),
    ("[ / ]", "Previous / next sentence"),
    ("+ / -", "Faster / slower rate"),
    ("> / <", "WPM up / down"),
    ("r", "Restart"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

pub fn map_key(key: KeyEvent, timing: &TimingConfig) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(InputEvent::Quit),
            _ => None,
        };
    }

    let wpm_step = timing.wpm_step.min(i32::MAX as u32) as i32;
    let command = match key.code {
        KeyCode::Char('q') => return Some(InputEvent::Quit),
        KeyCode::Esc => return Some(InputEvent::Back),
        KeyCode::Char('?') => return Some(InputEvent::ToggleHelp),
        KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Left | KeyCode::Char('h') => Command::Seek(-1),
        KeyCode::Right | KeyCode::Char('l') => Command::Seek(1),
        KeyCode::Down | KeyCode::Char('j') => Command::Seek(-10),
        KeyCode::Up | KeyCode::Char('k') => Command::Seek(10),
        KeyCode::Char('[') => Command::PreviousSentence,
        KeyCode::Char(']') => Command::NextSentence,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::AdjustRate(timing.rate_step),
        KeyCode::Char('-') => Command::AdjustRate(-timing.rate_step),
        KeyCode::Char('>') => Command::AdjustWpm(wpm_step),
        KeyCode::Char('<') => Command::AdjustWpm(-wpm_step),
        KeyCode::Char('r') => Command::Restart,
        _ => return None,
    };
    Some(InputEvent::Playback(command))
}

/// Scroll step for the help popup: the ten-word seek keys (↑/k, ↓/j) scroll
/// it while it is open. Positive scrolls down.
pub fn help_scroll_step(event: InputEvent) -> Option<i32> {
    match event {
        InputEvent::Playback(Command::Seek(10)) => Some(-1),
        InputEvent::Playback(Command::Seek(-10)) => Some(1),
        _ => None,
    }
}
