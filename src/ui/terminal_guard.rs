use crossterm::cursor;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::ExecutableCommand;
use log::LevelFilter;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static PANIC_HOOK_SET: Once = Once::new();
static ALTERNATE_SCREEN: AtomicBool = AtomicBool::new(false);

/// Raw mode (and the alternate screen unless inline) for as long as it lives.
pub struct TerminalGuard {
    alternate_screen: bool,
}

impl TerminalGuard {
    pub fn new(inline: bool) -> Result<Self, io::Error> {
        enable_raw_mode()?;
        let alternate_screen = !inline;
        if alternate_screen {
            io::stdout().execute(terminal::EnterAlternateScreen)?;
        }
        io::stdout().execute(cursor::Hide)?;
        ALTERNATE_SCREEN.store(alternate_screen, Ordering::SeqCst);

        set_panic_hook();

        Ok(TerminalGuard { alternate_screen })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = io::stdout().execute(cursor::Show);
        if self.alternate_screen {
            let _ = io::stdout().execute(terminal::LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();
    }
}

fn set_panic_hook() {
    PANIC_HOOK_SET.call_once(|| {
        std::panic::set_hook(Box::new(|panic_info| {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(cursor::Show);
            if ALTERNATE_SCREEN.load(Ordering::SeqCst) {
                let _ = io::stdout().execute(terminal::LeaveAlternateScreen);
            }
            eprintln!("Panic: {}", panic_info);
            std::process::exit(1);
        }));
    });
}

/// Turns logging off while it lives, restoring the previous level on drop.
///
/// Used when log records would go to stderr: anything written there while
/// ratatui owns the screen corrupts the frame.
pub struct LogPause {
    previous: LevelFilter,
}

impl LogPause {
    pub fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(LevelFilter::Off);
        LogPause { previous }
    }
}

impl Default for LogPause {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogPause {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}
