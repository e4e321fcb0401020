pub mod input;
pub mod keymap;
pub mod terminal;
pub mod terminal_guard;
pub mod theme;
pub mod view;

pub use input::CommandQueue;
pub use keymap::{map_key, InputEvent};
pub use terminal::{ExitReason, TuiManager};
pub use terminal_guard::{LogPause, TerminalGuard};
pub use theme::Theme;
