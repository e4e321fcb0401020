//! Playback: the state machine that turns a document into timed frames.

pub mod command;
pub mod controller;
pub mod frame;
pub mod state;
pub mod timer;

pub use command::Command;
pub use controller::PlaybackController;
pub use frame::Frame;
pub use state::PlaybackState;
pub use timer::{CancellationToken, Timer};
