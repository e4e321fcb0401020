//! spr: a terminal RSVP speed reader.
//!
//! Text is tokenized into units, each annotated with a pivot character and a
//! display duration, and a playback controller emits them one at a time to a
//! [`rendering::FrameRenderer`].

pub mod cli;
pub mod engine;
pub mod input;
pub mod playback;
pub mod reading;
pub mod rendering;
pub mod session;
pub mod ui;

pub use engine::error::{Result, SprError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
