pub mod document;
pub mod ovp;
pub mod pacing;
pub mod tokenizer;
pub mod unit;

pub use document::Document;
pub use ovp::compute_pivot;
pub use pacing::{compute_duration, wpm_to_milliseconds};
pub use tokenizer::{detect_sentence_boundary, tokenize};
pub use unit::{TrailingPunct, Unit};
