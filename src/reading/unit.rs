/// Pause weight carried by the punctuation that trails a unit.
///
/// Ordered so the strongest mark in a run like `word,"` or `end?!` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TrailingPunct {
    #[default]
    None = 0,
    /// `,` `;` `:` and dashes
    Clause = 1,
    /// `.` `!` `?` and ellipsis
    Sentence = 2,
}

impl TrailingPunct {
    pub fn weight(self) -> u8 {
        self as u8
    }
}

/// One displayable word for RSVP reading.
///
/// Attached punctuation stays inside `text`; the tokenizer records it as flags.
/// `pivot_index` and `duration_ms` are zero until the unit is annotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    text: String,
    leading_punct: bool,
    trailing_punct: TrailingPunct,
    sentence_start: bool,
    pivot_index: usize,
    duration_ms: u64,
}

impl Unit {
    pub fn new(
        text: impl Into<String>,
        leading_punct: bool,
        trailing_punct: TrailingPunct,
        sentence_start: bool,
    ) -> Self {
        Self {
            text: text.into(),
            leading_punct,
            trailing_punct,
            sentence_start,
            pivot_index: 0,
            duration_ms: 0,
        }
    }

    /// Returns the annotated copy of this unit.
    pub fn annotated(self, pivot_index: usize, duration_ms: u64) -> Self {
        Self {
            pivot_index,
            duration_ms,
            ..self
        }
    }

    /// Same unit, re-paced.
    pub fn with_duration(&self, duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..self.clone()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in code points.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn leading_punct(&self) -> bool {
        self.leading_punct
    }

    pub fn trailing_punct(&self) -> TrailingPunct {
        self.trailing_punct
    }

    pub fn trailing_punct_weight(&self) -> u8 {
        self.trailing_punct.weight()
    }

    pub fn is_sentence_start(&self) -> bool {
        self.sentence_start
    }

    pub fn pivot_index(&self) -> usize {
        self.pivot_index
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_annotated(&self) -> bool {
        self.duration_ms > 0
    }
}
