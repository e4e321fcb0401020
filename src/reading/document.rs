use super::ovp::compute_pivot;
use super::pacing::compute_duration_with;
use super::tokenizer::tokenize;
use super::unit::Unit;
use crate::engine::config::TimingConfig;
use crate::engine::error::Result;

/// Annotated units plus a reading cursor.
///
/// The cursor is the index of the last emitted unit; `-1` means nothing has
/// been shown yet. It always satisfies `-1 <= cursor < len`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    units: Vec<Unit>,
    cursor: isize,
}

/// Fills in pivot and duration for freshly tokenized units.
pub fn annotate(
    units: Vec<Unit>,
    base_wpm: u32,
    rate_multiplier: f64,
    config: &TimingConfig,
) -> Result<Vec<Unit>> {
    units
        .into_iter()
        .map(|unit| {
            let duration = compute_duration_with(&unit, base_wpm, rate_multiplier, config)?;
            let pivot = compute_pivot(unit.text());
            Ok(unit.annotated(pivot, duration))
        })
        .collect()
}

impl Document {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units, cursor: -1 }
    }

    /// Tokenizes and annotates `text` in one go.
    pub fn from_text(
        text: &str,
        base_wpm: u32,
        rate_multiplier: f64,
        config: &TimingConfig,
    ) -> Result<Self> {
        let units = annotate(tokenize(text), base_wpm, rate_multiplier, config)?;
        Ok(Self::new(units))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Unit at the cursor, `None` before the first emission.
    pub fn current(&self) -> Option<&Unit> {
        usize::try_from(self.cursor).ok().and_then(|i| self.units.get(i))
    }

    /// Index of the unit that would be emitted next.
    pub fn next_index(&self) -> Option<usize> {
        let next = (self.cursor + 1) as usize;
        (next < self.units.len()).then_some(next)
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 >= self.units.len() as isize
    }

    /// Moves the cursor, clamped to `[-1, len - 1]`. Returns the new cursor.
    pub fn set_cursor(&mut self, cursor: isize) -> isize {
        let max = self.units.len() as isize - 1;
        self.cursor = cursor.clamp(-1, max.max(-1));
        self.cursor
    }

    pub fn rewind(&mut self) {
        self.cursor = -1;
    }

    /// Re-paces every unit after the cursor; emitted units keep their durations.
    pub fn repace(&mut self, base_wpm: u32, rate_multiplier: f64, config: &TimingConfig) -> Result<()> {
        let start = (self.cursor + 1) as usize;
        let mut repaced = Vec::with_capacity(self.units.len().saturating_sub(start));
        for unit in &self.units[start..] {
            let duration = compute_duration_with(unit, base_wpm, rate_multiplier, config)?;
            repaced.push(unit.with_duration(duration));
        }
        self.units.truncate(start);
        self.units.extend(repaced);
        Ok(())
    }

    /// First sentence start strictly after the unit that would be shown next.
    pub fn find_next_sentence_start(&self) -> Option<usize> {
        let start = (self.cursor + 2) as usize;
        if start >= self.units.len() {
            return None;
        }
        self.units[start..]
            .iter()
            .position(|unit| unit.is_sentence_start())
            .map(|pos| pos + start)
    }

    /// Start of the sentence containing the current unit, or of the previous
    /// one when the current unit already starts a sentence.
    pub fn find_previous_sentence_start(&self) -> Option<usize> {
        if self.cursor <= 0 {
            return None;
        }
        let end = self.cursor as usize;
        self.units[..end]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, unit)| unit.is_sentence_start())
            .map(|(idx, _)| idx)
    }

    /// Dimmed neighbours for display: up to `window` units before and after the cursor.
    pub fn context(&self, window: usize) -> (&[Unit], &[Unit]) {
        let Some(current) = usize::try_from(self.cursor).ok() else {
            let end = window.min(self.units.len());
            return (&[], &self.units[..end]);
        };
        let start = current.saturating_sub(window);
        let end = (current + window + 1).min(self.units.len());
        (&self.units[start..current], &self.units[current + 1..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::from_text(text, 300, 1.0, &TimingConfig::default()).unwrap()
    }

    #[test]
    fn test_from_text_annotates_every_unit() {
        let document = doc("The quick, brown fox.");
        assert_eq!(document.len(), 4);
        assert_eq!(document.cursor(), -1);
        for unit in document.units() {
            assert!(unit.duration_ms() > 0);
            assert!(unit.pivot_index() < unit.char_count());
        }
        assert_eq!(document.units()[1].duration_ms(), 230);
    }

    #[test]
    fn test_empty_document() {
        let document = doc("   ");
        assert!(document.is_empty());
        assert_eq!(document.next_index(), None);
        assert!(document.is_at_end());
        assert!(document.current().is_none());
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut document = doc("one two three");
        assert_eq!(document.set_cursor(-5), -1);
        assert_eq!(document.set_cursor(1), 1);
        assert_eq!(document.current().unwrap().text(), "two");
        assert_eq!(document.set_cursor(99), 2);
        assert!(document.is_at_end());
    }

    #[test]
    fn test_set_cursor_on_empty_document() {
        let mut document = doc("");
        assert_eq!(document.set_cursor(3), -1);
    }

    #[test]
    fn test_next_index() {
        let mut document = doc("one two");
        assert_eq!(document.next_index(), Some(0));
        document.set_cursor(0);
        assert_eq!(document.next_index(), Some(1));
        document.set_cursor(1);
        assert_eq!(document.next_index(), None);
    }

    #[test]
    fn test_repace_only_touches_pending_units() {
        let mut document = doc("one two three");
        document.set_cursor(0);
        document.repace(300, 2.0, &TimingConfig::default()).unwrap();
        assert_eq!(document.units()[0].duration_ms(), 200);
        assert_eq!(document.units()[1].duration_ms(), 100);
        assert_eq!(document.units()[2].duration_ms(), 100);
        assert_eq!(document.len(), 3);
    }

    #[test]
    fn test_find_next_sentence_start() {
        let mut document = doc("First sentence. Second sentence. Third one.");
        assert_eq!(document.find_next_sentence_start(), Some(2));
        document.set_cursor(2);
        assert_eq!(document.find_next_sentence_start(), Some(4));
        document.set_cursor(4);
        assert_eq!(document.find_next_sentence_start(), None);
    }

    #[test]
    fn test_find_previous_sentence_start() {
        let mut document = doc("First sentence. Second sentence here.");
        document.set_cursor(4);
        assert_eq!(document.find_previous_sentence_start(), Some(2));
        document.set_cursor(2);
        assert_eq!(document.find_previous_sentence_start(), Some(0));
        document.set_cursor(0);
        assert_eq!(document.find_previous_sentence_start(), None);
    }

    #[test]
    fn test_context_window() {
        let mut document = doc("a b c d e f g");
        document.set_cursor(3);
        let (left, right) = document.context(2);
        let left: Vec<&str> = left.iter().map(|u| u.text()).collect();
        let right: Vec<&str> = right.iter().map(|u| u.text()).collect();
        assert_eq!(left, vec!["b", "c"]);
        assert_eq!(right, vec!["e", "f"]);
    }

    #[test]
    fn test_context_before_start() {
        let document = doc("a b c");
        let (left, right) = document.context(2);
        assert!(left.is_empty());
        assert_eq!(right.len(), 2);
    }
}
