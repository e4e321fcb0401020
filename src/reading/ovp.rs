/// OVP (Optimal Viewing Position) pivot calculation
///
/// The pivot sits at roughly 35% of the word so the reader's eye lands slightly
/// left of center. Attached punctuation is not measured: for `"Hello,"` the
/// pivot is placed within `Hello`. Indices are code points, not bytes.
use super::tokenizer::core_span;

/// Fraction of the word length where the pivot lands.
pub const FOCUS_RATIO: f64 = 0.35;

/// Returns the 0-based code point index that should be highlighted.
///
/// Pure and total: the empty string and single characters pivot at 0, and the
/// result is always a valid index for any non-empty `text`.
pub fn compute_pivot(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 1 {
        return 0;
    }

    let (start, end) = core_span(&chars);
    let core_len = end - start;
    if core_len <= 1 {
        return start;
    }

    let offset = (core_len as f64 * FOCUS_RATIO).round() as usize;
    start + offset.min(core_len - 1)
}
