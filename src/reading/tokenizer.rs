use super::unit::{TrailingPunct, Unit};

const ABBREVIATIONS: &[&str] = &[
    "Dr.", "Mr.", "Mrs.", "Ms.", "St.", "Jr.", "e.g.", "i.e.", "vs.", "etc.",
];

pub(crate) fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

fn punct_weight(c: char) -> TrailingPunct {
    match c {
        '.' | '!' | '?' | '…' | '。' | '！' | '？' => TrailingPunct::Sentence,
        ',' | ';' | ':' | '—' | '–' | '，' | '；' | '：' | '、' => TrailingPunct::Clause,
        _ => TrailingPunct::None,
    }
}

fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(&word)
}

/// Code point range `[start, end)` of the word without its leading and
/// trailing punctuation. Falls back to the whole word when it is all punctuation.
pub(crate) fn core_span(chars: &[char]) -> (usize, usize) {
    let start = chars.iter().take_while(|&&c| is_punctuation(c)).count();
    if start == chars.len() {
        return (0, chars.len());
    }
    let trailing = chars.iter().rev().take_while(|&&c| is_punctuation(c)).count();
    (start, chars.len() - trailing)
}

fn trailing_punct(word: &str) -> TrailingPunct {
    if is_abbreviation(word) {
        return TrailingPunct::None;
    }
    word.chars()
        .rev()
        .take_while(|&c| is_punctuation(c))
        .map(punct_weight)
        .max()
        .unwrap_or(TrailingPunct::None)
}

fn starts_with_uppercase(word: &str) -> bool {
    word.chars()
        .find(|c| !is_punctuation(*c))
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Detects if the current word starts a new sentence based on the previous unit.
/// The first unit always starts a sentence; otherwise the previous unit must end
/// with sentence punctuation and the current word must begin with a capital.
/// Abbreviations never end sentences because they carry no sentence weight.
pub fn detect_sentence_boundary(prev: Option<&Unit>, current_word: &str) -> bool {
    match prev {
        None => true,
        Some(prev) => {
            prev.trailing_punct() == TrailingPunct::Sentence && starts_with_uppercase(current_word)
        }
    }
}

/// Splits raw text into units on whitespace runs.
///
/// Each whitespace-delimited word becomes exactly one unit with its punctuation
/// attached. A blank line also starts a new sentence. Pivot and duration are left
/// unset for the pacing and focus stages.
pub fn tokenize(raw_text: &str) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    let mut paragraph_break = false;

    for line in raw_text.lines() {
        if line.trim().is_empty() {
            paragraph_break = true;
            continue;
        }

        for word in line.split_whitespace() {
            let leading_punct = word.chars().next().map(is_punctuation).unwrap_or(false);
            let sentence_start = paragraph_break || detect_sentence_boundary(units.last(), word);
            paragraph_break = false;

            units.push(Unit::new(
                word,
                leading_punct,
                trailing_punct(word),
                sentence_start,
            ));
        }
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(units: &[Unit]) -> Vec<&str> {
        units.iter().map(|u| u.text()).collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  \n").is_empty());
    }

    #[test]
    fn test_tokenize_single_word() {
        let units = tokenize("hello");
        assert_eq!(texts(&units), vec!["hello"]);
        assert!(!units[0].leading_punct());
        assert_eq!(units[0].trailing_punct(), TrailingPunct::None);
    }

    #[test]
    fn test_tokenize_whitespace_runs() {
        let units = tokenize("  hello \t\t world\n\nagain  ");
        assert_eq!(texts(&units), vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let units = tokenize("Hello, world.");
        assert_eq!(texts(&units), vec!["Hello,", "world."]);
        assert_eq!(units[0].trailing_punct(), TrailingPunct::Clause);
        assert_eq!(units[1].trailing_punct(), TrailingPunct::Sentence);
    }

    #[test]
    fn test_leading_punctuation_flag() {
        let units = tokenize("\"Quoted (aside)");
        assert!(units[0].leading_punct());
        assert!(units[1].leading_punct());
        assert_eq!(units[1].trailing_punct(), TrailingPunct::None);
    }

    #[test]
    fn test_stacked_punctuation_takes_maximum() {
        assert_eq!(tokenize("really?!")[0].trailing_punct(), TrailingPunct::Sentence);
        assert_eq!(tokenize("wait...")[0].trailing_punct(), TrailingPunct::Sentence);
        assert_eq!(tokenize("hello.,")[0].trailing_punct(), TrailingPunct::Sentence);
        assert_eq!(tokenize("said,\"")[0].trailing_punct(), TrailingPunct::Clause);
        assert_eq!(tokenize("end.\"")[0].trailing_punct(), TrailingPunct::Sentence);
    }

    #[test]
    fn test_clause_marks() {
        for word in ["one;", "two:", "three—"] {
            assert_eq!(tokenize(word)[0].trailing_punct(), TrailingPunct::Clause, "{}", word);
        }
    }

    #[test]
    fn test_abbreviations_carry_no_sentence_weight() {
        let units = tokenize("Dr. Smith went to St. Paul.");
        assert_eq!(units[0].trailing_punct(), TrailingPunct::None);
        assert_eq!(units[4].trailing_punct(), TrailingPunct::None);
        assert_eq!(units[5].trailing_punct(), TrailingPunct::Sentence);
        assert!(units[0].is_sentence_start());
        assert!(!units[1].is_sentence_start());
        assert!(!units[5].is_sentence_start());
    }

    #[test]
    fn test_sentence_starts() {
        let units = tokenize("Hello. World? good! Yes");
        assert!(units[0].is_sentence_start());
        assert!(units[1].is_sentence_start());
        assert!(!units[2].is_sentence_start(), "lowercase after ? is not a new sentence");
        assert!(units[3].is_sentence_start());
    }

    #[test]
    fn test_quoted_sentence_start() {
        let units = tokenize("Stop. \"Go now\"");
        assert!(units[1].is_sentence_start());
    }

    #[test]
    fn test_decimal_number_is_not_sentence_end() {
        let units = tokenize("The value is 3.14 today");
        assert_eq!(units[3].trailing_punct(), TrailingPunct::None);
        assert!(!units[4].is_sentence_start());
    }

    #[test]
    fn test_blank_line_starts_sentence() {
        let units = tokenize("Chapter one\n\nthe story begins");
        assert!(units[2].is_sentence_start());
        assert!(!units[1].is_sentence_start());
    }

    #[test]
    fn test_join_preserves_non_whitespace() {
        let inputs = [
            "Hello, world. This is  a\ttest!",
            "  leading and trailing  ",
            "multi\nline\n\ntext with ünïcödé and 日本語",
            "«quotes» (brackets) — dashes…",
        ];
        for input in inputs {
            let joined = tokenize(input)
                .iter()
                .map(|u| u.text())
                .collect::<Vec<_>>()
                .join(" ");
            let expected: String = input.chars().filter(|c| !c.is_whitespace()).collect();
            let actual: String = joined.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_core_span() {
        let chars: Vec<char> = "(word),".chars().collect();
        assert_eq!(core_span(&chars), (1, 5));
        let chars: Vec<char> = "...".chars().collect();
        assert_eq!(core_span(&chars), (0, 3));
        let chars: Vec<char> = "plain".chars().collect();
        assert_eq!(core_span(&chars), (0, 5));
    }

    #[test]
    fn test_is_abbreviation() {
        assert!(is_abbreviation("e.g."));
        assert!(is_abbreviation("Mrs."));
        assert!(!is_abbreviation("hello."));
    }
}
