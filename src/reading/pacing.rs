use super::tokenizer::core_span;
use super::unit::{TrailingPunct, Unit};
use crate::engine::config::TimingConfig;
use crate::engine::error::{Result, SprError};

/// Milliseconds per word at `wpm`, rounded.
pub fn wpm_to_milliseconds(wpm: u32) -> u64 {
    (60_000.0 / wpm.max(1) as f64).round() as u64
}

pub fn validate_rate(rate_multiplier: f64) -> Result<f64> {
    if rate_multiplier.is_finite() && rate_multiplier > 0.0 {
        Ok(rate_multiplier)
    } else {
        Err(SprError::InvalidRate(rate_multiplier))
    }
}

fn punctuation_multiplier(punct: TrailingPunct, config: &TimingConfig) -> f64 {
    match punct {
        TrailingPunct::Sentence => 1.0 + config.sentence_pause,
        TrailingPunct::Clause => 1.0 + config.clause_pause,
        TrailingPunct::None => 1.0,
    }
}

fn length_multiplier(text: &str, config: &TimingConfig) -> f64 {
    let chars: Vec<char> = text.chars().collect();
    let (start, end) = core_span(&chars);
    let extra_chars = (end - start).saturating_sub(config.long_word_baseline);
    let steps = extra_chars / config.long_word_step.max(1);
    1.0 + config.long_word_bonus * steps as f64
}

/// Display duration of `unit` using the default pacing constants.
pub fn compute_duration(unit: &Unit, base_wpm: u32, rate_multiplier: f64) -> Result<u64> {
    compute_duration_with(unit, base_wpm, rate_multiplier, &TimingConfig::default())
}

/// Display duration of `unit` in milliseconds.
///
/// Base time is `60000 / base_wpm`; sentence and clause punctuation and long
/// words stretch it multiplicatively, then the rate multiplier divides it.
/// The result never drops below `config.min_duration_ms`.
pub fn compute_duration_with(
    unit: &Unit,
    base_wpm: u32,
    rate_multiplier: f64,
    config: &TimingConfig,
) -> Result<u64> {
    let rate = validate_rate(rate_multiplier)?;

    let base_ms = 60_000.0 / base_wpm.max(1) as f64;
    let multiplier = punctuation_multiplier(unit.trailing_punct(), config)
        * length_multiplier(unit.text(), config);

    let duration = (base_ms * multiplier / rate).round() as u64;
    Ok(duration.max(config.min_duration_ms.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::tokenizer::tokenize;

    fn unit(word: &str) -> Unit {
        tokenize(word).remove(0)
    }

    #[test]
    fn test_wpm_to_milliseconds() {
        assert_eq!(wpm_to_milliseconds(300), 200);
        assert_eq!(wpm_to_milliseconds(600), 100);
        // 60,000 / 165 = 363.6 rounds up, not truncates
        assert_eq!(wpm_to_milliseconds(165), 364);
        assert_eq!(wpm_to_milliseconds(0), 60_000);
    }

    #[test]
    fn test_plain_word() {
        assert_eq!(compute_duration(&unit("hello"), 300, 1.0).unwrap(), 200);
    }

    #[test]
    fn test_clause_ending_word() {
        // 200 * 1.15
        assert_eq!(compute_duration(&unit("Hello,"), 300, 1.0).unwrap(), 230);
    }

    #[test]
    fn test_sentence_ending_word() {
        // 200 * 1.3
        assert_eq!(compute_duration(&unit("world."), 300, 1.0).unwrap(), 260);
        assert_eq!(compute_duration(&unit("why?!"), 300, 1.0).unwrap(), 260);
    }

    #[test]
    fn test_abbreviation_gets_no_sentence_pause() {
        assert_eq!(compute_duration(&unit("Dr."), 300, 1.0).unwrap(), 200);
    }

    #[test]
    fn test_long_word_bonus() {
        // 9 letters: below one full step past the baseline
        assert_eq!(compute_duration(&unit("beautiful"), 300, 1.0).unwrap(), 200);
        // 10 letters: one step, +10%
        assert_eq!(compute_duration(&unit("government"), 300, 1.0).unwrap(), 220);
        // 15 letters: two steps, +20%
        assert_eq!(compute_duration(&unit("extraordinarily"), 300, 1.0).unwrap(), 240);
    }

    #[test]
    fn test_bonuses_compose() {
        // 200 * 1.3 * 1.2
        assert_eq!(compute_duration(&unit("extraordinarily."), 300, 1.0).unwrap(), 312);
    }

    #[test]
    fn test_rate_divides_duration() {
        assert_eq!(compute_duration(&unit("hello"), 300, 2.0).unwrap(), 100);
        assert_eq!(compute_duration(&unit("hello"), 300, 0.5).unwrap(), 400);
    }

    #[test]
    fn test_minimum_floor() {
        assert_eq!(compute_duration(&unit("hi"), 1000, 100.0).unwrap(), 30);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = compute_duration(&unit("hello"), 300, rate);
            assert!(matches!(result, Err(SprError::InvalidRate(_))), "rate {}", rate);
        }
    }

    #[test]
    fn test_monotonically_decreasing_in_rate() {
        let word = unit("considerable,");
        let rates = [0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0];
        let durations: Vec<u64> = rates
            .iter()
            .map(|&r| compute_duration(&word, 300, r).unwrap())
            .collect();
        for pair in durations.windows(2) {
            assert!(pair[0] > pair[1], "{:?}", durations);
        }
    }

    #[test]
    fn test_custom_config() {
        let config = TimingConfig {
            clause_pause: 0.5,
            min_duration_ms: 500,
            ..TimingConfig::default()
        };
        assert_eq!(compute_duration_with(&unit("a,"), 300, 1.0, &config).unwrap(), 500);
        assert_eq!(compute_duration_with(&unit("a,"), 100, 1.0, &config).unwrap(), 900);
    }
}
