use crate::engine::config::ThemeConfig;
use log::warn;
use ratatui::style::Color;

/// Colors used by every view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub anchor: Color,
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::midnight()
    }
}

impl Theme {
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38), // #1A1B26 Stormy Dark
            text: Color::Rgb(169, 177, 214),    // #A9B1D6 Light Blue
            anchor: Color::Rgb(247, 118, 142),  // #F7768E Coral Red
            dimmed: Color::Rgb(100, 110, 150),  // #646E96 Dimmed Blue
        }
    }

    /// Builds a theme from config; unparseable colors keep the midnight value.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let fallback = Self::midnight();
        Self {
            background: color_or(&config.background_color, fallback.background),
            text: color_or(&config.text_color, fallback.text),
            anchor: color_or(&config.anchor_color, fallback.anchor),
            dimmed: color_or(&config.dimmed_color, fallback.dimmed),
        }
    }
}

fn color_or(value: &str, fallback: Color) -> Color {
    parse_hex_color(value).unwrap_or_else(|| {
        warn!("Ignoring invalid color {:?}", value);
        fallback
    })
}

/// Parses `#RRGGBB` (the `#` is optional).
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_midnight() {
        assert_eq!(Theme::from_config(&ThemeConfig::default()), Theme::midnight());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#F7768E"), Some(Color::Rgb(247, 118, 142)));
        assert_eq!(parse_hex_color("1a1b26"), Some(Color::Rgb(26, 27, 38)));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#ÿÿÿ"), None);
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let config = ThemeConfig {
            anchor_color: "red-ish".to_string(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.anchor, Theme::midnight().anchor);
    }
}
