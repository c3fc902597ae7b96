pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::LineStyle;

use chrono::format::{Item, StrftimeItems};
use dash_config::ThemeConfig;
use dash_core::{DashError, Result};

/// Font family used for titles and axis labels.
pub const FONT_FAMILY: &str = "sans-serif";

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background:      Color,
    pub title_color:     Color,
    pub title_font_size: u32,
    /// Axis label size; derived from the title size.
    pub label_font_size: u32,
    pub grid_color:      Color,
    /// `strftime` format string for time-axis labels.
    pub time_format:     String,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    /// Unparsable colours or time formats are configuration errors.
    pub fn from_config(cfg: &ThemeConfig) -> Result<Self> {
        let parse = |field: &str, hex: &str| {
            Color::from_hex(hex)
                .ok_or_else(|| DashError::Config(format!("theme.{field}: invalid colour '{hex}'")))
        };

        if StrftimeItems::new(&cfg.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(DashError::Config(format!(
                "theme.time_format: invalid strftime format '{}'",
                cfg.time_format
            )));
        }

        Ok(Self {
            background:      parse("background", &cfg.background)?,
            title_color:     parse("title_color", &cfg.title_color)?,
            title_font_size: cfg.title_font_size.max(1),
            label_font_size: (cfg.title_font_size * 6 / 7).max(8),
            grid_color:      Color::GRID,
            time_format:     cfg.time_format.clone(),
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background:      Color::WHITE,
            title_color:     Color::TITLE_BLUE,
            title_font_size: 14,
            label_font_size: 12,
            grid_color:      Color::GRID,
            time_format:     "%H:%M:%S".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_compiles_to_default_theme() {
        let theme = Theme::from_config(&ThemeConfig::default()).unwrap();
        let default = Theme::default();
        assert_eq!(theme.background, default.background);
        assert_eq!(theme.title_color, default.title_color);
        assert_eq!(theme.title_font_size, default.title_font_size);
        assert_eq!(theme.label_font_size, default.label_font_size);
        assert_eq!(theme.time_format, default.time_format);
    }

    #[test]
    fn invalid_colour_is_a_config_error() {
        let cfg = ThemeConfig {
            title_color: "blue".into(),
            ..ThemeConfig::default()
        };
        let err = Theme::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("theme.title_color"));
    }

    #[test]
    fn non_ascii_colour_is_a_config_error() {
        let cfg = ThemeConfig {
            background: "#aébé".into(),
            ..ThemeConfig::default()
        };
        let err = Theme::from_config(&cfg).unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
        assert!(err.to_string().contains("theme.background"));
    }

    #[test]
    fn invalid_time_format_is_a_config_error() {
        let cfg = ThemeConfig {
            time_format: "%H:%M:%".into(),
            ..ThemeConfig::default()
        };
        assert!(Theme::from_config(&cfg).is_err());
    }
}
