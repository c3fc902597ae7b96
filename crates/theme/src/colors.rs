use plotters::style::{RGBAColor, RGBColor};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE:      Self = Self::rgb(255, 255, 255);
    pub const TITLE_BLUE: Self = Self::rgb(44, 44, 144);   // #2c2c90
    pub const GRID:       Self = Self::rgb(220, 220, 220);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
                a: byte(&hex[6..8])?,
            }),
            _ => None,
        }
    }

    /// Opaque plotters colour; alpha is dropped.
    #[inline]
    pub fn to_rgb(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }

    #[inline]
    pub fn to_rgba(self) -> RGBAColor {
        RGBAColor(self.r, self.g, self.b, f64::from(self.a) / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_eight_digit_hex() {
        assert_eq!(Color::from_hex("#2c2c90"), Some(Color::TITLE_BLUE));
        assert_eq!(
            Color::from_hex("d8572a80"),
            Some(Color { r: 216, g: 87, b: 42, a: 128 })
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex(""), None);
        // Six bytes, but not six characters.
        assert_eq!(Color::from_hex("#aébé"), None);
    }

    #[test]
    fn rgba_alpha_is_normalised() {
        let c = Color { r: 1, g: 2, b: 3, a: 255 }.to_rgba();
        assert_eq!((c.0, c.1, c.2), (1, 2, 3));
        assert!((c.3 - 1.0).abs() < f64::EPSILON);
    }
}
