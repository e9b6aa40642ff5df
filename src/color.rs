// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or parsed from a CSS hex string like the ones in the field's palette

use crate::error::ConfigError;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Accepts #rgb, #rrggbb and #rrggbbaa
    pub fn from_hex(hex: &str) -> Result<Color, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_owned());
        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            3 => {
                // Each nibble doubles up, #0f8 -> #00ff88
                let expand = |n: u32| ((n & 0xf) * 0x11) as u8;
                Ok(Color {
                    r: expand(num >> 8),
                    g: expand(num >> 4),
                    b: expand(num),
                    a: 0xff,
                })
            }
            6 => Ok(Color::from_u32((num << 8) | 0xff)),
            8 => Ok(Color::from_u32(num)),
            _ => Err(invalid()),
        }
    }

    // Canvas style string, alpha is carried separately through global_alpha
    // so only the color's own alpha ends up here
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_hex() {
        let c = Color::from_hex("#00d4ff").unwrap();
        assert_eq!(c, Color { r: 0x00, g: 0xd4, b: 0xff, a: 0xff });
    }

    #[test]
    fn parses_short_hex_and_alpha() {
        assert_eq!(Color::from_hex("#0f8").unwrap(), Color::from_hex("#00ff88").unwrap());
        assert_eq!(Color::from_hex("#ff6b6b80").unwrap().a, 0x80);
    }

    #[test]
    fn rejects_garbage() {
        for bad in &["00ff88", "#12345", "#zzzzzz", "", "#", "#+12"] {
            match Color::from_hex(bad) {
                Err(ConfigError::InvalidColor(s)) => assert_eq!(&s, bad),
                other => panic!("expected InvalidColor for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn css_output() {
        assert_eq!(Color::from_u32(0x00ff88ff).to_css(), "rgba(0, 255, 136, 1)");
        assert_eq!(Color::from_hex("#fff").unwrap().to_css(), "rgba(255, 255, 255, 1)");
    }
}
