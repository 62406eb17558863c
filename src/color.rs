use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA8 color carried as a presentation annotation.
///
/// Colors never enter the stack model; they travel in script payloads and
/// directives only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

// The default palette of the authored scenes.
pub const BLUE: Color = Color::rgb(0x58, 0xC4, 0xDD);
pub const GREEN: Color = Color::rgb(0x83, 0xC1, 0x67);
pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
pub const RED: Color = Color::rgb(0xFC, 0x62, 0x55);
pub const PURPLE: Color = Color::rgb(0x9A, 0x72, 0xAC);
pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const GRAY: Color = Color::rgb(0x88, 0x88, 0x88);

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgb(v[0], v[1], v[2]))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hex_rgb_and_rgba() {
        let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
        assert_eq!(c, Color::rgb(255, 0, 0));

        let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
        assert_eq!(c, Color::rgba(0, 0, 255, 128));
    }

    #[test]
    fn parses_rgba_object_and_array() {
        let c: Color = serde_json::from_value(json!({"r": 10, "g": 20, "b": 30})).unwrap();
        assert_eq!(c, Color::rgb(10, 20, 30));

        let c: Color = serde_json::from_value(json!([10, 20, 30, 40])).unwrap();
        assert_eq!(c, Color::rgba(10, 20, 30, 40));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(serde_json::from_value::<Color>(json!("#f00")).is_err());
        assert!(serde_json::from_value::<Color>(json!("#zzzzzz")).is_err());
    }
}
