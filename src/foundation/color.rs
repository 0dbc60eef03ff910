use std::fmt;

/// Straight (non-premultiplied) RGBA8 color, written as `#RRGGBB` or
/// `#RRGGBBAA` in show files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        if !s.is_ascii() {
            return Err(format!("invalid hex color \"{s}\""));
        }
        match s.len() {
            6 | 8 => {
                let r = hex_byte(&s[0..2])?;
                let g = hex_byte(&s[2..4])?;
                let b = hex_byte(&s[4..6])?;
                let a = if s.len() == 8 { hex_byte(&s[6..8])? } else { 255 };
                Ok(Self { r, g, b, a })
            }
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

/// Show palette.
pub mod palette {
    use super::Rgba8;

    pub const TETO_RED: Rgba8 = Rgba8::rgb(0xFF, 0x7C, 0x7F);
    pub const TETO_RED_DARK: Rgba8 = Rgba8::rgb(0xD8, 0x76, 0x78);
    pub const FG: Rgba8 = Rgba8::rgb(0x47, 0x47, 0x47);
    pub const BG: Rgba8 = Rgba8::rgb(0xF2, 0xEF, 0xF2);
    pub const FLOAT_FG: Rgba8 = Rgba8::rgb(0xDE, 0xDB, 0xDE);
    pub const ROPE: Rgba8 = Rgba8::rgb(0xCD, 0xA4, 0xAB);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
