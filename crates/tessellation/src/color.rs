/// An 8 bits per channel RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Color::rgb(0, 0, 0);
    pub const WHITE: Self = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Color::rgba(0, 0, 0, 0);
    pub const RED: Self = Color::rgb(255, 0, 0);
    pub const GREEN: Self = Color::rgb(0, 255, 0);
    pub const BLUE: Self = Color::rgb(0, 0, 255);
    pub const YELLOW: Self = Color::rgb(255, 255, 0);
    pub const GOLD: Self = Color::rgb(255, 215, 0);
    pub const CRIMSON: Self = Color::rgb(220, 20, 60);
    pub const FIRE_BRICK: Self = Color::rgb(178, 34, 34);
    pub const DARK_MAGENTA: Self = Color::rgb(139, 0, 139);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#rgb`, `#rrggbb` and `#rrggbbaa` hexadecimal notations.
    pub fn from_hex(src: &str) -> Option<Self> {
        let hex = src.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();

        match hex.len() {
            3 => Some(Color::rgb(
                channel(0, 1)? * 17,
                channel(1, 1)? * 17,
                channel(2, 1)? * 17,
            )),
            6 => Some(Color::rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            8 => Some(Color::rgba(
                channel(0, 2)?,
                channel(2, 2)?,
                channel(4, 2)?,
                channel(6, 2)?,
            )),
            _ => None,
        }
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Color::rgba(c[0], c[1], c[2], c[3])
    }
}

#[test]
fn parse_hex() {
    assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
    assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
    assert_eq!(Color::from_hex("#00000000"), Some(Color::TRANSPARENT));
    assert_eq!(Color::from_hex("#b22222"), Some(Color::FIRE_BRICK));
    assert_eq!(Color::from_hex("ff0000"), None);
    assert_eq!(Color::from_hex("#ff00"), None);
    assert_eq!(Color::from_hex("#gg0000"), None);
}
