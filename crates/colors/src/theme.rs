use crate::{ColorError, Rgb};

pub const THEME_COLOR_IDS: &[&str] = &[
    "white",
    "black",
    "light-gray",
    "blue-gray",
    "blue",
    "orange",
    "gray",
    "gold",
    "light-blue",
    "green",
];

/// Base palette entries a theme-relative color can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    White,
    Black,
    LightGray,
    BlueGray,
    Blue,
    Orange,
    Gray,
    Gold,
    LightBlue,
    Green,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 10] = [
        Self::White,
        Self::Black,
        Self::LightGray,
        Self::BlueGray,
        Self::Blue,
        Self::Orange,
        Self::Gray,
        Self::Gold,
        Self::LightBlue,
        Self::Green,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn id(self) -> &'static str {
        THEME_COLOR_IDS[self.index()]
    }

    pub fn reference(self) -> Rgb {
        match self {
            Self::White => Rgb::new(0xFF, 0xFF, 0xFF),
            Self::Black => Rgb::new(0x00, 0x00, 0x00),
            Self::LightGray => Rgb::new(0xE7, 0xE6, 0xE6),
            Self::BlueGray => Rgb::new(0x44, 0x54, 0x6A),
            Self::Blue => Rgb::new(0x44, 0x72, 0xC4),
            Self::Orange => Rgb::new(0xED, 0x7D, 0x31),
            Self::Gray => Rgb::new(0xA5, 0xA5, 0xA5),
            Self::Gold => Rgb::new(0xFF, 0xC0, 0x00),
            Self::LightBlue => Rgb::new(0x5B, 0x9B, 0xD5),
            Self::Green => Rgb::new(0x70, 0xAD, 0x47),
        }
    }

    /// Most significant byte of the packed theme encoding.
    pub fn theme_byte(self) -> u8 {
        match self {
            Self::White => 0xDD,
            Self::Black => 0xDC,
            Self::LightGray => 0xDF,
            Self::BlueGray => 0xDE,
            Self::Blue => 0xD4,
            Self::Orange => 0xD5,
            Self::Gray => 0xD9,
            Self::Gold => 0xD7,
            Self::LightBlue => 0xD8,
            Self::Green => 0xD6,
        }
    }

    /// Resolves the slot nibble of a theme byte. The high nibble is a context
    /// tag and does not take part in the lookup.
    ///
    /// Nibbles written by [`ThemeColor::theme_byte`] map back to their color.
    /// Any other nibble from 0 to 9 is read as a palette index.
    pub fn from_theme_byte(byte: u8) -> Result<Self, ColorError> {
        let slot = byte & 0x0F;
        Self::ALL
            .into_iter()
            .find(|color| color.theme_byte() & 0x0F == slot)
            .or_else(|| Self::from_index(usize::from(slot)))
            .ok_or(ColorError::UnknownThemeSlot(slot))
    }

    pub fn from_name(name: &str) -> Result<Self, ColorError> {
        let lookup = normalize_lookup(name);
        let color = match lookup.as_str() {
            "white" | "background1" => Self::White,
            "black" | "text1" => Self::Black,
            "lightgray" | "lightgrey" | "background2" => Self::LightGray,
            "bluegray" | "bluegrey" | "text2" => Self::BlueGray,
            "blue" | "accent1" => Self::Blue,
            "orange" | "accent2" => Self::Orange,
            "gray" | "grey" | "accent3" => Self::Gray,
            "gold" | "accent4" => Self::Gold,
            "lightblue" | "accent5" => Self::LightBlue,
            "green" | "accent6" => Self::Green,
            _ => return Err(ColorError::UnknownThemeName(name.to_string())),
        };
        Ok(color)
    }
}

fn normalize_lookup(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
