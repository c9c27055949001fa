use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Colour theme of the weather app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Pink,
}

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

/// The colour set every rendering function receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub title: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
    pub temperature: Rgb,
    pub accent: Rgb,
    pub error: Rgb,
    pub divider: Rgb,
}

const LIGHT: Palette = Palette {
    background: Rgb::hex(0xFFFFFF),
    title: Rgb::hex(0x1976D2),
    text_primary: Rgb::hex(0x000000),
    text_secondary: Rgb::hex(0x616161),
    temperature: Rgb::hex(0x0D47A1),
    accent: Rgb::hex(0x1976D2),
    error: Rgb::hex(0xD32F2F),
    divider: Rgb::hex(0x90CAF9),
};

const DARK: Palette = Palette {
    background: Rgb::hex(0x121212),
    title: Rgb::hex(0x64B5F6),
    text_primary: Rgb::hex(0xFFFFFF),
    text_secondary: Rgb::hex(0xBDBDBD),
    temperature: Rgb::hex(0x64B5F6),
    accent: Rgb::hex(0x42A5F5),
    error: Rgb::hex(0xE57373),
    divider: Rgb::hex(0x0D47A1),
};

const PINK: Palette = Palette {
    background: Rgb::hex(0xFFF0F5),
    title: Rgb::hex(0xC2185B),
    text_primary: Rgb::hex(0x880E4F),
    text_secondary: Rgb::hex(0xC2185B),
    temperature: Rgb::hex(0xAD1457),
    accent: Rgb::hex(0xD81B60),
    error: Rgb::hex(0xD32F2F),
    divider: Rgb::hex(0xF48FB1),
};

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Pink => "pink",
        }
    }

    /// Light -> Dark -> Pink -> Light.
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Pink,
            Theme::Pink => Theme::Light,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
            Theme::Pink => &PINK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "pink" => Ok(Theme::Pink),
            _ => Err(anyhow::anyhow!("Unknown theme '{s}'. Supported themes: light, dark, pink.")),
        }
    }
}
