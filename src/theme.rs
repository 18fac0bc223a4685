use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

use crate::artifact_io::read_text_file;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Matrix,
    Ubuntu,
    Dracula,
    Nord,
    Monokai,
}

impl ThemeName {
    pub const ALL: [ThemeName; 6] = [
        Self::Dark,
        Self::Matrix,
        Self::Ubuntu,
        Self::Dracula,
        Self::Nord,
        Self::Monokai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Matrix => "matrix",
            Self::Ubuntu => "ubuntu",
            Self::Dracula => "dracula",
            Self::Nord => "nord",
            Self::Monokai => "monokai",
        }
    }

    /// Case-insensitive lookup against the fixed enumeration.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(name))
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|theme| theme.as_str()).collect()
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::UnknownTheme {
            name: s.to_string(),
            available: Self::names().join(", "),
        })
    }
}

/// Receives theme changes requested by the `theme` command. The interpreter
/// never reads back success or failure.
pub trait ThemeSwitcher {
    fn switch_theme(&mut self, name: ThemeName);
}

/// Discards every switch. Used when nothing needs to observe theme changes.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct NoopThemeSwitcher;

#[cfg(test)]
impl ThemeSwitcher for NoopThemeSwitcher {
    fn switch_theme(&mut self, _name: ThemeName) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(ThemeName::Dark)
    }
}

impl Theme {
    pub fn builtin(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self {
                bg_primary: Color::Rgb(30, 30, 30),
                bg_secondary: Color::Rgb(45, 45, 45),
                text_primary: Color::Rgb(230, 230, 230),
                text_secondary: Color::Rgb(190, 190, 190),
                text_muted: Color::Rgb(128, 128, 128),
                accent: Color::Rgb(78, 201, 176),
                error: Color::Rgb(244, 71, 71),
            },
            ThemeName::Matrix => Self {
                bg_primary: Color::Rgb(0, 0, 0),
                bg_secondary: Color::Rgb(10, 25, 10),
                text_primary: Color::Rgb(0, 255, 65),
                text_secondary: Color::Rgb(0, 200, 50),
                text_muted: Color::Rgb(0, 120, 30),
                accent: Color::Rgb(57, 255, 20),
                error: Color::Rgb(255, 60, 60),
            },
            ThemeName::Ubuntu => Self {
                bg_primary: Color::Rgb(48, 10, 36),
                bg_secondary: Color::Rgb(62, 20, 50),
                text_primary: Color::Rgb(255, 255, 255),
                text_secondary: Color::Rgb(220, 210, 220),
                text_muted: Color::Rgb(170, 150, 165),
                accent: Color::Rgb(138, 226, 52),
                error: Color::Rgb(239, 41, 41),
            },
            ThemeName::Dracula => Self {
                bg_primary: Color::Rgb(40, 42, 54),
                bg_secondary: Color::Rgb(68, 71, 90),
                text_primary: Color::Rgb(248, 248, 242),
                text_secondary: Color::Rgb(220, 220, 210),
                text_muted: Color::Rgb(98, 114, 164),
                accent: Color::Rgb(189, 147, 249),
                error: Color::Rgb(255, 85, 85),
            },
            ThemeName::Nord => Self {
                bg_primary: Color::Rgb(46, 52, 64),
                bg_secondary: Color::Rgb(59, 66, 82),
                text_primary: Color::Rgb(236, 239, 244),
                text_secondary: Color::Rgb(216, 222, 233),
                text_muted: Color::Rgb(118, 128, 148),
                accent: Color::Rgb(136, 192, 208),
                error: Color::Rgb(191, 97, 106),
            },
            ThemeName::Monokai => Self {
                bg_primary: Color::Rgb(39, 40, 34),
                bg_secondary: Color::Rgb(62, 61, 50),
                text_primary: Color::Rgb(248, 248, 242),
                text_secondary: Color::Rgb(220, 220, 205),
                text_muted: Color::Rgb(117, 113, 94),
                accent: Color::Rgb(166, 226, 46),
                error: Color::Rgb(249, 38, 114),
            },
        }
    }
}

/// Palettes for every theme name, optionally patched from a TOML file.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    palettes: HashMap<ThemeName, Theme>,
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self {
            palettes: ThemeName::ALL
                .into_iter()
                .map(|name| (name, Theme::builtin(name)))
                .collect(),
        }
    }
}

impl ThemeCatalog {
    pub fn palette(&self, name: ThemeName) -> Theme {
        self.palettes
            .get(&name)
            .cloned()
            .unwrap_or_else(|| Theme::builtin(name))
    }

    pub fn load_or_builtin(path: impl AsRef<Path>) -> Self {
        let path_ref = path.as_ref();
        match read_text_file(path_ref) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(catalog) => catalog,
                Err(err) => {
                    tracing::warn!(
                        path = %path_ref.display(),
                        error = %err,
                        "failed to parse palette file, using built-in palettes"
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    path = %path_ref.display(),
                    error = %err,
                    "failed to read palette file, using built-in palettes"
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let cfg: PaletteFileToml = toml::from_str(s)?;
        let mut catalog = Self::default();
        for (name, overrides) in cfg.palettes {
            let palette = catalog
                .palettes
                .entry(name)
                .or_insert_with(|| Theme::builtin(name));
            overrides.apply_to(palette);
        }
        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct PaletteFileToml {
    #[serde(default)]
    palettes: HashMap<ThemeName, PaletteToml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PaletteToml {
    bg_primary: Option<RgbToml>,
    bg_secondary: Option<RgbToml>,
    text_primary: Option<RgbToml>,
    text_secondary: Option<RgbToml>,
    text_muted: Option<RgbToml>,
    accent: Option<RgbToml>,
    error: Option<RgbToml>,
}

impl PaletteToml {
    fn apply_to(&self, theme: &mut Theme) {
        let slots = [
            (&self.bg_primary, &mut theme.bg_primary),
            (&self.bg_secondary, &mut theme.bg_secondary),
            (&self.text_primary, &mut theme.text_primary),
            (&self.text_secondary, &mut theme.text_secondary),
            (&self.text_muted, &mut theme.text_muted),
            (&self.accent, &mut theme.accent),
            (&self.error, &mut theme.error),
        ];
        for (value, slot) in slots {
            if let Some(rgb) = value {
                *slot = rgb.to_color();
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RgbToml {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbToml {
    fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}
