#![forbid(unsafe_code)]

//! Color types and downgrade utilities.

use std::fmt::{self, Write as _};

use panelkit_core::ColorSystem;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived luminance (BT.709) as a `u8` (0 = black, 255 = white).
    #[must_use]
    pub fn luminance_u8(self) -> u8 {
        let r = self.r as u32;
        let g = self.g as u32;
        let b = self.b as u32;
        let luma = 2126 * r + 7152 * g + 722 * b;
        ((luma + 5000) / 10_000) as u8
    }

    /// Whether the unweighted channel mean is above the midpoint.
    ///
    /// Used to tell light color styles from dark ones.
    #[must_use]
    pub fn is_light(self) -> bool {
        let sum = self.r as u32 + self.g as u32 + self.b as u32;
        sum * 2 > 3 * 255
    }
}

/// CSS hex notation, `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// ANSI 16-color indices (0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ansi16 {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl Ansi16 {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert an index to a variant, `None` if out of range.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Black),
            1 => Some(Self::Red),
            2 => Some(Self::Green),
            3 => Some(Self::Yellow),
            4 => Some(Self::Blue),
            5 => Some(Self::Magenta),
            6 => Some(Self::Cyan),
            7 => Some(Self::White),
            8 => Some(Self::BrightBlack),
            9 => Some(Self::BrightRed),
            10 => Some(Self::BrightGreen),
            11 => Some(Self::BrightYellow),
            12 => Some(Self::BrightBlue),
            13 => Some(Self::BrightMagenta),
            14 => Some(Self::BrightCyan),
            15 => Some(Self::BrightWhite),
            _ => None,
        }
    }
}

/// A color value at varying fidelity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb(Rgb),
    Ansi256(u8),
    Ansi16(Ansi16),
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// RGB triplet regardless of fidelity level.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Ansi256(idx) => ansi256_to_rgb(idx),
            Self::Ansi16(color) => ansi16_to_rgb(color),
        }
    }

    /// Downgrade this color to fit the given color system.
    ///
    /// Colors never get upgraded: an `Ansi16` color stays `Ansi16` under
    /// `AnsiRgb`, so the terminal palette still applies.
    #[must_use]
    pub fn downgrade(self, system: ColorSystem) -> Self {
        match system {
            ColorSystem::AnsiRgb => self,
            ColorSystem::Ansi256 => match self {
                Self::Rgb(rgb) => Self::Ansi256(rgb_to_256(rgb.r, rgb.g, rgb.b)),
                _ => self,
            },
            ColorSystem::Ansi16 => match self {
                Self::Rgb(rgb) => Self::Ansi16(rgb_to_ansi16(rgb.r, rgb.g, rgb.b)),
                Self::Ansi256(idx) => Self::Ansi16(rgb_to_ansi16_from_ansi256(idx)),
                Self::Ansi16(_) => self,
            },
        }
    }

    /// Append the SGR parameters selecting this color, without the
    /// surrounding `ESC [` and `m`.
    pub fn write_sgr(self, out: &mut String, background: bool) {
        // Writing to a String cannot fail.
        let _ = match self {
            Self::Ansi16(color) => {
                let idx = color.as_u8();
                let base = match (background, idx < 8) {
                    (false, true) => 30,
                    (false, false) => 90 - 8,
                    (true, true) => 40,
                    (true, false) => 100 - 8,
                };
                write!(out, "{}", base + idx as u16)
            }
            Self::Ansi256(idx) => write!(out, "{};5;{idx}", if background { 48 } else { 38 }),
            Self::Rgb(rgb) => write!(
                out,
                "{};2;{};{};{}",
                if background { 48 } else { 38 },
                rgb.r,
                rgb.g,
                rgb.b
            ),
        };
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Ansi16> for Color {
    fn from(color: Ansi16) -> Self {
        Self::Ansi16(color)
    }
}

const ANSI16_PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // Black
    Rgb::new(128, 0, 0),     // Red
    Rgb::new(0, 128, 0),     // Green
    Rgb::new(128, 128, 0),   // Yellow
    Rgb::new(0, 0, 128),     // Blue
    Rgb::new(128, 0, 128),   // Magenta
    Rgb::new(0, 128, 128),   // Cyan
    Rgb::new(192, 192, 192), // White
    Rgb::new(128, 128, 128), // Bright Black
    Rgb::new(255, 0, 0),     // Bright Red
    Rgb::new(0, 255, 0),     // Bright Green
    Rgb::new(255, 255, 0),   // Bright Yellow
    Rgb::new(0, 0, 255),     // Bright Blue
    Rgb::new(255, 0, 255),   // Bright Magenta
    Rgb::new(0, 255, 255),   // Bright Cyan
    Rgb::new(255, 255, 255), // Bright White
];

/// Canonical RGB value of an ANSI 16-color entry.
#[must_use]
pub fn ansi16_to_rgb(color: Ansi16) -> Rgb {
    ANSI16_PALETTE[color.as_u8() as usize]
}

/// Nearest ANSI 256-color index.
#[must_use]
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        let idx = ((r - 8) / 10).min(23);
        return 232 + idx;
    }

    16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
}

/// Nearest level of the 6x6x6 cube `[0, 95, 135, 175, 215, 255]`.
///
/// The levels are not evenly spaced, so the thresholds are the midpoints
/// between neighbours.
fn cube_index(v: u8) -> u8 {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v - 35) / 40
    }
}

/// RGB value of an ANSI 256-color index.
#[must_use]
pub fn ansi256_to_rgb(index: u8) -> Rgb {
    if index < 16 {
        return ANSI16_PALETTE[index as usize];
    }
    if index >= 232 {
        let gray = 8 + 10 * (index - 232);
        return Rgb::new(gray, gray, gray);
    }
    let idx = index - 16;
    let r = idx / 36;
    let g = (idx / 6) % 6;
    let b = idx % 6;
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    Rgb::new(LEVELS[r as usize], LEVELS[g as usize], LEVELS[b as usize])
}

/// Nearest ANSI 16-color value.
#[must_use]
pub fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> Ansi16 {
    let target = Rgb::new(r, g, b);
    let mut best = Ansi16::Black;
    let mut best_dist = u64::MAX;

    for (idx, candidate) in ANSI16_PALETTE.iter().enumerate() {
        let dist = weighted_distance(target, *candidate);
        if dist < best_dist {
            best = Ansi16::from_u8(idx as u8).unwrap_or(Ansi16::Black);
            best_dist = dist;
        }
    }

    best
}

#[must_use]
pub fn rgb_to_ansi16_from_ansi256(index: u8) -> Ansi16 {
    let rgb = ansi256_to_rgb(index);
    rgb_to_ansi16(rgb.r, rgb.g, rgb.b)
}

/// Squared distance weighted by the eye's sensitivity per channel.
fn weighted_distance(a: Rgb, b: Rgb) -> u64 {
    let dr = a.r as i64 - b.r as i64;
    let dg = a.g as i64 - b.g as i64;
    let db = a.b as i64 - b.b as i64;
    (2126 * dr * dr + 7152 * dg * dg + 722 * db * db) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Rgb tests ---

    #[test]
    fn hex_display() {
        assert_eq!(Rgb::new(255, 0, 16).to_string(), "#ff0010");
        assert_eq!(Rgb::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(Rgb::new(0, 0, 0).luminance_u8(), 0);
        assert_eq!(Rgb::new(255, 255, 255).luminance_u8(), 255);
        assert!(Rgb::new(255, 255, 255).is_light());
        assert!(!Rgb::new(0, 43, 54).is_light());
    }

    // --- Palette tests ---

    #[test]
    fn rgb_to_256_grayscale_and_cube() {
        assert_eq!(rgb_to_256(0, 0, 0), 16);
        assert_eq!(rgb_to_256(255, 255, 255), 231);
        assert_eq!(rgb_to_256(128, 128, 128), 244);
        assert_eq!(rgb_to_256(255, 0, 0), 196);
        assert_eq!(rgb_to_256(0, 0, 255), 21);
    }

    #[test]
    fn ansi256_round_trips_through_cube() {
        for idx in 16..=231u8 {
            let rgb = ansi256_to_rgb(idx);
            if rgb.r == rgb.g && rgb.g == rgb.b {
                continue;
            }
            assert_eq!(rgb_to_256(rgb.r, rgb.g, rgb.b), idx, "index {idx}");
        }
    }

    #[test]
    fn nearest_ansi16() {
        assert_eq!(rgb_to_ansi16(250, 10, 10), Ansi16::BrightRed);
        assert_eq!(rgb_to_ansi16(5, 5, 5), Ansi16::Black);
        assert_eq!(rgb_to_ansi16(250, 250, 250), Ansi16::BrightWhite);
    }

    // --- Downgrade tests ---

    #[test]
    fn downgrade_by_system() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.downgrade(ColorSystem::AnsiRgb), red);
        assert_eq!(red.downgrade(ColorSystem::Ansi256), Color::Ansi256(196));
        assert_eq!(
            red.downgrade(ColorSystem::Ansi16),
            Color::Ansi16(Ansi16::BrightRed)
        );
        let named = Color::Ansi16(Ansi16::Cyan);
        assert_eq!(named.downgrade(ColorSystem::AnsiRgb), named);
    }

    // --- SGR tests ---

    #[test]
    fn sgr_parameters() {
        let sgr = |c: Color, bg: bool| {
            let mut out = String::new();
            c.write_sgr(&mut out, bg);
            out
        };
        assert_eq!(sgr(Ansi16::Red.into(), false), "31");
        assert_eq!(sgr(Ansi16::BrightWhite.into(), false), "97");
        assert_eq!(sgr(Ansi16::Blue.into(), true), "44");
        assert_eq!(sgr(Ansi16::BrightBlack.into(), true), "100");
        assert_eq!(sgr(Color::Ansi256(202), false), "38;5;202");
        assert_eq!(sgr(Color::rgb(1, 2, 3), true), "48;2;1;2;3");
    }
}
