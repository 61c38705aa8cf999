#![forbid(unsafe_code)]

//! Color themes and token highlighting.
//!
//! A [`Theme`] maps token kinds to styles and carries the default
//! foreground and (optional) background of a named color style. The ANSI
//! themes use the 16 terminal palette colors and leave the background to
//! the terminal.

use panelkit_core::ColorStyle;

use crate::color::{Ansi16, Color, Rgb};
use crate::styled::{Style, StyleFlags, StyledLine};
use crate::syntax::{TokenKind, Tokenizer};

/// When to replace the theme background by black or bright white chosen
/// from the foreground luminance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundDetection {
    Never,
    /// Only when the theme defines no background.
    IfUnset,
    Always,
}

/// Colors for one named color style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub foreground: Color,
    pub background: Option<Color>,
    pub constant: Style,
    pub identifier: Style,
    pub string: Style,
    pub number: Style,
    pub punctuation: Style,
    pub comment: Style,
    /// Panel titles.
    pub title: Style,
    /// Grid borders.
    pub border: Style,
}

const fn ansi(color: Ansi16) -> Style {
    Style::fg(Color::Ansi16(color))
}

const fn rgb(r: u8, g: u8, b: u8) -> Style {
    Style::fg(Color::rgb(r, g, b))
}

static ANSI_DARK: Theme = Theme {
    name: "ansi_dark",
    foreground: Color::Ansi16(Ansi16::BrightWhite),
    background: None,
    constant: ansi(Ansi16::BrightCyan),
    identifier: Style::PLAIN,
    string: ansi(Ansi16::Yellow),
    number: ansi(Ansi16::BrightBlue),
    punctuation: Style::PLAIN,
    comment: ansi(Ansi16::BrightBlack).with_flags(StyleFlags::ITALIC),
    title: Style::PLAIN.with_flags(StyleFlags::BOLD),
    border: Style::PLAIN,
};

static ANSI_LIGHT: Theme = Theme {
    name: "ansi_light",
    foreground: Color::Ansi16(Ansi16::Black),
    background: None,
    constant: ansi(Ansi16::Cyan),
    identifier: Style::PLAIN,
    string: ansi(Ansi16::Yellow),
    number: ansi(Ansi16::Blue),
    punctuation: Style::PLAIN,
    comment: ansi(Ansi16::BrightBlack).with_flags(StyleFlags::ITALIC),
    title: Style::PLAIN.with_flags(StyleFlags::BOLD),
    border: Style::PLAIN,
};

static SOLARIZED_DARK: Theme = Theme {
    name: "solarized_dark",
    foreground: Color::rgb(0x83, 0x94, 0x96),
    background: Some(Color::rgb(0x00, 0x2b, 0x36)),
    constant: rgb(0xcb, 0x4b, 0x16),
    identifier: rgb(0x26, 0x8b, 0xd2),
    string: rgb(0x2a, 0xa1, 0x98),
    number: rgb(0xd3, 0x36, 0x82),
    punctuation: rgb(0x83, 0x94, 0x96),
    comment: rgb(0x58, 0x6e, 0x75).with_flags(StyleFlags::ITALIC),
    title: rgb(0x93, 0xa1, 0xa1).with_flags(StyleFlags::BOLD),
    border: rgb(0x58, 0x6e, 0x75),
};

static SOLARIZED_LIGHT: Theme = Theme {
    name: "solarized_light",
    foreground: Color::rgb(0x65, 0x7b, 0x83),
    background: Some(Color::rgb(0xfd, 0xf6, 0xe3)),
    constant: rgb(0xcb, 0x4b, 0x16),
    identifier: rgb(0x26, 0x8b, 0xd2),
    string: rgb(0x2a, 0xa1, 0x98),
    number: rgb(0xd3, 0x36, 0x82),
    punctuation: rgb(0x65, 0x7b, 0x83),
    comment: rgb(0x93, 0xa1, 0xa1).with_flags(StyleFlags::ITALIC),
    title: rgb(0x58, 0x6e, 0x75).with_flags(StyleFlags::BOLD),
    border: rgb(0x93, 0xa1, 0xa1),
};

static MONOKAI: Theme = Theme {
    name: "monokai",
    foreground: Color::rgb(0xf8, 0xf8, 0xf2),
    background: Some(Color::rgb(0x27, 0x28, 0x22)),
    constant: rgb(0xae, 0x81, 0xff),
    identifier: rgb(0xf8, 0xf8, 0xf2),
    string: rgb(0xe6, 0xdb, 0x74),
    number: rgb(0xae, 0x81, 0xff),
    punctuation: rgb(0xf8, 0xf8, 0xf2),
    comment: rgb(0x75, 0x71, 0x5e).with_flags(StyleFlags::ITALIC),
    title: rgb(0xa6, 0xe2, 0x2e).with_flags(StyleFlags::BOLD),
    border: rgb(0x75, 0x71, 0x5e),
};

impl Theme {
    /// The theme of a named color style.
    pub fn for_style(style: ColorStyle) -> &'static Theme {
        match style {
            ColorStyle::AnsiDark => &ANSI_DARK,
            ColorStyle::AnsiLight => &ANSI_LIGHT,
            ColorStyle::SolarizedDark => &SOLARIZED_DARK,
            ColorStyle::SolarizedLight => &SOLARIZED_LIGHT,
            ColorStyle::Monokai => &MONOKAI,
        }
    }

    pub fn style_for(&self, kind: TokenKind) -> Style {
        match kind {
            TokenKind::Text | TokenKind::Whitespace => Style::PLAIN,
            TokenKind::Constant => self.constant,
            TokenKind::Identifier => self.identifier,
            TokenKind::String => self.string,
            TokenKind::Number => self.number,
            TokenKind::Punctuation => self.punctuation,
            TokenKind::Comment => self.comment,
        }
    }

    pub fn foreground_rgb(&self) -> Rgb {
        self.foreground.to_rgb()
    }

    /// Background as RGB, detected from the foreground when `detection`
    /// asks for it.
    pub fn background_rgb(&self, detection: BackgroundDetection) -> Option<Rgb> {
        let detect = match detection {
            BackgroundDetection::Never => false,
            BackgroundDetection::IfUnset => self.background.is_none(),
            BackgroundDetection::Always => true,
        };
        if detect {
            Some(if self.foreground_rgb().is_light() {
                Rgb::new(0, 0, 0)
            } else {
                Rgb::new(255, 255, 255)
            })
        } else {
            self.background.map(Color::to_rgb)
        }
    }
}

/// Style one tab-free line with the theme colors of its tokens.
pub fn highlight(line: &str, tokenizer: &dyn Tokenizer, theme: &Theme) -> StyledLine {
    let mut styled = StyledLine::new();
    let mut covered = 0;
    for token in tokenizer.tokenize_line(line) {
        if token.range.start > covered {
            styled.push(&line[covered..token.range.start], Style::PLAIN);
        }
        styled.push(token.text(line), theme.style_for(token.kind));
        covered = token.range.end;
    }
    if covered < line.len() {
        styled.push(&line[covered..], Style::PLAIN);
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{PlainTokenizer, python_tokenizer};

    #[test]
    fn every_style_has_a_theme() {
        for style in [
            ColorStyle::AnsiDark,
            ColorStyle::AnsiLight,
            ColorStyle::SolarizedDark,
            ColorStyle::SolarizedLight,
            ColorStyle::Monokai,
        ] {
            let theme = Theme::for_style(style);
            assert!(!theme.name.is_empty());
            assert!(theme.title.flags.contains(StyleFlags::BOLD));
        }
    }

    #[test]
    fn background_detection() {
        let dark = Theme::for_style(ColorStyle::AnsiDark);
        assert_eq!(dark.background_rgb(BackgroundDetection::Never), None);
        assert_eq!(
            dark.background_rgb(BackgroundDetection::IfUnset),
            Some(Rgb::new(0, 0, 0))
        );
        let light = Theme::for_style(ColorStyle::AnsiLight);
        assert_eq!(
            light.background_rgb(BackgroundDetection::IfUnset),
            Some(Rgb::new(255, 255, 255))
        );

        let solarized = Theme::for_style(ColorStyle::SolarizedLight);
        assert_eq!(
            solarized.background_rgb(BackgroundDetection::IfUnset),
            Some(Rgb::new(0xfd, 0xf6, 0xe3))
        );
        assert_eq!(
            solarized.background_rgb(BackgroundDetection::Always),
            Some(Rgb::new(255, 255, 255))
        );
    }

    #[test]
    fn highlight_keeps_text() {
        let theme = Theme::for_style(ColorStyle::Monokai);
        let line = "[1, 'two', None]";
        let styled = highlight(line, &python_tokenizer(), theme);
        assert_eq!(styled.text(), line);
        let none = styled
            .spans()
            .iter()
            .find(|s| s.text == "None")
            .map(|s| s.style);
        assert_eq!(none, Some(theme.constant));

        let plain = highlight(line, &PlainTokenizer, theme);
        assert_eq!(plain.spans().len(), 1);
    }
}
