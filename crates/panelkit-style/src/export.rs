#![forbid(unsafe_code)]

//! Emission of styled lines as ANSI text and HTML.
//!
//! Three output modes exist. `Plain` drops all styling, `BwStylized`
//! keeps attributes (bold, italic, ...) but no colors, and `Colorized`
//! keeps everything. Terminal colors are downgraded to the configured
//! color system; HTML always uses RGB.

use std::fmt::Write as _;

use panelkit_core::{ColorSystem, FontConfig};

use crate::color::Rgb;
use crate::styled::{Style, StyleFlags, StyledLine};

/// How much styling survives in an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    Plain,
    BwStylized,
    Colorized,
}

impl OutputMode {
    /// Reduce a style to what this mode keeps.
    pub fn filter(self, style: Style) -> Style {
        match self {
            Self::Plain => Style::PLAIN,
            Self::BwStylized => style.without_color(),
            Self::Colorized => style,
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// Render lines as terminal text, one `\n` after every line.
pub fn to_terminal(lines: &[StyledLine], mode: OutputMode, color_system: ColorSystem) -> String {
    let mut out = String::new();
    for line in lines {
        for span in line.spans() {
            let style = mode.filter(span.style);
            if style.is_plain() {
                out.push_str(&span.text);
            } else {
                write_ansi_style(&mut out, style, color_system);
                out.push_str(&span.text);
                out.push_str("\x1b[0m");
            }
        }
        out.push('\n');
    }
    out
}

/// Write the SGR escape sequence selecting `style`.
fn write_ansi_style(out: &mut String, style: Style, color_system: ColorSystem) {
    out.push_str("\x1b[");
    let mut first = true;
    let mut sep = |out: &mut String| {
        if first {
            first = false;
        } else {
            out.push(';');
        }
    };

    for (flag, code) in [
        (StyleFlags::BOLD, '1'),
        (StyleFlags::DIM, '2'),
        (StyleFlags::ITALIC, '3'),
        (StyleFlags::UNDERLINE, '4'),
    ] {
        if style.flags.contains(flag) {
            sep(out);
            out.push(code);
        }
    }
    if let Some(fg) = style.fg {
        sep(out);
        fg.downgrade(color_system).write_sgr(out, false);
    }
    if let Some(bg) = style.bg {
        sep(out);
        bg.downgrade(color_system).write_sgr(out, true);
    }

    out.push('m');
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

/// Render lines as the HTML-escaped content of a `<code>` element.
pub fn to_html_code(lines: &[StyledLine], mode: OutputMode) -> String {
    let mut out = String::new();
    for line in lines {
        for span in line.spans() {
            let style = mode.filter(span.style);
            if style.is_plain() {
                html_escape_into(&mut out, &span.text);
            } else {
                out.push_str("<span style=\"");
                write_inline_style(&mut out, style);
                out.push_str("\">");
                html_escape_into(&mut out, &span.text);
                out.push_str("</span>");
            }
        }
        out.push('\n');
    }
    out
}

fn write_inline_style(out: &mut String, style: Style) {
    let mut parts: Vec<String> = Vec::new();
    if let Some(fg) = style.fg {
        parts.push(format!("color: {}", fg.to_rgb()));
    }
    if let Some(bg) = style.bg {
        parts.push(format!("background-color: {}", bg.to_rgb()));
    }
    if style.flags.contains(StyleFlags::BOLD) {
        parts.push("font-weight: bold".into());
    }
    if style.flags.contains(StyleFlags::DIM) {
        parts.push("opacity: 0.5".into());
    }
    if style.flags.contains(StyleFlags::ITALIC) {
        parts.push("font-style: italic".into());
    }
    if style.flags.contains(StyleFlags::UNDERLINE) {
        parts.push("text-decoration: underline".into());
    }
    out.push_str(&parts.join("; "));
}

/// HTML-escape a string into the output buffer.
pub fn html_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// CSS declarations for the font settings, each followed by a space.
pub fn css_font_style(font: &FontConfig) -> String {
    let mut css = String::new();
    if !font.families.is_empty() {
        let families: Vec<String> = font.families.iter().map(|f| format!("'{f}'")).collect();
        let _ = write!(css, "font-family: {}; ", families.join(", "));
    }
    if font.size > 0 {
        let _ = write!(css, "font-size: {}px; ", font.size);
    }
    if font.weight > 0 {
        let _ = write!(css, "font-weight: {}; ", font.weight);
    }
    if font.line_height > 0.0 {
        let _ = write!(css, "line-height: {}; ", font.line_height);
    }
    css
}

/// CSS color declarations. The background is left out when `None`.
pub fn css_color_style(foreground: Rgb, background: Option<Rgb>) -> String {
    match background {
        Some(bg) => format!("color: {foreground}; background-color: {bg}; "),
        None => format!("color: {foreground}; "),
    }
}

/// A `<pre><code>` fragment.
pub fn html_tag(code: &str, font_style: &str, color_style: &str) -> String {
    format!("<pre><code style=\"{font_style}{color_style}\">{code}</code></pre>")
}

/// A standalone HTML document around a `<pre><code>` fragment.
pub fn html_page(code: &str, font_style: &str, foreground: Rgb, background: Rgb) -> String {
    let tag = html_tag(code, font_style, "");
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         \x20 <head>\n\
         \x20   <meta charset=\"UTF-8\">\n\
         \x20   <style>\n\
         \x20     body {{\n\
         \x20       color: {foreground};\n\
         \x20       background-color: {background};\n\
         \x20     }}\n\
         \x20   </style>\n\
         \x20 </head>\n\
         \x20 <body>\n\
         \x20   {tag}\n\
         \x20 </body>\n\
         </html>\n"
    )
}

/// Colors used by HTML output when no theme applies.
pub const DEFAULT_HTML_FOREGROUND: Rgb = Rgb::new(0, 0, 0);
pub const DEFAULT_HTML_BACKGROUND: Rgb = Rgb::new(255, 255, 255);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Ansi16, Color};

    fn sample() -> Vec<StyledLine> {
        let mut line = StyledLine::plain("x = ");
        line.push(
            "<1>",
            Style::fg(Color::rgb(255, 0, 0)).with_flags(StyleFlags::BOLD),
        );
        vec![line, StyledLine::new()]
    }

    // --- Terminal tests ---

    #[test]
    fn terminal_modes() {
        let lines = sample();
        assert_eq!(
            to_terminal(&lines, OutputMode::Plain, ColorSystem::AnsiRgb),
            "x = <1>\n\n"
        );
        assert_eq!(
            to_terminal(&lines, OutputMode::BwStylized, ColorSystem::AnsiRgb),
            "x = \x1b[1m<1>\x1b[0m\n\n"
        );
        assert_eq!(
            to_terminal(&lines, OutputMode::Colorized, ColorSystem::AnsiRgb),
            "x = \x1b[1;38;2;255;0;0m<1>\x1b[0m\n\n"
        );
        assert_eq!(
            to_terminal(&lines, OutputMode::Colorized, ColorSystem::Ansi256),
            "x = \x1b[1;38;5;196m<1>\x1b[0m\n\n"
        );
    }

    #[test]
    fn terminal_background() {
        let line = StyledLine::styled(
            "a",
            Style::fg(Ansi16::Green.into()).with_bg(Some(Ansi16::Black.into())),
        );
        assert_eq!(
            to_terminal(&[line], OutputMode::Colorized, ColorSystem::Ansi16),
            "\x1b[32;40ma\x1b[0m\n"
        );
    }

    // --- HTML tests ---

    #[test]
    fn html_code_escapes_and_styles() {
        let lines = sample();
        assert_eq!(to_html_code(&lines, OutputMode::Plain), "x = &lt;1&gt;\n\n");
        assert_eq!(
            to_html_code(&lines, OutputMode::BwStylized),
            "x = <span style=\"font-weight: bold\">&lt;1&gt;</span>\n\n"
        );
        assert_eq!(
            to_html_code(&lines, OutputMode::Colorized),
            "x = <span style=\"color: #ff0000; font-weight: bold\">&lt;1&gt;</span>\n\n"
        );
    }

    #[test]
    fn css_fragments() {
        let font = FontConfig::default();
        assert_eq!(
            css_font_style(&font),
            "font-family: 'Menlo', 'DejaVu Sans Mono', 'Consolas', 'Courier New', \
             'monospace'; font-size: 14px; font-weight: 400; line-height: 1.25; "
        );
        assert_eq!(
            css_color_style(Rgb::new(0, 0, 0), Some(Rgb::new(255, 255, 255))),
            "color: #000000; background-color: #ffffff; "
        );
        assert_eq!(css_color_style(Rgb::new(0, 0, 0), None), "color: #000000; ");
    }

    #[test]
    fn page_wraps_tag() {
        let page = html_page("x\n", "", Rgb::new(1, 2, 3), Rgb::new(4, 5, 6));
        assert!(page.starts_with("<!DOCTYPE html>\n<html>\n  <head>\n"));
        assert!(page.contains("        color: #010203;\n        background-color: #040506;\n"));
        assert!(page.contains("    <pre><code style=\"\">x\n</code></pre>\n  </body>\n"));
        assert!(page.ends_with("</html>\n"));
    }
}
