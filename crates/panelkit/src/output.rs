#![forbid(unsafe_code)]

//! Output variants of a rendered panel.
//!
//! A variant pairs the final styled lines with an [`OutputMode`]. Each
//! variant renders to terminal text, an HTML `<pre>` fragment, or a full
//! HTML page. The lines are cropped once, before any variant is built, so
//! all of them show the same text.

use panelkit_core::OutputConfig;
use panelkit_style::{
    BackgroundDetection, DEFAULT_HTML_BACKGROUND, DEFAULT_HTML_FOREGROUND, OutputMode, StyledLine,
    Theme, css_color_style, css_font_style, html_page, html_tag, to_html_code, to_terminal,
};

/// One styling level of a rendered panel.
#[derive(Debug, Clone, Copy)]
pub struct OutputVariant<'a> {
    lines: &'a [StyledLine],
    mode: OutputMode,
    config: &'a OutputConfig,
}

impl<'a> OutputVariant<'a> {
    pub(crate) fn new(lines: &'a [StyledLine], mode: OutputMode, config: &'a OutputConfig) -> Self {
        Self {
            lines,
            mode,
            config,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn theme(&self) -> &'static Theme {
        Theme::for_style(self.config.color_style())
    }

    /// Text for a terminal, every line ending in `\n`.
    ///
    /// Colorized output paints the theme background behind unstyled
    /// backgrounds unless the background is transparent.
    pub fn terminal(&self) -> String {
        let background = match self.theme().background {
            Some(bg) if self.mode == OutputMode::Colorized
                && !self.config.transparent_background() =>
            {
                bg
            }
            _ => return to_terminal(self.lines, self.mode, self.config.color_system()),
        };
        let painted: Vec<StyledLine> = self
            .lines
            .iter()
            .map(|line| {
                line.map_styles(|style| match style.bg {
                    Some(_) => style,
                    None => style.with_bg(Some(background)),
                })
            })
            .collect();
        to_terminal(&painted, self.mode, self.config.color_system())
    }

    /// A `<pre><code>` fragment with inline font and color styles.
    pub fn html_tag(&self) -> String {
        let code = to_html_code(self.lines, self.mode);
        let color_style = if self.mode == OutputMode::Colorized {
            let theme = self.theme();
            let background = if self.config.transparent_background() {
                None
            } else {
                theme.background_rgb(BackgroundDetection::IfUnset)
            };
            css_color_style(theme.foreground_rgb(), background)
        } else {
            String::new()
        };
        html_tag(&code, &css_font_style(self.config.font()), &color_style)
    }

    /// A standalone HTML document.
    pub fn html_page(&self) -> String {
        let code = to_html_code(self.lines, self.mode);
        let (foreground, background) = if self.mode == OutputMode::Colorized {
            let theme = self.theme();
            let detection = if self.config.transparent_background() {
                BackgroundDetection::Always
            } else {
                BackgroundDetection::IfUnset
            };
            (
                theme.foreground_rgb(),
                theme
                    .background_rgb(detection)
                    .unwrap_or(DEFAULT_HTML_BACKGROUND),
            )
        } else {
            (DEFAULT_HTML_FOREGROUND, DEFAULT_HTML_BACKGROUND)
        };
        html_page(&code, &css_font_style(self.config.font()), foreground, background)
    }
}
