#![forbid(unsafe_code)]

//! Output configuration.
//!
//! [`OutputConfig`] is an immutable value passed through the pipeline. Use
//! the `with_*` setters to derive a modified copy:
//!
//! ```
//! use panelkit_core::config::{HorizontalOverflow, OutputConfig};
//!
//! let config = OutputConfig::default()
//!     .with_horizontal_overflow(HorizontalOverflow::Crop)
//!     .with_tab_size(8);
//! assert_eq!(config.tab_size(), 8);
//! ```

/// What to do with a line wider than the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalOverflow {
    /// Re-flow on whitespace into additional lines.
    #[default]
    WordWrap,
    /// Truncate.
    Crop,
    /// Truncate and append `…`.
    Ellipsis,
}

/// What to do with more lines than the frame height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalOverflow {
    CropTop,
    CropBottom,
    EllipsisTop,
    #[default]
    EllipsisBottom,
}

/// Horizontal alignment of panel content inside a layout cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Left,
    Right,
    Center,
}

/// Terminal color capability used for ANSI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSystem {
    Ansi16,
    #[default]
    Ansi256,
    AnsiRgb,
}

/// Named color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorStyle {
    #[default]
    AnsiDark,
    AnsiLight,
    SolarizedDark,
    SolarizedLight,
    Monokai,
}

/// Token vocabulary used to format and highlight values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyntaxLanguage {
    /// No highlighting.
    Text,
    /// Python literal syntax.
    #[default]
    Python,
    Json,
}

/// Font settings for HTML output.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    pub families: Vec<String>,
    pub size: u32,
    pub weight: u32,
    pub line_height: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            families: ["Menlo", "DejaVu Sans Mono", "Consolas", "Courier New", "monospace"]
                .into_iter()
                .map(String::from)
                .collect(),
            size: 14,
            weight: 400,
            line_height: 1.25,
        }
    }
}

/// Rendering options. See the individual getters for defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    horizontal_overflow: HorizontalOverflow,
    vertical_overflow: VerticalOverflow,
    tab_size: usize,
    indent_size: usize,
    title_at_top: bool,
    cell_justify: Justify,
    proportional_freedom: f64,
    color_system: ColorSystem,
    color_style: ColorStyle,
    transparent_background: bool,
    syntax_language: SyntaxLanguage,
    font: FontConfig,
    debug_mode: bool,
    min_crop_width: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            horizontal_overflow: HorizontalOverflow::default(),
            vertical_overflow: VerticalOverflow::default(),
            tab_size: 4,
            indent_size: 2,
            title_at_top: true,
            cell_justify: Justify::default(),
            proportional_freedom: 1.0,
            color_system: ColorSystem::default(),
            color_style: ColorStyle::default(),
            transparent_background: false,
            syntax_language: SyntaxLanguage::default(),
            font: FontConfig::default(),
            debug_mode: false,
            min_crop_width: None,
        }
    }
}

impl OutputConfig {
    /// Default: [`HorizontalOverflow::WordWrap`].
    #[inline]
    pub fn horizontal_overflow(&self) -> HorizontalOverflow {
        self.horizontal_overflow
    }

    /// Default: [`VerticalOverflow::EllipsisBottom`].
    #[inline]
    pub fn vertical_overflow(&self) -> VerticalOverflow {
        self.vertical_overflow
    }

    /// Tab stop distance. Default: 4.
    #[inline]
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Indent per nesting level for pretty-printed values. Default: 2.
    #[inline]
    pub fn indent_size(&self) -> usize {
        self.indent_size
    }

    /// Place sub-panel titles above content. Default: true.
    #[inline]
    pub fn title_at_top(&self) -> bool {
        self.title_at_top
    }

    /// Default: [`Justify::Left`].
    #[inline]
    pub fn cell_justify(&self) -> Justify {
        self.cell_justify
    }

    /// Tolerance for aspect-ratio classification. Default: 1.0.
    #[inline]
    pub fn proportional_freedom(&self) -> f64 {
        self.proportional_freedom
    }

    /// Default: [`ColorSystem::Ansi256`].
    #[inline]
    pub fn color_system(&self) -> ColorSystem {
        self.color_system
    }

    /// Default: [`ColorStyle::AnsiDark`].
    #[inline]
    pub fn color_style(&self) -> ColorStyle {
        self.color_style
    }

    /// Omit background colors. Default: false.
    #[inline]
    pub fn transparent_background(&self) -> bool {
        self.transparent_background
    }

    /// Default: [`SyntaxLanguage::Python`].
    #[inline]
    pub fn syntax_language(&self) -> SyntaxLanguage {
        self.syntax_language
    }

    #[inline]
    pub fn font(&self) -> &FontConfig {
        &self.font
    }

    /// Render values with their internal structure visible. Default: false.
    #[inline]
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Layout sub-panels cropped narrower than this are replaced by a `…`
    /// placeholder. Default: disabled.
    #[inline]
    pub fn min_crop_width(&self) -> Option<usize> {
        self.min_crop_width
    }

    // --- builders ---

    #[must_use]
    pub fn with_horizontal_overflow(mut self, mode: HorizontalOverflow) -> Self {
        self.horizontal_overflow = mode;
        self
    }

    #[must_use]
    pub fn with_vertical_overflow(mut self, mode: VerticalOverflow) -> Self {
        self.vertical_overflow = mode;
        self
    }

    /// Set the tab size. Values below 1 are clamped to 1.
    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }

    #[must_use]
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    #[must_use]
    pub fn with_title_at_top(mut self, title_at_top: bool) -> Self {
        self.title_at_top = title_at_top;
        self
    }

    #[must_use]
    pub fn with_cell_justify(mut self, justify: Justify) -> Self {
        self.cell_justify = justify;
        self
    }

    /// Set the proportional freedom. Negative and non-finite values become 0.
    #[must_use]
    pub fn with_proportional_freedom(mut self, freedom: f64) -> Self {
        self.proportional_freedom = if freedom.is_finite() {
            freedom.max(0.0)
        } else {
            0.0
        };
        self
    }

    #[must_use]
    pub fn with_color_system(mut self, color_system: ColorSystem) -> Self {
        self.color_system = color_system;
        self
    }

    #[must_use]
    pub fn with_color_style(mut self, color_style: ColorStyle) -> Self {
        self.color_style = color_style;
        self
    }

    #[must_use]
    pub fn with_transparent_background(mut self, transparent: bool) -> Self {
        self.transparent_background = transparent;
        self
    }

    #[must_use]
    pub fn with_syntax_language(mut self, language: SyntaxLanguage) -> Self {
        self.syntax_language = language;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: FontConfig) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    #[must_use]
    pub fn with_min_crop_width(mut self, min_crop_width: Option<usize>) -> Self {
        self.min_crop_width = min_crop_width;
        self
    }
}
