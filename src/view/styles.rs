//! Text styling for review rows.
//!
//! Converts plain strings into [`StyledRun`]s with a fixed font/color lookup
//! keyed by [`TextRole`].

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors explicitly on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Fonts =====

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight.
    Regular,
    /// Bold weight.
    Bold,
}

/// System font description: point size and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Point size.
    pub size: f64,
    /// Weight.
    pub weight: FontWeight,
}

impl Font {
    /// Regular system font of the given size.
    pub const fn regular(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    /// Bold system font of the given size.
    pub const fn bold(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

/// Reviewer name font.
pub const USERNAME_FONT: Font = Font::bold(16.0);
/// Review body font.
pub const TEXT_FONT: Font = Font::regular(15.0);
/// Creation timestamp font.
pub const CREATED_FONT: Font = Font::regular(14.0);
/// Secondary text color used for timestamps.
pub const CREATED_COLOR: Color = Color::Gray;

// ===== Styled runs =====

/// Role a text run plays inside a review row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Reviewer display name.
    Name,
    /// Review body.
    Body,
    /// Creation timestamp.
    Timestamp,
}

impl TextRole {
    /// Font for this role.
    pub fn font(self) -> Font {
        match self {
            TextRole::Name => USERNAME_FONT,
            TextRole::Body => TEXT_FONT,
            TextRole::Timestamp => CREATED_FONT,
        }
    }

    /// Foreground color for this role; `None` means the renderer default.
    pub fn color(self) -> Option<Color> {
        match self {
            TextRole::Name | TextRole::Body => None,
            TextRole::Timestamp => Some(CREATED_COLOR),
        }
    }
}

/// Text plus its rendering attributes, independent of layout.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    text: String,
    font: Font,
    color: Option<Color>,
}

impl StyledRun {
    /// Style `text` for the given role.
    pub fn styled(text: impl Into<String>, role: TextRole) -> Self {
        Self {
            text: text.into(),
            font: role.font(),
            color: role.color(),
        }
    }

    /// Plain text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Font attribute.
    pub fn font(&self) -> Font {
        self.font
    }

    /// Foreground color attribute.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// True when there is no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Terminal style for this run.
    ///
    /// Bold weight maps to [`Modifier::BOLD`]; colors are dropped when disabled.
    pub fn terminal_style(&self, colors: ColorConfig) -> Style {
        let mut style = Style::default();
        if self.font.weight == FontWeight::Bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        match self.color {
            Some(color) if colors.colors_enabled() => style.fg(color),
            _ => style,
        }
    }

    /// Convert a fragment of this run into a terminal span carrying its style.
    pub fn span(&self, fragment: impl Into<String>, colors: ColorConfig) -> Span<'static> {
        Span::styled(fragment.into(), self.terminal_style(colors))
    }
}

// ===== Tests =====
