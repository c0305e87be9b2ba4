//! Text measurement.
//!
//! The layout engine never inspects glyphs itself; it asks a [`TextMeasurer`]
//! for the bounding size of a styled run at a maximum width.

use crate::model::Size;
use crate::view::styles::{Font, StyledRun};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Measures the bounding box of a styled run.
///
/// # Contract
/// - MUST be pure: identical inputs give identical output
/// - MUST return [`Size::ZERO`] rather than failing (empty text, zero or
///   non-finite width)
/// - `max_lines` of `None` (or `Some(0)`) means unlimited
pub trait TextMeasurer: Send + Sync {
    /// Bounding size of `run` wrapped at `max_width`, capped at `max_lines`.
    fn measure(&self, run: &StyledRun, max_width: f64, max_lines: Option<usize>) -> Size;

    /// Display lines of `run` at `max_width`, consistent with [`measure`](Self::measure).
    ///
    /// The default keeps explicit paragraphs only and does not wrap.
    fn break_lines(&self, run: &StyledRun, max_width: f64, max_lines: Option<usize>) -> Vec<String> {
        if run.is_empty() || !max_width.is_finite() || max_width <= 0.0 {
            return Vec::new();
        }
        let limit = line_limit(max_lines);
        run.text().split('\n').take(limit).map(str::to_string).collect()
    }
}

fn line_limit(max_lines: Option<usize>) -> usize {
    match max_lines {
        Some(0) | None => usize::MAX,
        Some(n) => n,
    }
}

/// Deterministic measurer that treats every font as monospaced.
///
/// Each terminal column of a glyph advances by `font.size * advance_ratio`
/// points; each line is `round(font.size * line_height_ratio)` points tall.
/// Lines are broken greedily at spaces; words longer than a line are split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    advance_ratio: f64,
    line_height_ratio: f64,
}

impl MonospaceMeasurer {
    /// Default horizontal advance per column as a fraction of the point size.
    pub const DEFAULT_ADVANCE_RATIO: f64 = 0.5;
    /// Default line height as a multiple of the point size.
    pub const DEFAULT_LINE_HEIGHT_RATIO: f64 = 1.2;

    /// Create a measurer with explicit ratios.
    pub fn new(advance_ratio: f64, line_height_ratio: f64) -> Self {
        Self {
            advance_ratio,
            line_height_ratio,
        }
    }

    /// Points advanced per terminal column.
    pub fn column_advance(&self, font: Font) -> f64 {
        font.size * self.advance_ratio
    }

    /// Height of one line in points.
    pub fn line_height(&self, font: Font) -> f64 {
        (font.size * self.line_height_ratio).round()
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADVANCE_RATIO, Self::DEFAULT_LINE_HEIGHT_RATIO)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, run: &StyledRun, max_width: f64, max_lines: Option<usize>) -> Size {
        let lines = self.break_lines(run, max_width, max_lines);
        if lines.is_empty() {
            return Size::ZERO;
        }
        let columns = lines.iter().map(|line| line.width()).max().unwrap_or(0);
        let font = run.font();
        Size::new(
            columns as f64 * self.column_advance(font),
            lines.len() as f64 * self.line_height(font),
        )
    }

    /// Greedy word wrap, keeping at most `max_lines`.
    ///
    /// Empty text, non-positive or non-finite widths produce no lines.
    fn break_lines(&self, run: &StyledRun, max_width: f64, max_lines: Option<usize>) -> Vec<String> {
        let advance = self.column_advance(run.font());
        if run.is_empty() || !max_width.is_finite() || max_width <= 0.0 || advance <= 0.0 {
            return Vec::new();
        }
        let max_columns = (max_width / advance).floor() as usize;
        if max_columns == 0 {
            return Vec::new();
        }

        let limit = line_limit(max_lines);

        let mut lines = Vec::new();
        for paragraph in run.text().split('\n') {
            wrap_paragraph(paragraph, max_columns, &mut lines);
            if lines.len() >= limit {
                break;
            }
        }
        lines.truncate(limit);
        lines
    }
}

/// Greedy word wrap of a single paragraph into `out`.
fn wrap_paragraph(paragraph: &str, max_columns: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        let word_width = word.width();

        if word_width > max_columns {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for chunk in split_long_word(word, max_columns) {
                out.push(chunk);
            }
            // The tail of a split word keeps accepting following words.
            if let Some(tail) = out.pop() {
                current_width = tail.width();
                current = tail;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_columns {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            out.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    // Blank paragraphs still occupy a line.
    out.push(current);
}

/// Split a word into chunks no wider than `max_columns`.
///
/// A single glyph wider than the line is emitted on its own.
fn split_long_word(word: &str, max_columns: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0usize;
    for ch in word.chars() {
        let w = ch.width().unwrap_or(0);
        if chunk_width + w > max_columns && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(ch);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
