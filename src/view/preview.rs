//! Terminal preview renderer.
//!
//! Paints laid-out review rows into a `ratatui` [`Buffer`] by mapping point
//! geometry onto terminal cells. Used by the CLI to show what a viewport of
//! the feed looks like at a given width and scroll offset.

use super::review_cell::ReviewCellView;
use super::styles::ColorConfig;
use super::ListAdapter;
use crate::model::Rect;
use crate::view_state::{ReviewItem, TextMeasurer};
use ratatui::buffer::Buffer;
use ratatui::style::Style;

/// Glyph standing in for the avatar image.
const AVATAR_GLYPH: &str = "◉";

/// Renders a [`ListAdapter`] viewport into a terminal buffer.
///
/// Rows are laid out and broken into lines with the list's own measurer.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPreview {
    colors: ColorConfig,
    points_per_column: f64,
    points_per_row: f64,
}

impl TerminalPreview {
    /// Default horizontal scale.
    pub const DEFAULT_POINTS_PER_COLUMN: f64 = 8.0;
    /// Default vertical scale.
    pub const DEFAULT_POINTS_PER_ROW: f64 = 18.0;

    /// Create a preview with the default scale.
    pub fn new(colors: ColorConfig) -> Self {
        Self {
            colors,
            points_per_column: Self::DEFAULT_POINTS_PER_COLUMN,
            points_per_row: Self::DEFAULT_POINTS_PER_ROW,
        }
    }

    /// Override the point-to-cell scale. Non-positive values keep the defaults.
    pub fn with_scale(mut self, points_per_column: f64, points_per_row: f64) -> Self {
        if points_per_column > 0.0 {
            self.points_per_column = points_per_column;
        }
        if points_per_row > 0.0 {
            self.points_per_row = points_per_row;
        }
        self
    }

    /// Render the rows of `list` visible in a `width` × `viewport_height`
    /// window scrolled down by `scroll_offset` points.
    pub fn render(
        &self,
        list: &dyn ListAdapter,
        width: f64,
        scroll_offset: f64,
        viewport_height: f64,
    ) -> Buffer {
        let area = ratatui::layout::Rect::new(
            0,
            0,
            (width / self.points_per_column).ceil() as u16,
            (viewport_height / self.points_per_row).ceil() as u16,
        );
        let mut buffer = Buffer::empty(area);

        let mut row_top = 0.0;
        for index in 0..list.item_count() {
            let Some(height) = list.height_at(index, width) else {
                continue;
            };
            let top = row_top - scroll_offset;
            row_top += height;

            if top + height <= 0.0 {
                continue;
            }
            if top >= viewport_height {
                break;
            }

            let Some(item) = list.item_at(index) else {
                continue;
            };
            if item.reuse_id() != ReviewItem::REUSE_ID {
                continue;
            }
            let mut cell = ReviewCellView::new();
            item.update(&mut cell);
            cell.layout_subviews(width, list.measurer());
            self.paint_cell(&cell, list.measurer(), top, &mut buffer);
        }

        buffer
    }

    fn paint_cell(
        &self,
        cell: &ReviewCellView,
        measurer: &dyn TextMeasurer,
        top: f64,
        buffer: &mut Buffer,
    ) {
        self.put(buffer, cell.avatar_frame(), top, AVATAR_GLYPH, Style::default());

        if let Some(username) = cell.username() {
            let style = username.terminal_style(self.colors);
            self.put(buffer, cell.username_frame(), top, username.text(), style);
        }

        self.put(buffer, cell.rating_frame(), top, cell.rating_glyphs(), Style::default());

        if let Some(body) = cell.review_text().filter(|run| !run.is_empty()) {
            let frame = cell.review_text_frame();
            let style = body.terminal_style(self.colors);
            let lines = measurer.break_lines(body, frame.width, Some(cell.review_text_max_lines()));
            // Lines share the body frame evenly.
            let line_height = frame.height / lines.len().max(1) as f64;
            for (i, line) in lines.iter().enumerate() {
                let line_frame = Rect {
                    y: frame.y + i as f64 * line_height,
                    ..frame
                };
                self.put(buffer, line_frame, top, line, style);
            }
        }

        if let Some(created) = cell.created() {
            let style = created.terminal_style(self.colors);
            self.put(buffer, cell.created_frame(), top, created.text(), style);
        }
    }

    /// Write `text` at the cell containing the frame origin, clipped to the
    /// frame width and the buffer.
    fn put(&self, buffer: &mut Buffer, frame: Rect, top: f64, text: &str, style: Style) {
        let y = top + frame.y;
        if y < 0.0 {
            return;
        }
        let area = buffer.area;
        let row = (y / self.points_per_row).floor() as u16;
        let col = (frame.x / self.points_per_column).floor() as u16;
        if row >= area.height || col >= area.width {
            return;
        }
        let frame_columns = (frame.width / self.points_per_column).floor() as usize;
        let max_columns = frame_columns.min(usize::from(area.width - col));
        buffer.set_stringn(col, row, text, max_columns, style);
    }
}

/// Convert a buffer into plain text lines, trimming trailing whitespace.
///
/// Blank rows are kept so vertical positions are preserved.
pub fn buffer_to_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            for x in area.left()..area.right() {
                line.push_str(buffer[(x, y)].symbol());
            }
            line.trim_end().to_string()
        })
        .collect()
}
