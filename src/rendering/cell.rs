//! CellRenderer - terminal renderer on whole character cells
//!
//! OVP anchoring snaps to the nearest cell. The terminal controls the font, so
//! all positioning uses display widths from unicode-width (emoji and CJK are
//! two cells wide). The pivot is a code point index; when it lands inside a
//! grapheme cluster (e.g. a combining accent) the whole cluster is highlighted.

use super::renderer::{validate_frame, FrameRenderer, RendererError};
use crate::playback::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A frame cut into the text before the pivot, the pivot cluster and the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotSegments {
    pub prefix: String,
    pub pivot: String,
    pub suffix: String,
}

impl PivotSegments {
    pub fn of(frame: &Frame) -> Self {
        let mut prefix = String::new();
        let mut pivot = String::new();
        let mut suffix = String::new();
        let mut code_points = 0;

        for grapheme in frame.text.graphemes(true) {
            let start = code_points;
            code_points += grapheme.chars().count();
            if code_points <= frame.pivot_index {
                prefix.push_str(grapheme);
            } else if start <= frame.pivot_index {
                pivot.push_str(grapheme);
            } else {
                suffix.push_str(grapheme);
            }
        }

        Self {
            prefix,
            pivot,
            suffix,
        }
    }

    pub fn prefix_width(&self) -> u16 {
        UnicodeWidthStr::width(self.prefix.as_str()) as u16
    }
}

/// Terminal renderer using character cells
pub struct CellRenderer {
    /// Terminal size in cells (columns, rows)
    terminal_size: (u16, u16),
    current: Option<Frame>,
    frames_rendered: u64,
}

impl CellRenderer {
    pub fn new() -> Self {
        Self {
            terminal_size: (80, 24),
            current: None,
            frames_rendered: 0,
        }
    }

    /// Update terminal size from Ratatui
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Get the row for displaying word (vertically centered)
    pub fn get_center_row(&self) -> u16 {
        let (_, terminal_height) = self.terminal_size;
        terminal_height / 2
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Shows a frame without counting it as an emission (cursor moves while paused).
    pub fn preview(&mut self, frame: Option<Frame>) {
        self.current = frame;
    }

    /// Calculate the starting column for OVP anchoring
    ///
    /// Returns the column where the word must start so that its pivot cluster
    /// sits on the horizontal center of the terminal.
    pub fn calculate_start_column(&self, frame: &Frame) -> Result<u16, RendererError> {
        validate_frame(frame)?;
        let (terminal_width, _) = self.terminal_size;
        let center_col = terminal_width / 2;
        let prefix_width = PivotSegments::of(frame).prefix_width();
        Ok(center_col.saturating_sub(prefix_width))
    }
}

impl Default for CellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer for CellRenderer {
    fn render(&mut self, frame: &Frame) -> Result<(), RendererError> {
        validate_frame(frame)?;

        // Drawing happens on the next UI redraw, which reads current_frame()
        self.current = Some(frame.clone());
        self.frames_rendered += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RendererError> {
        self.current = None;
        Ok(())
    }
}
