//! Helpers shared by unit and integration tests

use std::collections::HashMap;
use std::ops::Range;

use ratatui::buffer::Buffer;
use unicode_width::UnicodeWidthStr;

use crate::domain::layout::{FontMetrics, LayoutProbe, LayoutSnapshot};
use crate::infrastructure::cell_probe::{break_chars, cell_width, wrap_chars};

/// Rows of a buffer as strings, skipping the filler cells behind wide glyphs.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            let mut x = area.left();
            while x < area.right() {
                let symbol = buf[(x, y)].symbol();
                line.push_str(symbol);
                x += symbol.width().max(1) as u16;
            }
            line
        })
        .collect()
}

/// Probe measuring in pixels with a fixed advance per terminal cell, to
/// exercise the fold logic with fractional widths and a non-unit line height.
#[derive(Debug, Clone, Copy)]
pub struct PixelProbe {
    pub advance: f32,
    pub metrics: FontMetrics,
}

impl PixelProbe {
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            metrics: FontMetrics {
                ascent: -11.5,
                descent: 3.25,
            },
        }
    }

    fn char_width(&self, c: char) -> f32 {
        cell_width(c) * self.advance
    }
}

impl LayoutProbe for PixelProbe {
    fn layout(&self, text: &str, max_width: f32) -> LayoutSnapshot {
        wrap_chars(text, max_width, |c| self.char_width(c), self.metrics)
    }

    fn measure_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum()
    }

    fn break_text(&self, text: &str, range: Range<usize>, forward: bool, max_width: f32) -> usize {
        break_chars(text, range, forward, max_width, |c| self.char_width(c))
    }

    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }
}

/// Probe with per-glyph advances, one unit for any char not listed.
#[derive(Debug, Clone, Default)]
pub struct GlyphProbe {
    advances: HashMap<char, f32>,
}

impl GlyphProbe {
    pub fn new(advances: impl IntoIterator<Item = (char, f32)>) -> Self {
        Self {
            advances: advances.into_iter().collect(),
        }
    }

    fn char_width(&self, c: char) -> f32 {
        if c == '\n' {
            return 0.0;
        }
        self.advances.get(&c).copied().unwrap_or(1.0)
    }
}

impl LayoutProbe for GlyphProbe {
    fn layout(&self, text: &str, max_width: f32) -> LayoutSnapshot {
        wrap_chars(text, max_width, |c| self.char_width(c), FontMetrics::TERMINAL)
    }

    fn measure_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum()
    }

    fn break_text(&self, text: &str, range: Range<usize>, forward: bool, max_width: f32) -> usize {
        break_chars(text, range, forward, max_width, |c| self.char_width(c))
    }

    fn font_metrics(&self) -> FontMetrics {
        FontMetrics::TERMINAL
    }
}
