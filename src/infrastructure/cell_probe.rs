//! Terminal text measurement
//!
//! Lays text out in terminal cells: every char advances by its
//! `unicode-width`, lines break before the first char that would overflow the
//! width, and `\n` forces a break.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::domain::layout::{FontMetrics, LayoutProbe, LayoutSnapshot, LineBounds};

/// `LayoutProbe` measuring in terminal cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellProbe;

impl CellProbe {
    pub fn new() -> Self {
        Self
    }
}

pub fn cell_width(c: char) -> f32 {
    if c.is_control() {
        0.0
    } else {
        c.width().unwrap_or(0) as f32
    }
}

impl LayoutProbe for CellProbe {
    fn layout(&self, text: &str, max_width: f32) -> LayoutSnapshot {
        wrap_chars(text, max_width, cell_width, FontMetrics::TERMINAL)
    }

    fn measure_width(&self, text: &str) -> f32 {
        text.chars().map(cell_width).sum()
    }

    fn break_text(&self, text: &str, range: Range<usize>, forward: bool, max_width: f32) -> usize {
        break_chars(text, range, forward, max_width, cell_width)
    }

    fn font_metrics(&self) -> FontMetrics {
        FontMetrics::TERMINAL
    }
}

/// Greedy per-char line breaking.
///
/// A char wider than `max_width` still occupies a line of its own, so every
/// line except a trailing empty one holds at least one char.
pub fn wrap_chars(
    text: &str,
    max_width: f32,
    advance: impl Fn(char) -> f32,
    metrics: FontMetrics,
) -> LayoutSnapshot {
    let mut lines = Vec::new();
    let mut carets = Vec::with_capacity(text.len() + 1);
    let mut line_start = 0;
    let mut x = 0.0;
    let mut len = 0;

    for (i, c) in text.chars().enumerate() {
        len = i + 1;
        if c == '\n' {
            carets.push(x);
            lines.push(LineBounds {
                start: line_start,
                end: i + 1,
                width: x,
                hard_break: true,
            });
            line_start = i + 1;
            x = 0.0;
            continue;
        }

        let w = advance(c);
        if x + w > max_width && i > line_start {
            lines.push(LineBounds {
                start: line_start,
                end: i,
                width: x,
                hard_break: false,
            });
            line_start = i;
            x = 0.0;
        }
        carets.push(x);
        x += w;
    }

    carets.push(x);
    lines.push(LineBounds {
        start: line_start,
        end: len,
        width: x,
        hard_break: false,
    });

    LayoutSnapshot::new(lines, carets, metrics)
}

/// Counts how many chars of `range` fit in `max_width`, from the front of the
/// range when `forward`, else from its back.
pub fn break_chars(
    text: &str,
    range: Range<usize>,
    forward: bool,
    max_width: f32,
    advance: impl Fn(char) -> f32,
) -> usize {
    let chars: Vec<char> = text
        .chars()
        .skip(range.start)
        .take(range.end.saturating_sub(range.start))
        .collect();

    let mut width = 0.0;
    let mut count = 0;
    let mut fits = |c: &char| {
        width += advance(*c);
        if width <= max_width {
            count += 1;
            true
        } else {
            false
        }
    };

    if forward {
        for c in chars.iter() {
            if !fits(c) {
                break;
            }
        }
    } else {
        for c in chars.iter().rev() {
            if !fits(c) {
                break;
            }
        }
    }

    count
}
