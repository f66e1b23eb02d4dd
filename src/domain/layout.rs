use std::ops::Range;

/// Vertical font metrics in the same unit as horizontal measurements.
///
/// Follows the usual typographic convention: `ascent` is negative (above the
/// baseline) and `descent` is positive (below it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    /// One terminal cell per line, text sitting on the bottom edge of the cell.
    pub const TERMINAL: FontMetrics = FontMetrics {
        ascent: -1.0,
        descent: 0.0,
    };

    pub fn line_height(&self) -> f32 {
        self.descent - self.ascent
    }
}

/// Character range of one laid-out line.
///
/// `end` is exclusive and includes a trailing `\n` when the line was ended by
/// a hard break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBounds {
    pub start: usize,
    pub end: usize,
    /// Horizontal extent of the line's visible content.
    pub width: f32,
    pub hard_break: bool,
}

impl LineBounds {
    /// End of the line's content, excluding a trailing hard break.
    pub fn content_end(&self) -> usize {
        if self.hard_break {
            self.end - 1
        } else {
            self.end
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Result of laying out one candidate string at a given width.
///
/// Offsets are `char` indices. A snapshot describes exactly one string and is
/// never reused for another.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    lines: Vec<LineBounds>,
    /// Caret x for every offset in `0..=len`, relative to the left edge of the
    /// line holding that offset.
    carets: Vec<f32>,
    line_height: f32,
}

impl LayoutSnapshot {
    /// Builds a snapshot from line bounds and per-offset carets.
    ///
    /// `carets` must hold one entry per char plus one for the end-of-text
    /// caret, and `lines` must be non-empty.
    pub fn new(lines: Vec<LineBounds>, carets: Vec<f32>, metrics: FontMetrics) -> Self {
        debug_assert!(!lines.is_empty());
        debug_assert!(!carets.is_empty());
        Self {
            lines,
            carets,
            line_height: metrics.line_height(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[LineBounds] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&LineBounds> {
        self.lines.get(index)
    }

    /// Number of chars in the laid-out text.
    pub fn len(&self) -> usize {
        self.carets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Index of the line holding `offset`. The end-of-text offset belongs to
    /// the last line; a soft-wrap boundary belongs to the line it starts.
    pub fn line_for_offset(&self, offset: usize) -> usize {
        let index = self.lines.partition_point(|line| line.end <= offset);
        index.min(self.lines.len() - 1)
    }

    /// Top edge of `line`, relative to the top of the text.
    pub fn line_top(&self, line: usize) -> f32 {
        line as f32 * self.line_height
    }

    /// Caret x of `offset` on the line that holds it.
    pub fn primary_horizontal(&self, offset: usize) -> f32 {
        self.carets[offset.min(self.len())]
    }

    /// Caret x of `offset`, preferring the end of the previous line when the
    /// offset sits on a soft-wrap boundary.
    pub fn secondary_horizontal(&self, offset: usize) -> f32 {
        let index = self.line_for_offset(offset);
        if index > 0 && self.lines[index].start == offset {
            let previous = &self.lines[index - 1];
            if !previous.hard_break {
                return previous.width;
            }
        }
        self.primary_horizontal(offset)
    }
}

/// Contract of the text shaping service the fold logic measures against.
///
/// Implementations carry their own font/paint, so every call measures in the
/// current font. Offsets and counts are `char` based.
pub trait LayoutProbe {
    /// Lays `text` out into lines no wider than `max_width`.
    fn layout(&self, text: &str, max_width: f32) -> LayoutSnapshot;

    /// Width of `text` rendered on a single line.
    fn measure_width(&self, text: &str) -> f32;

    /// Number of chars of `range` that fit in `max_width`, counted from the
    /// start of the range when `forward`, otherwise from its end.
    fn break_text(&self, text: &str, range: Range<usize>, forward: bool, max_width: f32) -> usize;

    fn font_metrics(&self) -> FontMetrics;
}

impl<P: LayoutProbe + ?Sized> LayoutProbe for &P {
    fn layout(&self, text: &str, max_width: f32) -> LayoutSnapshot {
        (**self).layout(text, max_width)
    }

    fn measure_width(&self, text: &str) -> f32 {
        (**self).measure_width(text)
    }

    fn break_text(&self, text: &str, range: Range<usize>, forward: bool, max_width: f32) -> usize {
        (**self).break_text(text, range, forward, max_width)
    }

    fn font_metrics(&self) -> FontMetrics {
        (**self).font_metrics()
    }
}
