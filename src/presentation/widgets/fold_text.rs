use std::ops::Range;

use ratatui::{prelude::*, widgets::Widget};

use crate::domain::{config::IndicatorMode, layout::LayoutProbe, toggle::ToggleState};
use crate::model::fold_text::FoldText;

/// One drawing primitive, in component coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A glyph run whose top-left corner is at `(x, top)`.
    Text {
        text: String,
        x: f32,
        top: f32,
        color: Option<Color>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        stroke_width: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chevron {
    Down,
    Up,
}

/// Builds the display list for the component's current frame.
pub fn paint<P: LayoutProbe>(fold: &FoldText<P>) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    let (Some(frame), Some(view)) = (fold.frame(), fold.view()) else {
        return ops;
    };
    let config = fold.config();
    let chars: Vec<char> = frame.display.chars().collect();

    for (index, line) in frame.layout.lines().iter().enumerate() {
        let top = view.padding.top + frame.layout.line_top(index);
        for (range, tinted) in runs(line.start..line.content_end(), frame.tip.as_ref()) {
            ops.push(DrawOp::Text {
                text: chars[range.clone()].iter().collect(),
                x: view.padding.left + frame.layout.primary_horizontal(range.start),
                top,
                color: tinted.then_some(config.tip_color),
            });
        }
    }

    let Some(region) = fold.region() else {
        return ops;
    };
    match (frame.state, config.indicator, region.icon_anchor) {
        (ToggleState::Collapsed, IndicatorMode::Text, _) => ops.push(DrawOp::Text {
            text: config.fold_label(),
            x: region.primary.min_x,
            top: region.primary.min_y,
            color: Some(config.tip_color),
        }),
        (ToggleState::Collapsed, IndicatorMode::Icon, Some(anchor)) => {
            ops.extend(chevron(anchor, Chevron::Down, fold));
        }
        (ToggleState::Expanded, IndicatorMode::Icon, Some(anchor)) => {
            ops.extend(chevron(anchor, Chevron::Up, fold));
        }
        _ => {}
    }

    ops
}

/// Splits a line into runs inside and outside the tinted range.
fn runs(line: Range<usize>, tint: Option<&Range<usize>>) -> Vec<(Range<usize>, bool)> {
    let Some(tint) = tint else {
        return if line.is_empty() {
            vec![]
        } else {
            vec![(line, false)]
        };
    };

    let clamp = |offset: usize| offset.clamp(line.start, line.end);
    let (tint_start, tint_end) = (clamp(tint.start), clamp(tint.end));
    [
        (line.start..tint_start, false),
        (tint_start..tint_end, true),
        (tint_end..line.end, false),
    ]
    .into_iter()
    .filter(|(range, _)| !range.is_empty())
    .collect()
}

fn chevron<P: LayoutProbe>(
    (left, top): (f32, f32),
    direction: Chevron,
    fold: &FoldText<P>,
) -> [DrawOp; 2] {
    let config = fold.config();
    let size = config.icon_size;
    let (outer, apex) = match direction {
        Chevron::Down => (top, top + size),
        Chevron::Up => (top + size, top),
    };
    let line = |from: (f32, f32), to: (f32, f32)| DrawOp::Line {
        from,
        to,
        color: config.icon_color,
        stroke_width: config.icon_stroke_width,
    };

    [
        line((left, outer), (left + size, apex)),
        line((left + size, apex), (left + size * 2.0, outer)),
    ]
}

/// Renders a [`FoldText`] into a terminal buffer.
pub struct FoldTextWidget<'a, P> {
    fold: &'a FoldText<P>,
    style: Style,
}

impl<'a, P: LayoutProbe> FoldTextWidget<'a, P> {
    pub fn new(fold: &'a FoldText<P>) -> Self {
        Self {
            fold,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl<P: LayoutProbe> Widget for FoldTextWidget<'_, P> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.style);
        for op in paint(self.fold) {
            match op {
                DrawOp::Text { text, x, top, color } => {
                    let Some((x, y)) = cell_at(area, x, top) else {
                        continue;
                    };
                    let style = color.map_or(self.style, |color| self.style.fg(color));
                    buf.set_stringn(x, y, text, (area.right() - x) as usize, style);
                }
                DrawOp::Line {
                    from, to, color, ..
                } => draw_line(buf, area, from, to, self.style.fg(color)),
            }
        }
    }
}

/// Buffer position of component point `(x, y)`, if it falls inside `area`.
fn cell_at(area: Rect, x: f32, y: f32) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let x = area.x as f32 + x.floor();
    let y = area.y as f32 + y.floor();
    if x >= area.right() as f32 || y >= area.bottom() as f32 {
        return None;
    }
    Some((x as u16, y as u16))
}

/// Approximates a line segment with box-drawing glyphs, one per cell crossed.
fn draw_line(buf: &mut Buffer, area: Rect, from: (f32, f32), to: (f32, f32), style: Style) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let symbol = if dy == 0.0 {
        "─"
    } else if dx == 0.0 {
        "│"
    } else if (dx > 0.0) == (dy > 0.0) {
        "╲"
    } else {
        "╱"
    };

    let steps = dx.abs().max(dy.abs()).round().max(1.0) as usize;
    for step in 0..steps {
        let t = (step as f32 + 0.5) / steps as f32;
        if let Some(position) = cell_at(area, from.0 + dx * t, from.1 + dy * t) {
            buf[position].set_symbol(symbol).set_style(style);
        }
    }
}
