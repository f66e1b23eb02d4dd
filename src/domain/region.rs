//! Geometry of the fold/expand affordance
//!
//! Regions are recomputed from the current layout on every draw and never
//! stored, so measurement and drawing cannot observe each other's leftovers.

use std::ops::Range;

use tracing::debug;

use super::config::{FoldConfig, IndicatorMode, TipGravity};
use super::geometry::{RegionRect, ViewBox};
use super::layout::{FontMetrics, LayoutSnapshot};
use super::toggle::ToggleState;

/// Rectangle(s) covered by the toggle affordance, in component coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleRegion {
    pub primary: RegionRect,
    /// Second band when the expand label wraps onto another line.
    pub wrapped: Option<RegionRect>,
    /// Top-left corner of the chevron, in icon mode.
    pub icon_anchor: Option<(f32, f32)>,
}

impl ToggleRegion {
    pub fn rects(&self) -> impl Iterator<Item = &RegionRect> {
        std::iter::once(&self.primary).chain(self.wrapped.iter())
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rects().any(|rect| rect.contains(x, y))
    }

    pub fn is_within(&self, bounds: &RegionRect) -> bool {
        self.rects().all(|rect| rect.is_within(bounds))
    }
}

/// Everything the region depends on for one draw.
#[derive(Debug, Clone)]
pub struct RegionInput<'a> {
    pub config: &'a FoldConfig,
    pub state: ToggleState,
    pub view: ViewBox,
    pub metrics: FontMetrics,
    pub is_over_max_line: bool,
    pub original_line_count: usize,
    pub fold_label_width: f32,
    /// Layout of the text currently displayed.
    pub displayed: &'a LayoutSnapshot,
    /// Char range of the expand label inside the displayed text.
    pub expand_label: Option<Range<usize>>,
}

/// Computes the toggle region, or `None` when no affordance is shown.
pub fn compute_region(input: &RegionInput<'_>) -> Option<ToggleRegion> {
    if !input.is_over_max_line {
        return None;
    }

    match input.state {
        ToggleState::Collapsed => Some(collapsed_region(input)),
        ToggleState::Expanded => expanded_region(input),
    }
}

fn collapsed_region(input: &RegionInput<'_>) -> ToggleRegion {
    let view = &input.view;
    let padding = &view.padding;
    let max_y = view.height - padding.bottom;
    let (min_x, max_x) = match input.config.gravity {
        TipGravity::End => {
            let right = view.width - padding.right;
            (right - input.fold_label_width, right)
        }
        TipGravity::Start => (padding.left, padding.left + input.fold_label_width),
    };

    let primary = RegionRect {
        min_x,
        max_x,
        min_y: max_y - input.metrics.line_height(),
        max_y,
    }
    .clamped_to(&view.content_rect());

    let icon_anchor = (input.config.indicator == IndicatorMode::Icon).then(|| {
        (
            primary.min_x + input.config.icon_width(),
            icon_top(input, primary.max_y),
        )
    });

    ToggleRegion {
        primary,
        wrapped: None,
        icon_anchor,
    }
}

fn expanded_region(input: &RegionInput<'_>) -> Option<ToggleRegion> {
    let label = input.expand_label.clone().filter(|label| !label.is_empty())?;
    let snapshot = input.displayed;
    let first_line = snapshot.line_for_offset(label.start);
    let last_line = snapshot.line_for_offset(label.end - 1);
    let start_x = snapshot.primary_horizontal(label.start);
    let end_x = snapshot.secondary_horizontal(label.end);

    debug!(
        original_line_count = input.original_line_count,
        line_count = snapshot.line_count(),
        first_line,
        last_line,
        "expand label placement"
    );

    let (primary, wrapped) = if first_line == last_line {
        (band(input, first_line, start_x, end_x), None)
    } else {
        let first_width = snapshot
            .line(first_line)
            .map_or(start_x, |line| line.width);
        (
            band(input, first_line, start_x, first_width),
            Some(band(input, last_line, 0.0, end_x)),
        )
    };

    let icon_anchor = (input.config.indicator == IndicatorMode::Icon).then(|| {
        let last = wrapped.unwrap_or(primary);
        (last.max_x, icon_top(input, last.max_y))
    });

    Some(ToggleRegion {
        primary,
        wrapped,
        icon_anchor,
    })
}

/// One line-height band of `line`, spanning `from_x..to_x` within the line.
fn band(input: &RegionInput<'_>, line: usize, from_x: f32, to_x: f32) -> RegionRect {
    let padding = &input.view.padding;
    let top = padding.top + input.displayed.line_top(line);
    RegionRect {
        min_x: padding.left + from_x,
        max_x: padding.left + to_x,
        min_y: top,
        max_y: top + input.metrics.line_height(),
    }
    .clamped_to(&input.view.content_rect())
}

/// Top of the chevron so that it rests on the baseline of the line ending at `bottom`.
fn icon_top(input: &RegionInput<'_>, bottom: f32) -> f32 {
    bottom - input.metrics.descent - input.config.icon_height()
}
