//! Cutting text down to a line budget
//!
//! The cut is computed against a [`LayoutProbe`] so that, with the indicator
//! at the end of the line, the ellipsis and the fold label fit on the last
//! visible line.

use tracing::{debug, trace};

use super::config::{FoldConfig, TipGravity};
use super::geometry::ViewBox;
use super::layout::{LayoutProbe, LayoutSnapshot, LineBounds};

pub const ELLIPSIS: &str = "…";

/// Outcome of fitting a text into the configured line budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncation {
    /// Text to display while collapsed.
    pub text: String,
    pub is_over_max_line: bool,
    /// Line count of the unmodified text.
    pub original_line_count: usize,
    /// Char offset where the original text was cut.
    pub cut: Option<usize>,
}

impl Truncation {
    fn untouched(text: &str, original_line_count: usize) -> Self {
        Self {
            text: text.to_string(),
            is_over_max_line: false,
            original_line_count,
            cut: None,
        }
    }
}

/// Fits `text` into `config.max_lines` lines of the content box of `view`.
pub fn truncate<P>(text: &str, config: &FoldConfig, probe: &P, view: &ViewBox) -> Truncation
where
    P: LayoutProbe + ?Sized,
{
    let width = view.content_width();
    let snapshot = probe.layout(text, width);
    let original_line_count = snapshot.line_count();

    if text.is_empty() || config.max_lines == 0 || original_line_count <= config.max_lines {
        debug!(
            original_line_count,
            max_lines = config.max_lines,
            "text fits, no truncation"
        );
        return Truncation::untouched(text, original_line_count);
    }

    let chars: Vec<char> = text.chars().collect();
    let last_line = snapshot.lines()[config.max_lines - 1];
    let end = match config.gravity {
        TipGravity::End => fit_end(text, &chars, &last_line, &snapshot, config, probe, width),
        // The indicator goes on a line of its own, the last char makes room for the ellipsis.
        TipGravity::Start => last_line.end.saturating_sub(1).max(last_line.start),
    };

    let mut truncated: String = chars[..end].iter().collect();
    truncated.push_str(ELLIPSIS);
    if config.gravity == TipGravity::Start {
        truncated.push('\n');
    }

    debug!(
        original_line_count,
        max_lines = config.max_lines,
        cut = end,
        gravity = %config.gravity,
        "truncated text"
    );

    Truncation {
        text: truncated,
        is_over_max_line: true,
        original_line_count,
        cut: Some(end),
    }
}

/// Finds the cut on `line` that leaves room for the ellipsis and fold label.
///
/// `break_text` gives a first estimate, then the cut walks forward while the
/// right edge of the char before it stays left of the label, and finally
/// backs off until the ellipsis clears the label too. Neither walk leaves
/// `line`, so an indicator wider than the line cuts at the line start.
fn fit_end<P>(
    text: &str,
    chars: &[char],
    line: &LineBounds,
    snapshot: &LayoutSnapshot,
    config: &FoldConfig,
    probe: &P,
    width: f32,
) -> usize
where
    P: LayoutProbe + ?Sized,
{
    let fold_label = config.fold_label();
    let content_end = line.content_end();
    let estimate = probe.measure_width(&format!("{ELLIPSIS}{fold_label}"));
    let reserved = probe.break_text(text, line.start..content_end, false, estimate);
    let target_x = width - probe.measure_width(&fold_label);

    let mut end = (content_end - reserved).max(line.start + 1);
    while end <= content_end {
        let right = right_edge(chars, snapshot, probe, end);
        trace!(end, right, target_x, "probing fold cut");
        if right >= target_x {
            break;
        }
        end += 1;
    }

    // The walk stops one past the last char that fits.
    let mut cut = end - 1;

    // A partial glyph of overshoot can still push the ellipsis past the label.
    let ellipsis = probe.measure_width(ELLIPSIS);
    while cut > line.start && right_edge(chars, snapshot, probe, cut) + ellipsis > target_x {
        cut -= 1;
    }
    cut
}

/// Right edge of the char before `cut`. The caret at `cut` itself may sit on
/// the next line when `cut` is a soft-wrap boundary.
fn right_edge<P>(chars: &[char], snapshot: &LayoutSnapshot, probe: &P, cut: usize) -> f32
where
    P: LayoutProbe + ?Sized,
{
    let c = chars[cut - 1];
    snapshot.primary_horizontal(cut - 1) + probe.measure_width(c.encode_utf8(&mut [0; 4]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::domain::geometry::Insets;
    use crate::infrastructure::cell_probe::CellProbe;
    use crate::test_helpers::GlyphProbe;

    fn uneven() -> GlyphProbe {
        GlyphProbe::new([('W', 8.0), ('b', 0.5)])
    }

    fn view(width: f32) -> ViewBox {
        ViewBox::new(width, 10.0, Insets::default())
    }

    fn config(max_lines: usize, gravity: TipGravity) -> FoldConfig {
        FoldConfig {
            max_lines,
            gravity,
            ..FoldConfig::default()
        }
    }

    fn last_line(text: &str, width: f32) -> String {
        last_line_with(&CellProbe, text, width)
    }

    fn last_line_with<P: LayoutProbe>(probe: &P, text: &str, width: f32) -> String {
        let snapshot = probe.layout(text, width);
        let line = snapshot.lines()[snapshot.line_count() - 1];
        text.chars()
            .skip(line.start)
            .take(line.content_end() - line.start)
            .collect()
    }

    #[test]
    fn test_truncate_long_run_at_end() {
        let text = "a".repeat(200);
        let actual = truncate(&text, &config(4, TipGravity::End), &CellProbe, &view(20.0));

        assert!(actual.is_over_max_line);
        assert_eq!(actual.original_line_count, 10);
        assert_eq!(actual.cut, Some(72));
        assert_eq!(actual.text, format!("{}{ELLIPSIS}", "a".repeat(72)));
        assert_eq!(CellProbe.layout(&actual.text, 20.0).line_count(), 4);
        assert_eq!(last_line(&actual.text, 20.0), format!("{}…", "a".repeat(12)));
    }

    #[test]
    fn test_truncate_not_over_max_line() {
        let text = "a".repeat(200);
        let actual = truncate(&text, &config(20, TipGravity::End), &CellProbe, &view(20.0));

        assert!(!actual.is_over_max_line);
        assert_eq!(actual.original_line_count, 10);
        assert_eq!(actual.text, text);
        assert_eq!(actual.cut, None);
    }

    #[rstest]
    #[case("")]
    #[case("short")]
    fn test_truncate_short_or_empty_text(#[case] text: &str) {
        let actual = truncate(text, &config(1, TipGravity::End), &CellProbe, &view(20.0));
        assert!(!actual.is_over_max_line);
        assert_eq!(actual.text, text);
    }

    #[test]
    fn test_truncate_zero_max_lines() {
        let text = "a".repeat(200);
        let actual = truncate(&text, &config(0, TipGravity::End), &CellProbe, &view(20.0));
        assert!(!actual.is_over_max_line);
        assert_eq!(actual.text, text);
    }

    #[test]
    fn test_truncate_at_start_puts_indicator_on_its_own_line() {
        let text = "a".repeat(200);
        let actual = truncate(&text, &config(4, TipGravity::Start), &CellProbe, &view(20.0));

        assert!(actual.is_over_max_line);
        assert_eq!(actual.cut, Some(79));
        assert_eq!(actual.text, format!("{}…\n", "a".repeat(79)));
        let snapshot = CellProbe.layout(&actual.text, 20.0);
        assert_eq!(snapshot.line_count(), 5);
        assert!(snapshot.lines()[4].start == snapshot.lines()[4].end);
    }

    #[test]
    fn test_truncate_at_start_replaces_hard_break() {
        let text = "one\ntwo\nthree\nfour";
        let actual = truncate(text, &config(2, TipGravity::Start), &CellProbe, &view(20.0));
        assert_eq!(actual.text, "one\ntwo…\n");
    }

    #[test]
    fn test_truncate_hard_break_line_keeps_ellipsis_on_line() {
        let text = "first\nsecond\nthird\nfourth";
        let actual = truncate(text, &config(2, TipGravity::End), &CellProbe, &view(20.0));

        assert_eq!(actual.text, "first\nsecond…");
        assert_eq!(CellProbe.layout(&actual.text, 20.0).line_count(), 2);
    }

    #[test]
    fn test_truncate_double_width() {
        let text = "漢字".repeat(20);
        let actual = truncate(&text, &config(3, TipGravity::End), &CellProbe, &view(10.0));

        assert_eq!(actual.original_line_count, 8);
        assert_eq!(actual.cut, Some(11));
        assert_eq!(last_line(&actual.text, 10.0), "漢…");
    }

    #[test]
    fn test_truncate_indicator_wider_than_line() {
        let text = "a".repeat(30);
        let actual = truncate(&text, &config(2, TipGravity::End), &CellProbe, &view(5.0));

        assert!(actual.is_over_max_line);
        assert_eq!(actual.text, format!("{}…", "a".repeat(5)));
        assert_eq!(CellProbe.layout(&actual.text, 5.0).line_count(), 2);
    }

    #[test]
    fn test_truncate_respects_padding() {
        let text = "a".repeat(200);
        let padded = ViewBox::new(24.0, 10.0, Insets::horizontal(2.0));
        let actual = truncate(&text, &config(4, TipGravity::End), &CellProbe, &padded);
        assert_eq!(actual.cut, Some(72));
    }

    #[rstest]
    fn test_truncate_line_count_and_width_bound(
        #[values(12.0, 17.0, 20.0, 33.0)] width: f32,
        #[values(1, 2, 4, 7)] max_lines: usize,
        #[values("a", "ab 漢字 ", "lorem ipsum dolor\n")] unit: &str,
    ) {
        let text = unit.repeat(40);
        let config = config(max_lines, TipGravity::End);
        let line_count = CellProbe.layout(&text, width).line_count();
        let actual = truncate(&text, &config, &CellProbe, &view(width));

        if line_count <= max_lines {
            assert!(!actual.is_over_max_line);
            assert_eq!(actual.text, text);
            return;
        }

        assert!(actual.is_over_max_line);
        assert!(actual.text.ends_with(ELLIPSIS));
        assert_eq!(CellProbe.layout(&actual.text, width).line_count(), max_lines);

        let shown = format!("{}{}", last_line(&actual.text, width), config.fold_label());
        assert!(
            CellProbe.measure_width(&shown) <= width,
            "{shown:?} overflows {width}"
        );
    }

    #[test]
    fn test_truncate_cut_at_soft_wrap_clears_label() {
        let probe = uneven();
        let text = format!("{}b{}", "a".repeat(14), "W".repeat(10));
        let config = config(1, TipGravity::End);
        let actual = truncate(&text, &config, &probe, &view(20.0));

        assert!(actual.is_over_max_line);
        assert_eq!(actual.cut, Some(14));
        assert_eq!(actual.text, format!("{}…", "a".repeat(14)));
        let shown = format!("{}{}", actual.text, config.fold_label());
        assert_eq!(probe.measure_width(&shown), 20.0);
    }

    #[rstest]
    fn test_truncate_width_bound_with_uneven_glyphs(
        #[values(16.0, 20.0, 23.0, 31.0)] width: f32,
        #[values(1, 2, 3)] max_lines: usize,
        #[values("ab", "aaWbb ", "bbbW\n", "aaaaaaaaaaaaaabW")] unit: &str,
    ) {
        let probe = uneven();
        let text = unit.repeat(120);
        let config = config(max_lines, TipGravity::End);
        let actual = truncate(&text, &config, &probe, &view(width));

        assert!(actual.is_over_max_line);
        assert!(actual.text.ends_with(ELLIPSIS));
        assert_eq!(probe.layout(&actual.text, width).line_count(), max_lines);

        let shown = format!(
            "{}{}",
            last_line_with(&probe, &actual.text, width),
            config.fold_label()
        );
        assert!(
            probe.measure_width(&shown) <= width,
            "{shown:?} overflows {width}"
        );
    }
}
