use std::ops::Range;

use ratatui::style::Color;
use tracing::{debug, info};

use crate::domain::{
    config::{FoldConfig, TipGravity},
    geometry::ViewBox,
    layout::{LayoutProbe, LayoutSnapshot},
    region::{compute_region, RegionInput, ToggleRegion},
    toggle::ToggleState,
    truncation::{truncate, Truncation},
};

/// Host events delivered to a fold text component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The component was clicked anywhere inside its bounds.
    Click,
    /// The host finished a layout pass with these bounds.
    LayoutChanged(ViewBox),
    /// The host is about to draw.
    PreDraw,
}

/// Host signal a deferred computation waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    PreDraw,
    LayoutChanged,
}

/// Computation queued until the host can measure, tied to the text it was
/// queued for.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFormat {
    pub text: String,
    pub hook: Hook,
}

/// Result of one pass of the fold pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldFrame {
    pub state: ToggleState,
    pub truncation: Truncation,
    /// Text as displayed in `state`.
    pub display: String,
    /// Char range of `display` drawn in the tip color.
    pub tip: Option<Range<usize>>,
    pub layout: LayoutSnapshot,
}

impl FoldFrame {
    pub fn is_over_max_line(&self) -> bool {
        self.truncation.is_over_max_line
    }

    pub fn line_count(&self) -> usize {
        self.layout.line_count()
    }
}

/// A block of text folded to a line budget, with a more/less toggle.
///
/// Owns the text, its settings and the fold state. Layout only happens after
/// the host reported bounds and signalled its first draw; until then work is
/// parked in a single pending slot.
pub struct FoldText<P> {
    probe: P,
    config: FoldConfig,
    text: String,
    state: ToggleState,
    view: Option<ViewBox>,
    pending: Option<PendingFormat>,
    frame: Option<FoldFrame>,
    /// First pre-draw seen.
    primed: bool,
    /// Frame must be recomputed on the next draw.
    stale: bool,
    needs_redraw: bool,
}

impl<P: LayoutProbe> FoldText<P> {
    pub fn new(probe: P, config: FoldConfig) -> Self {
        Self {
            probe,
            config,
            text: String::new(),
            state: ToggleState::Collapsed,
            view: None,
            pending: None,
            frame: None,
            primed: false,
            stale: false,
            needs_redraw: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn view(&self) -> Option<&ViewBox> {
        self.view.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingFormat> {
        self.pending.as_ref()
    }

    pub fn frame(&self) -> Option<&FoldFrame> {
        self.frame.as_ref()
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Acknowledges a redraw request.
    pub fn mark_drawn(&mut self) {
        self.needs_redraw = false;
    }

    /// Height the component wants for its current frame, padding included.
    pub fn desired_height(&self, view: &ViewBox) -> f32 {
        let lines = self.frame.as_ref().map_or(0, FoldFrame::line_count);
        let line_height = self.probe.font_metrics().line_height();
        lines as f32 * line_height + view.padding.top + view.padding.bottom
    }

    /// Replaces the text. The fold state is kept.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.needs_redraw = true;
        self.schedule();
    }

    /// Sets the fold state; the frame follows on the next draw.
    pub fn set_expand(&mut self, expand: bool) -> &mut Self {
        let state = ToggleState::from_expanded(expand);
        if state != self.state {
            self.state = state;
            self.invalidate();
        }
        self
    }

    pub fn set_show_max_line(&mut self, max_lines: usize) {
        self.config.max_lines = max_lines;
        self.invalidate();
    }

    pub fn set_fold_text(&mut self, fold_text: impl Into<String>) {
        self.config.fold_text = fold_text.into();
        self.invalidate();
    }

    pub fn set_expand_text(&mut self, expand_text: impl Into<String>) {
        self.config.expand_text = expand_text.into();
        self.invalidate();
    }

    pub fn set_tip_gravity(&mut self, gravity: TipGravity) {
        self.config.gravity = gravity;
        self.invalidate();
    }

    pub fn set_show_tip_after_expand(&mut self, show: bool) {
        self.config.show_tip_after_expand = show;
        self.invalidate();
    }

    pub fn set_tip_color(&mut self, color: Color) {
        self.config.tip_color = color;
        self.needs_redraw = true;
    }

    pub fn set_icon_color(&mut self, color: Color) {
        self.config.icon_color = color;
        self.needs_redraw = true;
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Click => self.toggle(),
            Message::LayoutChanged(view) => self.on_layout_changed(view),
            Message::PreDraw => self.on_pre_draw(),
        }
    }

    /// Toggle region for the current frame and bounds.
    pub fn region(&self) -> Option<ToggleRegion> {
        let frame = self.frame.as_ref()?;
        let view = self.view?;
        compute_region(&RegionInput {
            config: &self.config,
            state: frame.state,
            view,
            metrics: self.probe.font_metrics(),
            is_over_max_line: frame.is_over_max_line(),
            original_line_count: frame.truncation.original_line_count,
            fold_label_width: self.probe.measure_width(&self.config.fold_label()),
            displayed: &frame.layout,
            expand_label: frame.tip.clone(),
        })
    }

    fn toggle(&mut self) {
        self.state = self.state.toggled();
        self.needs_redraw = true;
        info!(state = %self.state, "toggled");

        if self.pending.is_some() {
            debug!("toggle coalesced into pending layout");
            return;
        }
        self.schedule();
    }

    fn invalidate(&mut self) {
        self.stale = true;
        self.needs_redraw = true;
    }

    /// Runs the pipeline now if the host can measure, otherwise parks it.
    fn schedule(&mut self) {
        let hook = if !self.primed {
            Hook::PreDraw
        } else if self.view.is_none() {
            Hook::LayoutChanged
        } else {
            self.pending = None;
            self.run();
            return;
        };

        debug!(?hook, "deferring fold until host signal");
        self.pending = Some(PendingFormat {
            text: self.text.clone(),
            hook,
        });
    }

    fn on_pre_draw(&mut self) {
        self.primed = true;

        if let Some(pending) = self.take_pending(Hook::PreDraw) {
            if self.view.is_some() {
                self.run();
            } else {
                self.pending = Some(PendingFormat {
                    hook: Hook::LayoutChanged,
                    ..pending
                });
            }
            return;
        }

        if self.stale && self.pending.is_none() && self.view.is_some() {
            self.run();
        }
    }

    fn on_layout_changed(&mut self, view: ViewBox) {
        let reflows = self.view.map_or(true, |previous| previous.reflows(&view));
        if self.view != Some(view) {
            self.needs_redraw = true;
        }
        self.view = Some(view);

        if self.take_pending(Hook::LayoutChanged).is_some() {
            self.run();
            return;
        }

        if reflows && self.primed && self.pending.is_none() {
            self.run();
        }
    }

    /// Takes the pending task if it waits for `hook`. `set_text` replaces the
    /// slot, so a task always belongs to the current text.
    fn take_pending(&mut self, hook: Hook) -> Option<PendingFormat> {
        if self.pending.as_ref()?.hook != hook {
            return None;
        }
        self.pending.take()
    }

    fn run(&mut self) {
        let Some(view) = self.view else {
            return;
        };

        let truncation = truncate(&self.text, &self.config, &self.probe, &view);
        let (display, tip) = match self.state {
            ToggleState::Collapsed => (truncation.text.clone(), None),
            ToggleState::Expanded
                if truncation.is_over_max_line && self.config.shows_expand_label() =>
            {
                let label = self.config.expand_label();
                let start = self.text.chars().count();
                let end = start + label.chars().count();
                (format!("{}{label}", self.text), Some(start..end))
            }
            ToggleState::Expanded => (self.text.clone(), None),
        };
        let layout = self.probe.layout(&display, view.content_width());

        debug!(
            state = %self.state,
            over = truncation.is_over_max_line,
            lines = layout.line_count(),
            "fold frame ready"
        );

        self.frame = Some(FoldFrame {
            state: self.state,
            truncation,
            display,
            tip,
            layout,
        });
        self.stale = false;
        self.needs_redraw = true;
    }
}
