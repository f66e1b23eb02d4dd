use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
};
use tracing::debug;

use crate::{
    domain::geometry::{Insets, ViewBox},
    infrastructure::{
        cell_probe::CellProbe,
        config::Config,
        tui::{Event, Frame, TuiLike},
    },
    model::fold_text::{FoldText, Message},
    presentation::widgets::fold_text::FoldTextWidget,
};

pub const SAMPLE_TEXT: &str = "\
Folded text keeps long passages to a few lines and ends the last one with an \
ellipsis and a label. Press Enter or Space, or click the text, to expand it \
and read the rest; do it again to fold it back. Resize the terminal to see \
the cut move with the width. 长文本在折叠时只显示前几行，点击后展开全文，\
再次点击即可收起。幅の広い文字も一文字ずつ正しく折り返される。";

/// Event loop hosting a single fold text component on a terminal.
pub struct AppRunner<T: TuiLike> {
    tui: T,
    fold: FoldText<CellProbe>,
    padding: u16,
    fold_area: Rect,
    should_quit: bool,
}

impl<T: TuiLike> AppRunner<T> {
    pub fn new(config: &Config, text: impl Into<String>, tui: T) -> Self {
        let mut fold = FoldText::new(CellProbe::new(), config.fold.clone());
        fold.set_text(text);
        Self {
            tui,
            fold,
            padding: config.padding,
            fold_area: Rect::default(),
            should_quit: false,
        }
    }

    pub fn fold(&self) -> &FoldText<CellProbe> {
        &self.fold
    }

    pub fn tui(&self) -> &T {
        &self.tui
    }

    /// Area the component occupied in the last frame.
    pub fn fold_area(&self) -> Rect {
        self.fold_area
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        self.render()?;

        while !self.should_quit {
            let Some(event) = self.tui.next().await else {
                break;
            };
            self.handle_event(event)?;
            if self.fold.needs_redraw() {
                self.render()?;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => {
                self.tui.resize(Rect::new(0, 0, w, h))?;
                self.render()?;
            }
            Event::Render => self.render()?,
            Event::Error => log::error!("Terminal event stream failed"),
            Event::Init
            | Event::Tick
            | Event::FocusGained
            | Event::FocusLost
            | Event::Paste(_) => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.fold.update(Message::Click),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.fold_area.contains(Position::new(mouse.column, mouse.row)) {
            debug!(column = mouse.column, row = mouse.row, "click on fold text");
            self.fold.update(Message::Click);
        }
    }

    fn render(&mut self) -> Result<()> {
        let fold = &mut self.fold;
        let padding = self.padding;
        let mut fold_area = self.fold_area;
        self.tui.draw(&mut |frame: &mut Frame<'_>| {
            fold_area = draw(frame, fold, padding);
        })?;
        self.fold_area = fold_area;
        self.fold.mark_drawn();
        Ok(())
    }
}

/// Lays out and draws one frame, returning the area given to the component.
fn draw(frame: &mut Frame<'_>, fold: &mut FoldText<CellProbe>, padding: u16) -> Rect {
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
    let block = Block::bordered().title(" foldtext ");
    let inner = block.inner(main);
    frame.render_widget(block, main);

    let mut view = ViewBox::new(
        f32::from(inner.width),
        f32::from(inner.height),
        Insets::horizontal(f32::from(padding)),
    );
    fold.update(Message::LayoutChanged(view));
    fold.update(Message::PreDraw);

    // Second pass: the component takes only the rows it needs.
    let height = (fold.desired_height(&view).ceil() as u16).min(inner.height);
    view.height = f32::from(height);
    fold.update(Message::LayoutChanged(view));

    let area = Rect { height, ..inner };
    frame.render_widget(FoldTextWidget::new(fold), area);

    let status_line = format!(
        " {} | enter/space/click: toggle | q: quit",
        fold.state()
    );
    frame.render_widget(
        Paragraph::new(status_line).style(Style::default().fg(Color::DarkGray)),
        status,
    );
    area
}
