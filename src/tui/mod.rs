//! Ratatui-based heatmap viewer.
//!
//! Figures are shown one at a time, in order. Closing a figure (`q`/`Esc`)
//! moves on to the next one and the viewer returns after the last, so a run
//! behaves like a sequence of blocking plot windows.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::error::AppError;
use crate::plot::HeatmapFigure;
use crate::plot::figure::format_value;
use crate::report::format_figure_line;

mod heatmap_widget;

use heatmap_widget::HeatmapWidget;

/// Start the viewer over `figures`.
pub fn run(figures: Vec<HeatmapFigure>) -> Result<(), AppError> {
    if figures.is_empty() {
        return Ok(());
    }

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::render(format!("Failed to initialize terminal: {e}")))?;

    let mut viewer = Viewer::new(figures);
    viewer.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::render(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::render(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Stay,
    Exit,
}

struct Viewer {
    figures: Vec<HeatmapFigure>,
    current: usize,
}

impl Viewer {
    fn new(figures: Vec<HeatmapFigure>) -> Self {
        Self { figures, current: 0 }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::render(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::render(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::render(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) == Action::Exit {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Action {
        match code {
            // Close the current figure; the run ends after the last one.
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                if self.current + 1 >= self.figures.len() {
                    return Action::Exit;
                }
                self.current += 1;
            }
            KeyCode::Char('x') => return Action::Exit,
            KeyCode::Right | KeyCode::Char('n') => {
                if self.current + 1 < self.figures.len() {
                    self.current += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('p') => {
                self.current = self.current.saturating_sub(1);
            }
            _ => {}
        }
        Action::Stay
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let figure = &self.figures[self.current];
        let lines = vec![
            Line::from(vec![
                Span::styled("sweep", Style::default().fg(Color::Cyan)),
                Span::raw(format!(
                    " | figure {}/{} | {} x {}",
                    self.current + 1,
                    self.figures.len(),
                    figure.y_param,
                    figure.x_param,
                )),
            ]),
            Line::from(Span::styled(
                format_figure_line(figure).trim().to_string(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                grid_summary(figure),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let figure = &self.figures[self.current];
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(HeatmapWidget { figure }, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "q/Esc/Enter: close figure | ←/→ or p/n: previous/next | x: quit";
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(
            Paragraph::new(help)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
    }
}

fn grid_summary(figure: &HeatmapFigure) -> String {
    let bounds = |grid: &[f64]| match (grid.first(), grid.last()) {
        (Some(first), Some(last)) => format!("{}..{}", format_value(*first), format_value(*last)),
        _ => "-".to_string(),
    };
    format!(
        "{}: {} values ({}) | {}: {} values ({})",
        figure.y_param,
        figure.y_grid.len(),
        bounds(&figure.y_grid),
        figure.x_param,
        figure.x_grid.len(),
        bounds(&figure.x_grid),
    )
}
