//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel with the sheet path and the three
//! period weight sliders, live price readouts, and a trend chart of the
//! median price per transaction year. Every change to the sheet or the
//! weights recomputes one `Summary`, so the chart and readouts always
//! describe the same state.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::cli::TuiArgs;
use crate::domain::{Summary, WeightConfig};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::plot::EMPTY_TREND_PLACEHOLDER;
use crate::report::{fmt_rm, fmt_weighted};
use crate::session::{Session, EMPTY_PROMPT};

mod plotters_chart;

use plotters_chart::TrendChart;

/// Weight slider step per left/right key press.
const WEIGHT_STEP: f64 = 0.05;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args.file);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_RUNTIME,
                format!("Failed to enter alternate screen: {e}"),
            ));
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

/// Settings fields, top to bottom.
const FIELD_SHEET: usize = 0;
const FIELD_W_RECENT: usize = 1;
const FIELD_W_MID: usize = 2;
const FIELD_W_OLD: usize = 3;
const FIELD_COUNT: usize = 4;

struct App {
    session: Session,
    summary: Summary,
    path_input: String,
    selected_field: usize,
    editing_path: bool,
    status: String,
}

impl App {
    fn new(initial_file: Option<PathBuf>) -> Self {
        let session = Session::new();
        let summary = session.summary();
        let mut app = Self {
            session,
            summary,
            path_input: String::new(),
            selected_field: FIELD_SHEET,
            editing_path: false,
            status: EMPTY_PROMPT.to_string(),
        };

        if let Some(path) = initial_file {
            app.path_input = path.display().to_string();
            app.load_sheet(&path);
        }
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read()
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))?
            {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_path {
            self.handle_path_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == FIELD_SHEET {
                    self.editing_path = true;
                    self.status =
                        "Editing sheet path. Enter to load, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('r') => {
                if let Some(path) = self.session.source().map(Path::to_path_buf) {
                    self.load_sheet(&path);
                } else {
                    self.status = EMPTY_PROMPT.to_string();
                }
            }
            _ => {}
        }

        false
    }

    fn handle_path_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_path = false;
                self.status = "Path edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_path = false;
                let path = PathBuf::from(self.path_input.trim());
                if path.as_os_str().is_empty() {
                    self.status = EMPTY_PROMPT.to_string();
                } else {
                    self.load_sheet(&path);
                }
            }
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Char(c) => {
                self.path_input.push(c);
            }
            _ => {}
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        let step = WEIGHT_STEP * delta as f64;
        let mut weights = self.session.weights();
        match self.selected_field {
            FIELD_W_RECENT => weights.recent = (weights.recent + step).clamp(0.0, 1.0),
            FIELD_W_MID => weights.mid = (weights.mid + step).clamp(0.0, 1.0),
            FIELD_W_OLD => weights.old = (weights.old + step).clamp(0.0, 1.0),
            _ => return,
        }
        // Replace the whole configuration, then recompute everything at once.
        self.session.set_weights(weights);
        self.refresh();
        self.status = format!(
            "weights: {:.2} / {:.2} / {:.2} (sum {:.2})",
            weights.recent,
            weights.mid,
            weights.old,
            weights.total()
        );
    }

    fn load_sheet(&mut self, path: &Path) {
        match self.session.load_file(path) {
            Ok(ingest) => {
                self.status = format!(
                    "Loaded '{}': {} of {} rows usable.",
                    path.display(),
                    ingest.rows_used,
                    ingest.rows_read
                );
            }
            Err(err) => {
                // The session already reverted to the empty state.
                self.status = format!("Error processing file: {err}");
            }
        }
        self.refresh();
    }

    /// Recompute the summary from the current session state.
    ///
    /// All readouts and the chart render from this one value, so a redraw can
    /// never mix results from different datasets or weight configurations.
    fn refresh(&mut self) {
        self.summary = self.session.summary();
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("lotdash", Style::default().fg(Color::Cyan)),
            Span::raw(" — shop lot transaction prices"),
        ]));

        let source = self
            .session
            .source()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!(
                "sheet: {source} | records: {} | location column: {}",
                self.session.dataset().len(),
                self.session.location_header(),
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(ingest) = self.session.last_ingest() {
            lines.push(Line::from(Span::styled(
                format!(
                    "rows read={} used={} rejected={}",
                    ingest.rows_read, ingest.rows_used, ingest.rows_rejected
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(10)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_panel(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Median Price Over Time")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.summary.yearly_medians.is_empty() {
            let msg = Paragraph::new(EMPTY_TREND_PLACEHOLDER)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        }

        let (line, markers, x_bounds, y_bounds) = trend_series(&self.summary);
        let widget = TrendChart {
            line: &line,
            markers: &markers,
            x_bounds,
            y_bounds,
            x_label: "transaction year",
            y_label: "median price (RM)",
            fmt_x: fmt_axis_year,
            fmt_y: fmt_axis_price,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_settings(frame, chunks[0]);
        self.draw_readouts(frame, chunks[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let weights = self.session.weights();
        let sheet_label = if self.path_input.trim().is_empty() {
            "-".to_string()
        } else {
            self.path_input.trim().to_string()
        };

        let items = vec![
            ListItem::new(format!("Sheet: {sheet_label}")),
            ListItem::new(format!("Weight 2020 & later:   {:.2}", weights.recent)),
            ListItem::new(format!("Weight 2000-2019:      {:.2}", weights.mid)),
            ListItem::new(format!("Weight 1999 & earlier: {:.2}", weights.old)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_path {
            let hint = Paragraph::new("Editing sheet path…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_readouts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(format!(
            "Median price:     {}",
            fmt_rm(self.summary.median_price)
        )));
        lines.push(Line::from(format!(
            "Weighted average: {}",
            fmt_weighted(&self.summary.weighted_average)
        )));

        let diagnostic = self.summary.weighted_average.diagnostic();
        if !diagnostic.is_empty() {
            lines.push(Line::from(Span::styled(
                diagnostic,
                Style::default().fg(Color::Red),
            )));
        } else if self.session.is_empty() {
            lines.push(Line::from(Span::styled(
                EMPTY_PROMPT,
                Style::default().fg(Color::Yellow),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Readouts").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust weight  Enter edit sheet  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for Plotters from the yearly-median series.
fn trend_series(summary: &Summary) -> (Vec<(f64, f64)>, Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let points: Vec<(f64, f64)> = summary
        .yearly_medians
        .iter()
        .map(|p| (p.year as f64, p.median_price))
        .collect();

    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in &points {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x0.is_finite() || !x1.is_finite() {
        x0 = 2000.0;
        x1 = 2025.0;
    }
    if x1 <= x0 {
        // A single year still needs a non-degenerate axis.
        x0 -= 1.0;
        x1 += 1.0;
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = y_max.max(1.0);
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [(y_min - pad).max(0.0), y_max + pad];

    (points.clone(), points, [x0, x1], y_bounds)
}

fn fmt_axis_year(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_price(v: f64) -> String {
    format!("{v:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{WeightedAverage, YearMedian};

    fn summary_with_years(points: &[(i32, f64)]) -> Summary {
        Summary {
            median_price: 0.0,
            weighted_average: WeightedAverage::Price(0.0),
            yearly_medians: points
                .iter()
                .map(|&(year, median_price)| YearMedian { year, median_price })
                .collect(),
        }
    }

    #[test]
    fn trend_series_bounds_cover_all_years() {
        let summary = summary_with_years(&[(1995, 300.0), (2021, 150.0)]);
        let (line, markers, x_bounds, y_bounds) = trend_series(&summary);
        assert_eq!(line.len(), 2);
        assert_eq!(markers.len(), 2);
        assert_eq!(x_bounds, [1995.0, 2021.0]);
        assert!(y_bounds[0] < 150.0 && y_bounds[1] > 300.0);
    }

    #[test]
    fn single_year_axis_is_widened() {
        let summary = summary_with_years(&[(2021, 150.0)]);
        let (_, _, x_bounds, _) = trend_series(&summary);
        assert_eq!(x_bounds, [2020.0, 2022.0]);
    }

    #[test]
    fn weight_adjustment_recomputes_summary() {
        let mut app = App::new(None);
        app.selected_field = FIELD_W_RECENT;
        app.adjust_field(1);
        let weights = app.session.weights();
        assert!((weights.recent - 0.55).abs() < 1e-9);
        // 0.55 + 0.3 + 0.2 != 1.0 -> the readout degrades to N/A.
        assert_eq!(app.summary.weighted_average, WeightedAverage::NotAdjusted);
    }

    #[test]
    fn weights_clamp_to_unit_range() {
        let mut app = App::new(None);
        app.selected_field = FIELD_W_OLD;
        for _ in 0..40 {
            app.adjust_field(-1);
        }
        assert_eq!(app.session.weights().old, 0.0);
    }
}
