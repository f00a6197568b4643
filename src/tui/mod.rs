//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing a region, purchase price,
//! buyer profile and amortization, then renders the qualifying income against
//! the income distribution and the all-regions comparison.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
};

use crate::app::pipeline::{Scenario, ScenarioOutput, run_scenario};
use crate::config::AffordConfig;
use crate::error::{AppError, Result};
use crate::report::{fmt_count, fmt_money};

mod plotters_chart;

use plotters_chart::DistributionChart;

const PRICE_STEP: f64 = 25_000.0;
const PRICE_MIN: f64 = 25_000.0;
const PRICE_MAX: f64 = 5_000_000.0;
const AMORTIZATION_MAX: u32 = 40;
const FIELD_COUNT: usize = 4;

/// Start the TUI.
pub fn run(config: AffordConfig) -> Result<()> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
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

struct App {
    config: AffordConfig,
    scenario: Scenario,
    price_input: String,
    selected_field: usize,
    editing_price: bool,
    status: String,
    output: Option<ScenarioOutput>,
}

impl App {
    fn new(config: AffordConfig) -> Self {
        let region = config.regions.ids().first().map(|s| s.to_string()).unwrap_or_default();
        let mut app = Self {
            config,
            scenario: Scenario {
                price: 800_000.0,
                region,
                first_time_buyer: true,
            },
            price_input: String::new(),
            selected_field: 0,
            editing_price: false,
            status: "Ready.".to_string(),
            output: None,
        };
        app.recompute();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
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

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_price {
            self.handle_price_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == 1 {
                    self.editing_price = true;
                    self.price_input.clear();
                    self.status = "Editing price. Enter to apply, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('f') => {
                self.scenario.first_time_buyer = !self.scenario.first_time_buyer;
                self.recompute();
            }
            KeyCode::Char('e') => self.export_comparison(),
            _ => {}
        }

        false
    }

    fn handle_price_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_price = false;
                self.status = "Price edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_price = false;
                self.apply_price_input();
            }
            KeyCode::Backspace => {
                self.price_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '.' {
                    self.price_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => self.cycle_region(delta),
            1 => {
                let next = self.scenario.price + PRICE_STEP * f64::from(delta);
                self.scenario.price = next.clamp(PRICE_MIN, PRICE_MAX);
            }
            2 => self.scenario.first_time_buyer = !self.scenario.first_time_buyer,
            3 => {
                let current = self.config.amortization_years;
                let years = i64::from(current) + i64::from(delta) * 5;
                // A configured term past the usual maximum stays reachable.
                let max = i64::from(AMORTIZATION_MAX.max(current));
                self.config.amortization_years = years.clamp(5, max) as u32;
            }
            _ => return,
        }
        self.recompute();
    }

    fn cycle_region(&mut self, delta: i32) {
        let n = self.config.regions.len();
        if n == 0 {
            return;
        }
        let current = self.config.regions.index_of(&self.scenario.region).unwrap_or(0);
        let next = (current as i64 + i64::from(delta)).rem_euclid(n as i64) as usize;
        if let Some(rule) = self.config.regions.rules().get(next) {
            self.scenario.region = rule.id.clone();
        }
    }

    fn apply_price_input(&mut self) {
        let trimmed = self.price_input.trim();
        match trimmed.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => {
                self.scenario.price = price;
                self.recompute();
            }
            _ => {
                self.status = format!("Invalid price '{trimmed}'.");
            }
        }
    }

    fn recompute(&mut self) {
        match run_scenario(&self.config, &self.scenario) {
            Ok(output) => {
                debug!("tui scenario: {:?}", self.scenario);
                self.status = format!(
                    "{}: {:.0}% down, {:.1}% rate",
                    output.rule.id,
                    output.result.down_payment_fraction * 100.0,
                    output.result.annual_rate * 100.0
                );
                self.output = Some(output);
            }
            Err(err) => {
                self.status = err.to_string();
                self.output = None;
            }
        }
    }

    fn export_comparison(&mut self) {
        let Some(output) = &self.output else {
            self.status = "Nothing to export.".to_string();
            return;
        };
        let ts = Local::now().format("%Y%m%d_%H%M%S");
        let path = PathBuf::from(format!("afford_compare_{ts}.csv"));
        self.status = match crate::io::write_comparison_csv(&path, self.scenario.price, &output.comparison) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
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
            Span::styled("afford", Style::default().fg(Color::Cyan)),
            Span::raw(" - Canada home affordability"),
        ]));

        if let Some(out) = &self.output {
            lines.push(Line::from(Span::styled(
                format!(
                    "min income: {} | can afford: {} ({:.1}%) | down payment: {}",
                    fmt_money(out.result.minimum_income),
                    fmt_count(out.estimate.rounded_count()),
                    out.estimate.percent(),
                    fmt_money(out.result.down_payment),
                ),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "monthly payment: {} | 28% housing ratio | {}y amortization",
                    fmt_money(out.result.monthly_payment),
                    out.result.amortization_years,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);

        self.draw_chart(frame, cols[0]);
        self.draw_comparison(frame, cols[1]);
        self.draw_settings(frame, rows[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Income Distribution").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(out) = &self.output else {
            let msg = Paragraph::new("No result.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let (density, x_bounds, y_bounds) = chart_series(out);
        let widget = DistributionChart {
            density: &density,
            threshold: Some(out.result.minimum_income),
            x_bounds,
            y_bounds,
            x_label: "annual income",
            y_label: "% of peak",
            fmt_x: fmt_axis_income,
            fmt_y: fmt_axis_pct,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_comparison(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("All Regions").borders(Borders::ALL);
        let Some(out) = &self.output else {
            frame.render_widget(block, area);
            return;
        };

        let rows: Vec<Row> = out
            .comparison
            .iter()
            .map(|row| {
                let highlight = row.region == out.rule.id;
                let style = if highlight {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let cells = match &row.outcome {
                    Ok(r) => vec![
                        Cell::from(row.region.clone()),
                        Cell::from(fmt_money(r.minimum_income)),
                        Cell::from(fmt_count(r.count.round().max(0.0) as u64)),
                        Cell::from(format!("{:.1}%", r.fraction * 100.0)),
                    ],
                    Err(_) => vec![
                        Cell::from(row.region.clone()),
                        Cell::from("error"),
                        Cell::from("-"),
                        Cell::from("-"),
                    ],
                };
                Row::new(cells).style(style)
            })
            .collect();

        let header = Row::new(vec!["Region", "Min Income", "Can Afford", "% Pop"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
        let widths = [
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(6),
        ];
        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let price_label = if self.editing_price {
            format!("${}_", self.price_input)
        } else {
            fmt_money(self.scenario.price)
        };

        let items = vec![
            ListItem::new(format!("Region: {}", self.scenario.region)),
            ListItem::new(format!("Price: {price_label}")),
            ListItem::new(format!(
                "First-time buyer: {}",
                if self.scenario.first_time_buyer { "yes" } else { "no" }
            )),
            ListItem::new(format!("Amortization: {} years", self.config.amortization_years)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter type price  f first-time  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build the chart series: density scaled to percent of its peak.
fn chart_series(out: &ScenarioOutput) -> (Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let peak = out.curve.max_density();
    let scale = if peak > 0.0 { 100.0 / peak } else { 1.0 };
    let density: Vec<(f64, f64)> = out.curve.density_points().map(|(x, y)| (x, y * scale)).collect();

    let x0 = out.curve.income.first().copied().unwrap_or(0.0);
    let x1 = out.curve.income.last().copied().unwrap_or(1.0);
    (density, [x0, x1], [0.0, 105.0])
}

fn fmt_axis_income(v: f64) -> String {
    format!("${:.0}k", v / 1_000.0)
}

fn fmt_axis_pct(v: f64) -> String {
    format!("{v:.0}")
}
