use crate::chart::ChartWidget;
use crate::dashboard::Dashboard;
use crate::palette::Rgba;
use crate::source::DataSource;
use crate::view::CustomerRow;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState,
    },
    Frame, Terminal,
};
use std::f64::consts::TAU;
use std::io;

/// Inner radius of the doughnut, as a fraction of the outer radius
const DOUGHNUT_HOLE: f64 = 0.5;
const DOUGHNUT_STEPS: usize = 80;

pub struct App {
    pub dashboard: Dashboard,
    source: Box<dyn DataSource>,
    pub state: TableState,
}

impl App {
    /// Build the app and perform the initial load
    pub fn new(source: Box<dyn DataSource>) -> Self {
        let mut app = Self {
            dashboard: Dashboard::new(),
            source,
            state: TableState::default(),
        };
        app.reload();
        app
    }

    pub fn reload(&mut self) {
        self.dashboard.load(self.source.as_ref());
        self.clamp_selection();
    }

    pub fn sort_by_name(&mut self) {
        self.dashboard.sort_customers_by_name();
    }

    pub fn toggle_amount_sort(&mut self) {
        self.dashboard.toggle_amount_sort();
    }

    pub fn rows(&self) -> &[CustomerRow] {
        self.dashboard.table().rows()
    }

    pub fn selected_row(&self) -> Option<&CustomerRow> {
        self.state.selected().and_then(|i| self.rows().get(i))
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        let selected = match self.state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub fn next(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, event::read);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut next_event: impl FnMut() -> io::Result<Event>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = next_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('n') => app.sort_by_name(),
                KeyCode::Char('a') => app.toggle_amount_sort(),
                KeyCode::Char('r') => app.reload(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                _ => {}
            }
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content[1]);

    render_table(f, content[0], app);
    render_bar_chart(f, charts[0], app.dashboard.bar_chart());
    render_doughnut(f, charts[1], app.dashboard.doughnut_chart());
    render_status_bar(f, chunks[1], app);
}

fn to_color(rgba: &Rgba) -> Color {
    Color::Rgb(rgba.r, rgba.g, rgba.b)
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["ID", "Name", "Transactions"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|row| {
            let lines: Vec<Line> = row
                .transactions
                .iter()
                .map(|tx| {
                    Line::from(vec![
                        Span::styled(format!("{:>10}", tx.amount), Style::default().fg(Color::Green)),
                        Span::raw("  "),
                        Span::raw(tx.date.clone()),
                    ])
                })
                .collect();
            let height = lines.len().max(1) as u16;

            Row::new(vec![
                Cell::from(row.id.to_string()),
                Cell::from(row.name.clone()),
                Cell::from(Text::from(lines)),
            ])
            .height(height)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(24),
            Constraint::Min(24),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Customers "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_bar_chart(f: &mut Frame, area: Rect, widget: Option<&ChartWidget>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Total per Customer ");

    let Some(widget) = widget else {
        f.render_widget(block, area);
        return;
    };

    let bars: Vec<Bar> = widget
        .labels
        .iter()
        .zip(&widget.series.data)
        .zip(&widget.series.border_color)
        .map(|((label, value), color)| {
            Bar::default()
                .value(value.max(0.0).round() as u64)
                .text_value(value.to_string())
                .label(Line::from(label.clone()))
                .style(Style::default().fg(to_color(color)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(8)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

/// Points of each doughnut slice on a `steps` x `steps` grid over [-1, 1]².
/// Slices run clockwise from twelve o'clock; non-positive values get none.
pub fn doughnut_slices(values: &[f64], steps: usize) -> Vec<Vec<(f64, f64)>> {
    let mut slices = vec![Vec::new(); values.len()];
    let total: f64 = values.iter().filter(|v| **v > 0.0).fold(0.0, |sum, v| sum + v);
    if total <= 0.0 || steps == 0 {
        return slices;
    }

    let mut bounds = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    for value in values {
        acc += value.max(0.0) / total;
        bounds.push(acc);
    }

    for i in 0..=steps {
        for j in 0..=steps {
            let x = -1.0 + 2.0 * i as f64 / steps as f64;
            let y = -1.0 + 2.0 * j as f64 / steps as f64;
            let r = x.hypot(y);
            if !(DOUGHNUT_HOLE..=1.0).contains(&r) {
                continue;
            }

            let mut theta = x.atan2(y);
            if theta < 0.0 {
                theta += TAU;
            }
            let fraction = theta / TAU;

            let slice = bounds
                .iter()
                .position(|b| fraction < *b)
                .unwrap_or(values.len() - 1);
            slices[slice].push((x, y));
        }
    }

    slices
}

fn render_doughnut(f: &mut Frame, area: Rect, widget: Option<&ChartWidget>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Share per Customer ");

    let Some(widget) = widget else {
        f.render_widget(block, area);
        return;
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(block.inner(area));
    f.render_widget(block, area);

    let slices = doughnut_slices(&widget.series.data, DOUGHNUT_STEPS);
    let colors: Vec<Color> = widget.series.border_color.iter().map(to_color).collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (points, color) in slices.iter().zip(&colors) {
                ctx.draw(&Points {
                    coords: points,
                    color: *color,
                });
            }
        });
    f.render_widget(canvas, halves[0]);

    let legend: Vec<Line> = (0..widget.labels.len())
        .filter_map(|i| {
            let text = widget.tooltip(i)?;
            let color = colors.get(i).copied().unwrap_or(Color::White);
            Some(Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(text),
            ]))
        })
        .collect();
    f.render_widget(Paragraph::new(legend), halves[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.rows().len();

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("n", Style::default().fg(Color::Yellow)),
        Span::raw(" Sort by name | "),
        Span::styled("a", Style::default().fg(Color::Yellow)),
        Span::raw(format!(" Sort by amount ({}) | ", app.dashboard.sort_order().label())),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Reload | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
