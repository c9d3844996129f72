//! Terminal UI: take a view of the dashboard state, render it, poll keys.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};
use tokio::sync::RwLock;

use crate::dashboard::{Dashboard, DashboardView};
use crate::table::{CellClass, StatusTable, TableCell};

const PANEL_COUNT: usize = 3;
const SCROLL_STEP: usize = 5;

struct ConsoleUi {
    dashboard: Arc<RwLock<Dashboard>>,
    /// Which table panel has scroll focus.
    focus: usize,
    scroll: [usize; PANEL_COUNT],
}

impl ConsoleUi {
    fn new(dashboard: Arc<RwLock<Dashboard>>) -> Self {
        Self {
            dashboard,
            focus: 0,
            scroll: [0; PANEL_COUNT],
        }
    }

    fn render(&self, frame: &mut Frame, view: &DashboardView) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Banner
                Constraint::Min(8),    // Tables
                Constraint::Length(4), // Status line + hints
            ])
            .split(frame.area());

        self.render_banner(frame, outer[0], view);
        self.render_tables(frame, outer[1], view);
        self.render_status(frame, outer[2], view);
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, view: &DashboardView) {
        let block = Block::default()
            .title(" mixwatch ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let text = view
            .banner
            .as_deref()
            .unwrap_or("Mix network status console");
        let line = Line::from(Span::styled(
            format!("  {}", text.lines().next().unwrap_or_default()),
            Style::default().fg(Color::White),
        ));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_tables(&self, frame: &mut Frame, area: Rect, view: &DashboardView) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        let areas = [columns[0], right[0], right[1]];
        for (index, rect) in areas.iter().enumerate() {
            match view.tables.get(index) {
                Some(table) => self.render_panel(frame, *rect, table, index),
                None => self.render_empty_panel(frame, *rect),
            }
        }
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, table: &StatusTable, index: usize) {
        let focused = index == self.focus;
        let block = Block::default()
            .title(format!(" {} ({}) ", table.title, table.rows.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));

        if table.rows.is_empty() {
            let text = Paragraph::new(Line::from(Span::styled(
                "  Waiting for data...",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(text, area);
            return;
        }

        let scroll = self.scroll[index].min(table.rows.len().saturating_sub(1));
        let rows: Vec<Row> = table
            .rows
            .iter()
            .skip(scroll)
            .map(|row| Row::new(row.iter().map(cell_widget).collect::<Vec<_>>()))
            .collect();

        let widths = vec![Constraint::Ratio(1, table.columns.len().max(1) as u32); table.columns.len()];
        let widget = Table::new(rows, widths).block(block).header(
            Row::new(table.columns.iter().map(|c| format!("  {c}")).collect::<Vec<_>>())
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(widget, area);
    }

    fn render_empty_panel(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let text = Paragraph::new(Line::from(Span::styled(
            "  Waiting for first snapshot...",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(text, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, view: &DashboardView) {
        let block = Block::default()
            .title(" Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let status_line = match &view.status_line {
            Some(error) => Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            )),
            None => {
                let updated = view
                    .last_updated
                    .map(|ts| ts.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "never".to_string());
                Line::from(vec![
                    Span::styled("  Last updated: ", Style::default().fg(Color::Gray)),
                    Span::styled(updated, Style::default().fg(Color::Green)),
                    Span::styled("  |  Cycles: ", Style::default().fg(Color::Gray)),
                    Span::styled(view.cycles.to_string(), Style::default().fg(Color::White)),
                    Span::styled("  |  Identities: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        view.resolved_identities.to_string(),
                        Style::default().fg(Color::Cyan),
                    ),
                ])
            }
        };

        let hint_line = Line::from(Span::styled(
            "  q to quit  |  Tab to switch panel  |  PgUp/PgDn to scroll",
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(vec![status_line, hint_line]).block(block), area);
    }

    /// Handle a key press. Returns `true` when the console should exit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Char('q'), _) => return true,
            (KeyCode::Tab, _) => {
                self.focus = (self.focus + 1) % PANEL_COUNT;
            }
            (KeyCode::PageUp, _) => {
                self.scroll[self.focus] = self.scroll[self.focus].saturating_sub(SCROLL_STEP);
            }
            (KeyCode::PageDown, _) => {
                self.scroll[self.focus] += SCROLL_STEP;
            }
            _ => {}
        }
        false
    }
}

fn class_color(class: CellClass) -> Color {
    match class {
        CellClass::Mixer => Color::Magenta,
        CellClass::Gatekeeper => Color::Yellow,
        CellClass::Client => Color::Cyan,
        CellClass::True => Color::Green,
        CellClass::False => Color::Red,
    }
}

fn cell_widget(cell: &TableCell) -> ratatui::widgets::Cell<'static> {
    // Routing-path cells carry per-hop styling.
    if !cell.segments.is_empty() {
        let mut spans = vec![Span::raw("  ")];
        for (i, segment) in cell.segments.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" → ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(
                segment.label.clone(),
                Style::default().fg(class_color(segment.class.into())),
            ));
        }
        return ratatui::widgets::Cell::from(Line::from(spans));
    }

    let style = cell
        .classes
        .iter()
        .next()
        .map(|class| Style::default().fg(class_color(*class)))
        .unwrap_or_default();
    ratatui::widgets::Cell::from(Span::styled(format!("  {}", cell.text), style))
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the console UI event loop until the operator quits.
pub async fn run_console(dashboard: Arc<RwLock<Dashboard>>) -> Result<(), anyhow::Error> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!("mixwatch requires a terminal (TTY)."));
    }

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut ui = ConsoleUi::new(dashboard);

    let tick_rate = Duration::from_millis(100); // ~10fps

    loop {
        let view = ui.dashboard.read().await.view();

        terminal.draw(|frame| {
            ui.render(frame, &view);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press
                    && ui.handle_key(key_event.code, key_event.modifiers)
                {
                    break;
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
