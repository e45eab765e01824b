// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Terminal preview of the rack map.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};

use crate::render::color::Rgb;
use crate::render::scene::{Bounds, Scene};
use crate::summary::RackSummary;

const TITLE_BG: Color = Color::DarkGray;
const LABEL_COLOR: Color = Color::White;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// A solid rectangle in canvas coordinates (y up, as ratatui expects)
struct FilledRect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Color,
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        let (Some((c0, r0)), Some((c1, r1))) =
            (painter.get_point(self.x0, self.y0), painter.get_point(self.x1, self.y1))
        else {
            return;
        };
        for col in c0.min(c1)..=c0.max(c1) {
            for row in r0.min(r1)..=r0.max(r1) {
                painter.paint(col, row, self.color);
            }
        }
    }
}

/// What the preview shows
pub struct Preview<'a> {
    pub title: String,
    pub scene: &'a Scene,
    pub summaries: &'a [RackSummary],
}

/// Show the map until the user quits with q, Esc or Ctrl-C
pub fn run_preview(preview: &Preview) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, preview);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, preview: &Preview) -> Result<()> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| render_preview(f, preview))?;
            needs_redraw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                },
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
    }
}

/// Render the whole preview screen
pub fn render_preview(frame: &mut Frame, preview: &Preview) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Map
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_title(frame, chunks[0], preview);
    render_map(frame, chunks[1], preview.scene);
    render_footer(frame, chunks[2], preview.summaries);
}

fn render_title(frame: &mut Frame, area: Rect, preview: &Preview) {
    let title = Line::from(Span::styled(
        format!(" {} ", preview.title),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title).style(Style::default().bg(TITLE_BG)), area);
}

fn render_map(frame: &mut Frame, area: Rect, scene: &Scene) {
    // Labels take a single terminal row; the padding covers them
    let bounds = scene
        .bounds(0.0)
        .unwrap_or(Bounds { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 })
        .padded(0.5);
    // Scene y grows downwards, the canvas y upwards
    let flip = |y: f64| bounds.min_y + bounds.max_y - y;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::NONE))
        .marker(Marker::HalfBlock)
        .x_bounds([bounds.min_x, bounds.max_x])
        .y_bounds([bounds.min_y, bounds.max_y])
        .paint(|ctx| {
            for rect in &scene.rects {
                ctx.draw(&FilledRect {
                    x0: rect.x,
                    y0: flip(rect.y),
                    x1: rect.x + rect.width,
                    y1: flip(rect.y + rect.height),
                    color: rect.fill.into(),
                });
            }
            for label in &scene.labels {
                ctx.print(
                    label.x,
                    flip(label.y),
                    Span::styled(label.text.clone(), Style::default().fg(LABEL_COLOR)),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn render_footer(frame: &mut Frame, area: Rect, summaries: &[RackSummary]) {
    let nodes: u32 = summaries.iter().map(|s| s.nodes).sum();
    let unavailable: u32 = summaries.iter().map(|s| s.unavailable).sum();
    let overloaded: u32 = summaries.iter().map(|s| s.overloaded).sum();

    let text = Span::styled(
        format!(
            " {} racks  {} nodes  {} offline  {} overloaded | q:quit ",
            summaries.len(),
            nodes,
            unavailable,
            overloaded
        ),
        Style::default().fg(Color::Gray),
    );
    frame.render_widget(Paragraph::new(Line::from(text)), area);
}
