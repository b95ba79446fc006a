pub mod field;
pub mod hud;
pub mod menu;

use ratatui::prelude::*;
use ratatui::widgets::*;

use rustvaders::Phase;

use crate::app::App;

const ACCENT: Color = Color::Rgb(255, 220, 80);
const PANEL_BG: Color = Color::Rgb(15, 15, 25);

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Content
        ])
        .split(frame.area());

    hud::render_title(frame, app, chunks[0]);

    match app.phase() {
        Phase::MainMenu => menu::render_menu(frame, chunks[1], app.selected),
        Phase::Playing | Phase::GameOver | Phase::GameWon => render_game(frame, app, chunks[1]),
    }

    if let Some(won) = app.effects.banner() {
        render_ending(frame, frame.area(), won, app.world.state().score());
    }
}

fn render_game(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let snap = app.world.snapshot();
    let bar_height = u16::from(app.boss_bar.visible);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(bar_height),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    hud::render_status(frame, &snap, chunks[0]);
    if app.boss_bar.visible {
        hud::render_boss_bar(frame, app.boss_bar.fraction, chunks[1]);
    }
    field::render_field(frame, &snap, app, chunks[2]);
    hud::render_footer(frame, &snap, chunks[3]);
}

fn render_ending(frame: &mut Frame, area: Rect, won: bool, score: u32) {
    let overlay_w = 40u16.min(area.width.saturating_sub(4));
    let overlay_h = 9u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let (title, color, message) = if won {
        (" VICTORY ", Color::Rgb(80, 255, 120), "Every invader is gone!")
    } else {
        (" GAME OVER ", Color::Rgb(255, 80, 80), "The invaders got through.")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let key = Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::Rgb(100, 100, 130));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Rgb(180, 180, 200)))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Final score: {score}"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", key),
            Span::styled(" menu  ", dim),
            Span::styled("R", key),
            Span::styled(" again  ", dim),
            Span::styled("Q", key),
            Span::styled(" quit", dim),
        ]),
    ];

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(PANEL_BG));
    frame.render_widget(p, inner);
}
