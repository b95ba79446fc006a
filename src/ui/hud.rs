use ratatui::prelude::*;
use ratatui::widgets::*;

use rustvaders::{Mode, Phase, Snapshot};

use crate::app::App;

const SEPARATOR: &str = " | ";

pub fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.phase() {
        Phase::MainMenu => " Main menu ".to_string(),
        _ => match app.world.state().mode() {
            Mode::Campaign => " Campaign ".to_string(),
            Mode::Infinite => " Infinite ".to_string(),
        },
    };

    let title = Paragraph::new(Line::from(Span::styled(
        mode,
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .border_type(BorderType::Rounded)
            .title(" 👾 Rustvaders ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(200, 120, 255))
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(title, area);
}

pub fn render_status(frame: &mut Frame, snap: &Snapshot<'_>, area: Rect) {
    let sep = || Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray));
    let lives = "\u{2666} ".repeat(snap.lives as usize);

    let mut spans = vec![
        Span::styled(
            format!(" Score: {} ", snap.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("Lives: {lives}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        sep(),
    ];

    match snap.mode {
        Mode::Campaign => spans.push(Span::styled(
            format!("Level: {} ", snap.level),
            Style::default().fg(Color::Green),
        )),
        Mode::Infinite => {
            let secs = snap.infinite_elapsed.as_secs();
            spans.push(Span::styled(
                format!("Wave: {} ", snap.wave),
                Style::default().fg(Color::Green),
            ));
            spans.push(sep());
            spans.push(Span::styled(
                format!("Time: {:02}:{:02} ", secs / 60, secs % 60),
                Style::default().fg(Color::Cyan),
            ));
        }
    }

    spans.push(sep());
    spans.push(Span::styled(
        format!("Invaders: {} ", snap.enemies.len()),
        Style::default().fg(Color::Rgb(255, 80, 80)),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_boss_bar(frame: &mut Frame, fraction: f32, area: Rect) {
    let ratio = f64::from(fraction.clamp(0.0, 1.0));
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(Color::Rgb(220, 60, 200))
                .bg(Color::Rgb(40, 10, 40)),
        )
        .ratio(ratio)
        .label(Span::styled(
            format!("BOSS {:>3.0}%", ratio * 100.0),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(gauge, area);
}

pub fn render_footer(frame: &mut Frame, snap: &Snapshot<'_>, area: Rect) {
    let line = if snap.paused {
        Line::from(vec![Span::styled(
            " PAUSED - Press P to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )])
    } else if snap.phase == Phase::GameOver {
        Line::from(vec![Span::styled(
            " GAME OVER ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )])
    } else if snap.phase == Phase::GameWon {
        Line::from(vec![Span::styled(
            " VICTORY ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )])
    } else {
        let dim = Style::default().fg(Color::DarkGray);
        let sep = Style::default().fg(Color::Rgb(60, 60, 60));
        Line::from(vec![
            Span::styled(" \u{2190}\u{2192}/AD Move ", dim),
            Span::styled("| ", sep),
            Span::styled(
                "Space Shoot ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", sep),
            Span::styled("P Pause ", dim),
            Span::styled("| ", sep),
            Span::styled("R Restart ", dim),
            Span::styled("| ", sep),
            Span::styled("Q Menu", dim),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}
