use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::MenuItem;

const BANNER: &str = r#"
 ╔══════════════════════════════════════════════════════════╗
 ║   ▄▀▀▄ █  █ ▄▀▀▀ ▀█▀ █  █ ▄▀▀▄ █▀▀▄ █▀▀▀ █▀▀▄ ▄▀▀▀     ║
 ║   █▀▀▄ █  █ ▀▀▀▄  █  █  █ █▀▀█ █  █ █▀▀  █▀▀▄ ▀▀▀▄     ║
 ║   ▀  ▀  ▀▀  ▀▀▀   ▀   ▀▀  ▀  ▀ ▀▀▀  ▀▀▀▀ ▀  ▀ ▀▀▀      ║
 ╚══════════════════════════════════════════════════════════╝"#;

struct ModeTile {
    item: MenuItem,
    key: &'static str,
    icon: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const MODE_TILES: [ModeTile; 2] = [
    ModeTile {
        item: MenuItem::Campaign,
        key: "1",
        icon: "👾",
        desc: "Three waves, then\nthe mothership.",
        color: Color::Rgb(80, 255, 80),
        border_color: Color::Rgb(40, 140, 40),
    },
    ModeTile {
        item: MenuItem::Infinite,
        key: "2",
        icon: "♾",
        desc: "Endless waves and a\nboss every 3 minutes.",
        color: Color::Rgb(100, 180, 255),
        border_color: Color::Rgb(50, 90, 140),
    },
];

fn render_mode_tile(frame: &mut Frame, area: Rect, tile: &ModeTile, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}] ", tile.key),
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(
            tile.item.title(),
            Style::default().fg(name_color).add_modifier(Modifier::BOLD),
        ),
    ])];
    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(desc_line, Style::default().fg(desc_color))));
    }
    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn controls() -> Vec<Line<'static>> {
    let key = Style::default().fg(Color::Rgb(80, 200, 255));
    let text = Style::default().fg(Color::Rgb(140, 140, 140));
    let row = |k: &'static str, t: &'static str| {
        Line::from(vec![Span::styled(k, key), Span::styled(t, text)])
    };
    vec![
        Line::from(""),
        row("    ← → / A D       ", "Move cannon"),
        row("    Space / ↑       ", "Shoot (4 shots in the air at most)"),
        row("    P / Esc         ", "Pause"),
        row("    R               ", "Restart"),
        row("    Q               ", "Back to menu / quit"),
        Line::from(""),
        Line::from(Span::styled(
            "    Shields absorb shots from both sides.",
            Style::default().fg(Color::Rgb(100, 100, 120)),
        )),
    ]
}

pub fn render_menu(frame: &mut Frame, area: Rect, selected: MenuItem) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Banner
            Constraint::Length(2), // Subtitle
            Constraint::Length(7), // Mode tiles
            Constraint::Min(6),    // Controls
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  Defend the planet  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let modes_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Modes · ↑↓ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let modes_inner = modes_block.inner(chunks[2]);
    frame.render_widget(modes_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(modes_inner);
    for (tile, col) in MODE_TILES.iter().zip(cols.iter()) {
        render_mode_tile(frame, *col, tile, tile.item == selected);
    }

    let controls_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
        .title(" Controls ")
        .title_style(Style::default().fg(Color::Rgb(120, 120, 140)));
    let controls_inner = controls_block.inner(chunks[3]);
    frame.render_widget(controls_block, chunks[3]);
    frame.render_widget(Paragraph::new(controls()), controls_inner);
}
