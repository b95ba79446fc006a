use std::collections::HashMap;

use ratatui::prelude::*;
use ratatui::widgets::*;

use rustvaders::{BossKind, Snapshot};

use crate::app::App;
use crate::effects::EffectKind;

type Dots = HashMap<(usize, usize), u8>;

const BG: Color = Color::Rgb(0, 0, 5);

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

/// Character grid backed by braille dots: each cell holds 2x4 dots, and
/// world coordinates are scaled onto the dot raster.
struct Raster {
    grid: Vec<Vec<(char, Style)>>,
    cols: usize,
    rows: usize,
    dots_w: i32,
    dots_h: i32,
    scale_x: f32,
    scale_y: f32,
}

impl Raster {
    fn new(cols: usize, rows: usize, canvas_width: f32, canvas_height: f32) -> Self {
        let dots_w = (cols * 2) as i32;
        let dots_h = (rows * 4) as i32;
        Raster {
            grid: vec![vec![(' ', Style::default().bg(BG)); cols]; rows],
            cols,
            rows,
            dots_w,
            dots_h,
            scale_x: dots_w as f32 / canvas_width,
            scale_y: dots_h as f32 / canvas_height,
        }
    }

    fn to_dots(&self, x: f32, y: f32) -> (i32, i32) {
        ((x * self.scale_x) as i32, (y * self.scale_y) as i32)
    }

    fn set_dot(&self, map: &mut Dots, bx: i32, by: i32) {
        if bx < 0 || by < 0 || bx >= self.dots_w || by >= self.dots_h {
            return;
        }
        let (bx, by) = (bx as usize, by as usize);
        *map.entry((bx / 2, by / 4)).or_insert(0) |= braille_bit(bx % 2, by % 4);
    }

    fn sprite(&self, map: &mut Dots, cx: i32, cy: i32, pixels: &[(i32, i32)]) {
        for &(dx, dy) in pixels {
            self.set_dot(map, cx + dx, cy + dy);
        }
    }

    /// Fills a world-space box; `hollow` keeps only its outline.
    fn fill(&self, map: &mut Dots, rect: &rustvaders::Rect, hollow: bool) {
        let (x0, y0) = self.to_dots(rect.x, rect.y);
        let (x1, y1) = self.to_dots(rect.right(), rect.bottom());
        let x1 = x1.max(x0 + 1);
        let y1 = y1.max(y0 + 1);
        for by in y0..y1 {
            for bx in x0..x1 {
                let edge = bx == x0 || bx == x1 - 1 || by == y0 || by == y1 - 1;
                if !hollow || edge {
                    self.set_dot(map, bx, by);
                }
            }
        }
    }

    fn ring(&self, map: &mut Dots, x: f32, y: f32, radius: f32) {
        let (cx, cy) = self.to_dots(x, y);
        let rx = (radius * self.scale_x).max(1.0);
        let ry = (radius * self.scale_y).max(1.0);
        let steps = ((rx + ry) * 4.0) as i32 + 8;
        for i in 0..steps {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            self.set_dot(map, cx + (a.cos() * rx) as i32, cy + (a.sin() * ry) as i32);
        }
    }

    fn paint(&mut self, map: &Dots, color: Color, bold: bool) {
        for (&(cx, cy), &bits) in map {
            if cx < self.cols && cy < self.rows && bits != 0 {
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                let mut style = Style::default().fg(color).bg(BG);
                if bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                self.grid[cy][cx] = (ch, style);
            }
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

// Sprites are drawn on a ~7x5 dot grid centred on the entity.

const SQUID: [&[(i32, i32)]; 2] = [
    &[
        (0, -2),
        (-1, -1), (0, -1), (1, -1),
        (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
        (-2, 1), (0, 1), (2, 1),
        (-1, 2), (1, 2),
    ],
    &[
        (0, -2),
        (-1, -1), (0, -1), (1, -1),
        (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
        (-2, 1), (0, 1), (2, 1),
        (-3, 2), (3, 2),
    ],
];

const CRAB: [&[(i32, i32)]; 2] = [
    &[
        (-1, -2), (1, -2),
        (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
        (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-3, 2), (-2, 2), (2, 2), (3, 2),
    ],
    &[
        (-1, -2), (1, -2),
        (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
        (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-2, 2), (-1, 2), (1, 2), (2, 2),
    ],
];

const OCTOPUS: [&[(i32, i32)]; 2] = [
    &[
        (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
        (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
        (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-2, 2), (2, 2),
    ],
    &[
        (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
        (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
        (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
        (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
        (-3, 2), (3, 2),
    ],
];

const CANNON: &[(i32, i32)] = &[
    (0, -3),
    (-1, -2), (0, -2), (1, -2),
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
    (-4, 2), (-3, 2), (-2, 2), (-1, 2), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2),
];

/// Sprite and colour by difficulty tier.
fn invader_look(level: u32) -> (&'static [&'static [(i32, i32)]; 2], Color) {
    match level {
        0 | 1 => (&OCTOPUS, Color::Rgb(200, 180, 255)),
        2 => (&CRAB, Color::Rgb(80, 255, 150)),
        _ => (&SQUID, Color::Rgb(255, 80, 80)),
    }
}

pub fn shield_color(health_fraction: f32) -> Color {
    if health_fraction > 0.6 {
        Color::Rgb(60, 140, 255)
    } else if health_fraction > 0.3 {
        Color::Rgb(255, 160, 40)
    } else {
        Color::Rgb(230, 50, 50)
    }
}

fn build_field(snap: &Snapshot<'_>, app: &App, cols: usize, rows: usize) -> Raster {
    let mut raster = Raster::new(cols, rows, snap.canvas_width, snap.canvas_height);
    let anim = ((app.frame / 25) % 2) as usize;

    for enemy in snap.enemies {
        let mut map = Dots::new();
        let (x, y) = enemy.rect.center();
        let (cx, cy) = raster.to_dots(x, y);
        let (frames, color) = invader_look(enemy.level);
        raster.sprite(&mut map, cx, cy, frames[anim]);
        raster.paint(&map, color, false);
    }

    if let Some(boss) = snap.boss {
        let flashing = app
            .effects
            .iter()
            .any(|e| matches!(e.kind, EffectKind::BossFlash(_)));
        let color = match (flashing, boss.kind) {
            (true, _) => Color::White,
            (false, BossKind::Campaign) => Color::Rgb(220, 60, 200),
            (false, BossKind::Infinite) => Color::Rgb(255, 120, 40),
        };
        let mut map = Dots::new();
        raster.fill(&mut map, &boss.rect, true);
        let (x, y) = boss.rect.center();
        let (cx, cy) = raster.to_dots(x, y);
        raster.sprite(&mut map, cx, cy, SQUID[anim]);
        raster.paint(&map, color, true);
    }

    for shield in snap.shields {
        let flashing = app
            .effects
            .iter()
            .any(|e| e.kind == EffectKind::ShieldFlash(shield.rect));
        let color = if flashing {
            Color::White
        } else {
            shield_color(shield.health_fraction())
        };
        let mut map = Dots::new();
        raster.fill(&mut map, &shield.rect, false);
        raster.paint(&map, color, false);
    }

    let mut map = Dots::new();
    for bullet in snap.player_bullets {
        let (x, _) = bullet.rect.center();
        let (bx, y0) = raster.to_dots(x, bullet.rect.y);
        let (_, y1) = raster.to_dots(x, bullet.rect.bottom());
        for by in y0..=y1.max(y0 + 1) {
            raster.set_dot(&mut map, bx, by);
        }
    }
    raster.paint(&map, Color::Rgb(255, 255, 200), true);

    let mut map = Dots::new();
    let zigzag: &[(i32, i32)] = if (app.frame / 4) % 2 == 0 {
        &[(0, 0), (1, 1), (0, 2), (-1, 3), (0, 4)]
    } else {
        &[(0, 0), (-1, 1), (0, 2), (1, 3), (0, 4)]
    };
    for bullet in snap.enemy_bullets {
        let (x, _) = bullet.rect.center();
        let (bx, by) = raster.to_dots(x, bullet.rect.y);
        raster.sprite(&mut map, bx, by, zigzag);
    }
    raster.paint(&map, Color::Rgb(255, 100, 100), true);

    if snap.lives > 0 && app.effects.player_visible(app.frame) {
        let mut map = Dots::new();
        let (x, y) = snap.player.center();
        let (cx, cy) = raster.to_dots(x, y);
        raster.sprite(&mut map, cx, cy, CANNON);
        raster.paint(&map, Color::Rgb(80, 255, 80), true);
    }

    for effect in app.effects.iter() {
        if let EffectKind::Explosion { x, y, .. } = effect.kind {
            let mut map = Dots::new();
            raster.ring(&mut map, x, y, effect.radius());
            raster.ring(&mut map, x, y, effect.radius() * 0.5);
            let color = if effect.progress() < 0.5 {
                Color::Rgb(255, 230, 80)
            } else {
                Color::Rgb(255, 80, 40)
            };
            raster.paint(&map, color, true);
        }
    }

    let ground = rows.saturating_sub(1);
    for cell in raster.grid[ground].iter_mut() {
        *cell = ('\u{2500}', Style::default().fg(Color::Rgb(40, 80, 40)).bg(BG));
    }

    raster
}

pub fn render_field(frame: &mut Frame, snap: &Snapshot<'_>, app: &App, area: Rect) {
    let cols = area.width as usize;
    let rows = area.height as usize;
    if cols == 0 || rows == 0 {
        return;
    }
    let lines = build_field(snap, app, cols, rows).into_lines();
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shield_colour_tracks_health() {
        assert_eq!(shield_color(1.0), Color::Rgb(60, 140, 255));
        assert_eq!(shield_color(0.6), Color::Rgb(255, 160, 40));
        assert_eq!(shield_color(0.4), Color::Rgb(255, 160, 40));
        assert_eq!(shield_color(0.3), Color::Rgb(230, 50, 50));
    }

    #[test]
    fn dots_pack_into_braille_cells() {
        let raster = Raster::new(10, 5, 20.0, 20.0);
        let mut map = Dots::new();
        raster.set_dot(&mut map, 0, 0);
        raster.set_dot(&mut map, 1, 3);
        raster.set_dot(&mut map, -1, 0);
        raster.set_dot(&mut map, 20, 0);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&(0, 0)], 0x01 | 0x80);
    }

    #[test]
    fn world_coordinates_scale_onto_dots() {
        let raster = Raster::new(40, 15, 800.0, 600.0);
        assert_eq!(raster.to_dots(400.0, 300.0), (40, 30));
        assert_eq!(raster.to_dots(0.0, 0.0), (0, 0));
    }
}
