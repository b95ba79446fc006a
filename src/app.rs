use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::ThreadRng;
use tracing::debug;

use rustvaders::{GameEvent, Mode, Phase, World};

use crate::effects::Effects;

/// On terminals without release events, a movement key counts as held if its
/// last press or repeat arrived within this window.
const HOLD_WINDOW: Duration = Duration::from_millis(120);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Campaign,
    Infinite,
}

impl MenuItem {
    pub fn title(&self) -> &str {
        match self {
            MenuItem::Campaign => "Campaign",
            MenuItem::Infinite => "Infinite",
        }
    }

    fn other(self) -> Self {
        match self {
            MenuItem::Campaign => MenuItem::Infinite,
            MenuItem::Infinite => MenuItem::Campaign,
        }
    }
}

/// Boss health bar as last reported by the world.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BossBar {
    pub visible: bool,
    pub fraction: f32,
}

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub selected: MenuItem,
    pub effects: Effects,
    pub boss_bar: BossBar,
    pub frame: u64,
    tick_interval: Duration,
    hold_frames: u64,
    /// The terminal reports key releases, so held keys never time out.
    key_releases: bool,
    key_frame: HashMap<KeyCode, u64>,
    rng: ThreadRng,
}

impl App {
    pub fn new(world: World, tick_interval: Duration, key_releases: bool) -> Self {
        let tick_ms = tick_interval.as_millis().max(1);
        let hold_frames = (HOLD_WINDOW.as_millis() / tick_ms).max(1) as u64;
        let selected = match world.last_mode() {
            Mode::Campaign => MenuItem::Campaign,
            Mode::Infinite => MenuItem::Infinite,
        };
        let mut app = Self {
            world,
            should_quit: false,
            selected,
            effects: Effects::default(),
            boss_bar: BossBar::default(),
            frame: 0,
            tick_interval,
            hold_frames,
            key_releases,
            key_frame: HashMap::new(),
            rng: rand::thread_rng(),
        };
        app.drain_world_events();
        app
    }

    pub fn phase(&self) -> Phase {
        self.world.state().phase()
    }

    pub fn on_tick(&mut self) {
        self.frame += 1;
        self.apply_held_keys();
        self.world.elapse(self.tick_interval);
        self.world.tick();
        self.drain_world_events();

        let t = self.world.tunables();
        let (width, height) = (t.canvas_width, t.canvas_height);
        self.effects
            .advance(self.tick_interval, &mut self.rng, width, height);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.kind {
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
                return;
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, self.frame);
                let fire = matches!(key.code, KeyCode::Char(' ') | KeyCode::Up);
                if fire && self.phase() == Phase::Playing {
                    self.on_game_key(key.code);
                }
                return;
            }
            KeyEventKind::Press => {
                self.key_frame.insert(key.code, self.frame);
            }
        }

        match self.phase() {
            Phase::MainMenu => self.on_menu_key(key.code),
            Phase::Playing => self.on_game_key(key.code),
            Phase::GameOver | Phase::GameWon => self.on_ending_key(key.code),
        }
    }

    fn on_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = self.selected.other();
            }
            KeyCode::Char('1') => self.start(MenuItem::Campaign),
            KeyCode::Char('2') => self.start(MenuItem::Infinite),
            KeyCode::Enter | KeyCode::Char(' ') => self.start(self.selected),
            _ => {}
        }
    }

    fn on_game_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => self.world.toggle_pause(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.back_to_menu(),
            KeyCode::Char(' ') | KeyCode::Up if !self.world.state().is_paused() => {
                self.world.set_shooting(true);
            }
            _ => {}
        }
    }

    fn on_ending_key(&mut self, code: KeyCode) {
        if self.effects.banner().is_none() {
            return;
        }
        match code {
            KeyCode::Enter | KeyCode::Esc => self.back_to_menu(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn start(&mut self, item: MenuItem) {
        self.selected = item;
        self.effects.clear();
        match item {
            MenuItem::Campaign => self.world.start_campaign(),
            MenuItem::Infinite => self.world.start_infinite_mode(),
        }
        self.drain_world_events();
    }

    fn restart(&mut self) {
        self.effects.clear();
        self.world.restart();
        self.drain_world_events();
    }

    fn back_to_menu(&mut self) {
        self.effects.clear();
        self.world.reset_game();
        self.drain_world_events();
    }

    fn is_held(&self, code: KeyCode) -> bool {
        self.key_frame.get(&code).is_some_and(|&last| {
            self.key_releases || self.frame.saturating_sub(last) <= self.hold_frames
        })
    }

    fn apply_held_keys(&mut self) {
        let left = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]
            .into_iter()
            .any(|k| self.is_held(k));
        let right = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]
            .into_iter()
            .any(|k| self.is_held(k));
        self.world.set_move_left(left);
        self.world.set_move_right(right);
    }

    fn drain_world_events(&mut self) {
        for event in self.world.drain_events() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::BossBarShown => self.boss_bar.visible = true,
            GameEvent::BossBarHidden => self.boss_bar = BossBar::default(),
            GameEvent::BossHealthChanged(fraction) => self.boss_bar.fraction = fraction,
            GameEvent::Paused(paused) => debug!(paused, "pause toggled"),
            _ => {}
        }
        self.effects.apply(&event);
    }
}
