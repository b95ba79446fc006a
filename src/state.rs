use std::time::Duration;

use tracing::info;

use crate::clock::{ElapsedTimer, GameClock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    MainMenu,
    Playing,
    GameOver,
    GameWon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Campaign,
    Infinite,
}

/// Things collaborators must react to, queued so that the state change has
/// fully landed before anyone hears about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateNotice {
    GameOver,
    GameWon,
    ResetLives,
}

/// Score, level and the menu/playing/ended state machine of a run.
#[derive(Clone, Debug)]
pub struct GameState {
    score: u32,
    level: u32,
    phase: Phase,
    mode: Mode,
    paused: bool,
    clock: GameClock,
    infinite_timer: ElapsedTimer,
    notices: Vec<StateNotice>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            phase: Phase::MainMenu,
            mode: Mode::Campaign,
            paused: false,
            clock: GameClock::default(),
            infinite_timer: ElapsedTimer::default(),
            notices: Vec::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_game_won(&self) -> bool {
        self.phase == Phase::GameWon
    }

    pub fn is_infinite_mode(&self) -> bool {
        self.mode == Mode::Infinite
    }

    /// True while a run is in progress, paused or not.
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn infinite_elapsed(&self) -> Duration {
        self.infinite_timer.elapsed()
    }

    pub fn increase_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn next_level(&mut self) {
        self.level += 1;
    }

    /// Jumps straight to `level`; used when a run starts.
    pub fn enter_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn start_game(&mut self) {
        self.phase = Phase::Playing;
        self.paused = false;
        self.clock.start();
        info!(mode = ?self.mode, level = self.level, "run started");
    }

    pub fn start_infinite_mode(&mut self) {
        self.mode = Mode::Infinite;
        self.infinite_timer.restart();
    }

    /// Stops the tick driver and both timers. No-op once the run has ended.
    pub fn trigger_game_over(&mut self) -> bool {
        if self.has_ended() {
            return false;
        }
        self.phase = Phase::GameOver;
        self.halt();
        info!(score = self.score, level = self.level, "game over");
        self.notices.push(StateNotice::GameOver);
        true
    }

    pub fn trigger_win_game(&mut self) -> bool {
        if self.has_ended() {
            return false;
        }
        self.phase = Phase::GameWon;
        self.halt();
        info!(score = self.score, "game won");
        self.notices.push(StateNotice::GameWon);
        true
    }

    /// Back to the initial score, level and flags, with everything stopped.
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.level = 1;
        self.phase = Phase::MainMenu;
        self.mode = Mode::Campaign;
        self.paused = false;
        self.clock.reset();
        self.infinite_timer.clear();
        self.notices.push(StateNotice::ResetLives);
    }

    /// Pausing stops only the tick driver; the infinite timer keeps counting.
    /// Returns the new pause flag. Ignored outside a running game.
    pub fn toggle_pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return self.paused;
        }
        self.paused = !self.paused;
        if self.paused {
            self.clock.stop();
        } else {
            self.clock.start();
        }
        self.paused
    }

    /// Advances the fixed-step clock. False means the tick must be skipped.
    pub fn begin_tick(&mut self) -> bool {
        self.clock.advance()
    }

    pub fn advance_infinite_timer(&mut self, dt: Duration) {
        self.infinite_timer.advance(dt);
    }

    /// Whether an infinite-mode boss should currently be on the field: the
    /// first `open` seconds of every `period`-second window.
    pub fn should_spawn_infinite_boss(&self, period: Duration, open: Duration) -> bool {
        if !self.is_infinite_mode() || period.is_zero() {
            return false;
        }
        let secs = self.infinite_timer.elapsed().as_secs();
        secs % period.as_secs().max(1) < open.as_secs()
    }

    pub fn drain_notices(&mut self) -> Vec<StateNotice> {
        std::mem::take(&mut self.notices)
    }

    fn has_ended(&self) -> bool {
        matches!(self.phase, Phase::GameOver | Phase::GameWon)
    }

    fn halt(&mut self) {
        self.paused = false;
        self.clock.stop();
        self.infinite_timer.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(180);
    const OPEN: Duration = Duration::from_secs(30);

    fn playing() -> GameState {
        let mut state = GameState::new();
        state.start_game();
        state
    }

    #[test]
    fn starts_in_menu_with_clock_stopped() {
        let mut state = GameState::new();
        assert_eq!(state.phase(), Phase::MainMenu);
        assert_eq!(state.level(), 1);
        assert!(!state.begin_tick());
    }

    #[test]
    fn game_over_is_idempotent() {
        let mut state = playing();
        assert!(state.trigger_game_over());
        assert!(!state.trigger_game_over());
        assert_eq!(state.drain_notices(), vec![StateNotice::GameOver]);
        assert!(state.is_game_over());
        assert!(!state.begin_tick());
    }

    #[test]
    fn win_after_game_over_is_ignored() {
        let mut state = playing();
        state.trigger_game_over();
        assert!(!state.trigger_win_game());
        assert!(!state.is_game_won());
        assert_eq!(state.drain_notices(), vec![StateNotice::GameOver]);
    }

    #[test]
    fn pause_stops_ticks_but_not_infinite_timer() {
        let mut state = playing();
        state.start_infinite_mode();
        assert!(state.toggle_pause());
        assert!(!state.begin_tick());
        state.advance_infinite_timer(Duration::from_secs(2));
        assert_eq!(state.infinite_elapsed(), Duration::from_secs(2));
        assert!(!state.toggle_pause());
        assert!(state.begin_tick());
    }

    #[test]
    fn pause_is_ignored_in_menu() {
        let mut state = GameState::new();
        assert!(!state.toggle_pause());
        assert!(!state.is_paused());
    }

    #[test]
    fn game_over_stops_infinite_timer() {
        let mut state = playing();
        state.start_infinite_mode();
        state.advance_infinite_timer(Duration::from_secs(5));
        state.trigger_game_over();
        state.advance_infinite_timer(Duration::from_secs(5));
        assert_eq!(state.infinite_elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn reset_restores_initial_values_and_asks_for_lives() {
        let mut state = playing();
        state.start_infinite_mode();
        state.increase_score(120);
        state.next_level();
        state.trigger_win_game();
        state.drain_notices();

        state.reset_game();
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.phase(), Phase::MainMenu);
        assert!(!state.is_infinite_mode());
        assert_eq!(state.infinite_elapsed(), Duration::ZERO);
        assert_eq!(state.drain_notices(), vec![StateNotice::ResetLives]);
    }

    #[test]
    fn boss_window_is_first_half_minute_of_every_three() {
        let mut state = playing();
        assert!(!state.should_spawn_infinite_boss(PERIOD, OPEN));

        state.start_infinite_mode();
        assert!(state.should_spawn_infinite_boss(PERIOD, OPEN));
        state.advance_infinite_timer(Duration::from_secs(29));
        assert!(state.should_spawn_infinite_boss(PERIOD, OPEN));
        state.advance_infinite_timer(Duration::from_secs(1));
        assert!(!state.should_spawn_infinite_boss(PERIOD, OPEN));
        state.advance_infinite_timer(Duration::from_secs(149));
        assert!(!state.should_spawn_infinite_boss(PERIOD, OPEN));
        state.advance_infinite_timer(Duration::from_secs(1));
        assert!(state.should_spawn_infinite_boss(PERIOD, OPEN));
    }

    #[test]
    fn score_saturates() {
        let mut state = GameState::new();
        state.increase_score(u32::MAX);
        state.increase_score(10);
        assert_eq!(state.score(), u32::MAX);
    }
}
