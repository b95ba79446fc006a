use std::time::Duration;

/// Fixed simulation step, ~50 Hz.
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Resolution of the infinite-mode elapsed timer.
pub const ELAPSED_STEP: Duration = Duration::from_secs(1);

/// Run flag of the fixed-interval tick driver. The host keeps its own timer;
/// the world only consults this to decide whether a `tick()` does anything.
#[derive(Clone, Debug, Default)]
pub struct GameClock {
    running: bool,
    ticks: u64,
}

impl GameClock {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Ticks executed since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Counts one step if the clock runs. Returns whether the step happens.
    pub fn advance(&mut self) -> bool {
        if self.running {
            self.ticks += 1;
        }
        self.running
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.ticks = 0;
    }
}

/// Elapsed-time counter that behaves like a 1 Hz periodic timer: real time
/// fed through `advance` is banked and released in whole `ELAPSED_STEP`s.
#[derive(Clone, Debug, Default)]
pub struct ElapsedTimer {
    running: bool,
    elapsed: Duration,
    banked: Duration,
}

impl ElapsedTimer {
    /// Zeroes the counter and starts it.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.banked = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn clear(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
        self.banked = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        self.banked = self.banked.saturating_add(dt);
        let step = ELAPSED_STEP.as_secs();
        let released = Duration::from_secs(self.banked.as_secs() / step * step);
        self.banked -= released;
        self.elapsed = self.elapsed.saturating_add(released);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_clock_does_not_count() {
        let mut clock = GameClock::default();
        assert!(!clock.advance());
        clock.start();
        assert!(clock.advance());
        assert!(clock.advance());
        clock.stop();
        assert!(!clock.advance());
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn elapsed_moves_in_whole_seconds() {
        let mut timer = ElapsedTimer::default();
        timer.restart();
        timer.advance(Duration::from_millis(600));
        assert_eq!(timer.elapsed(), Duration::ZERO);
        timer.advance(Duration::from_millis(600));
        assert_eq!(timer.elapsed(), Duration::from_secs(1));
        timer.advance(Duration::from_millis(2_900));
        assert_eq!(timer.elapsed(), Duration::from_secs(4));
    }

    #[test]
    fn huge_step_releases_whole_seconds_at_once() {
        let mut timer = ElapsedTimer::default();
        timer.restart();
        timer.advance(Duration::from_millis(400));
        timer.advance(Duration::from_secs(10_000_000_000) + Duration::from_millis(700));
        assert_eq!(timer.elapsed(), Duration::from_secs(10_000_000_001));
        timer.advance(Duration::from_millis(900));
        assert_eq!(timer.elapsed(), Duration::from_secs(10_000_000_002));
    }

    #[test]
    fn stopped_timer_ignores_time() {
        let mut timer = ElapsedTimer::default();
        timer.advance(Duration::from_secs(5));
        assert_eq!(timer.elapsed(), Duration::ZERO);
        timer.restart();
        timer.advance(Duration::from_secs(3));
        timer.stop();
        timer.advance(Duration::from_secs(3));
        assert_eq!(timer.elapsed(), Duration::from_secs(3));
    }
}
