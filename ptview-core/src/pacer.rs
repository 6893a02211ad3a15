/// Fixed-cadence frame pacing and the animation state it drives
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Millisecond-or-better tick counter plus a blocking sleep
pub trait Clock {
    /// Time elapsed since the clock's epoch
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Cadence and per-tick animation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacerConfig {
    pub ticks_per_second: u32,
    /// Radians added to the rotation angle every tick
    pub angle_step: f32,
}

impl PacerConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 30,
            angle_step: 0.01,
        }
    }
}

/// Rotation angle and active mesh, advanced once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// Radians; grows without bound and is never normalized
    pub angle: f32,
    /// Index of the mesh being drawn
    pub active: usize,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the angle and move to the next mesh, wrapping to the first
    pub fn advance(&mut self, angle_step: f32, mesh_count: NonZeroUsize) {
        self.angle += angle_step;
        self.active = (self.active + 1) % mesh_count.get();
    }
}

/// Outcome of one pacer tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// How long the tick slept before advancing
    pub sleep: Duration,
    /// Clock reading recorded as the reference for the next tick
    pub time: Duration,
    pub angle: f32,
    pub active: usize,
}

/// Holds the loop to a fixed tick rate.
///
/// A tick that arrives early sleeps off the rest of the period; a late one
/// runs immediately. Lost time is never caught up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    config: PacerConfig,
    period: Duration,
    last_tick: Duration,
}

impl FramePacer {
    /// Start pacing with `start` as the first reference timestamp
    pub fn new(config: PacerConfig, start: Duration) -> Self {
        Self {
            period: config.period(),
            config,
            last_tick: start,
        }
    }

    pub fn config(&self) -> &PacerConfig {
        &self.config
    }

    pub fn last_tick(&self) -> Duration {
        self.last_tick
    }

    /// Sleep still owed at `now`, zero once the period has elapsed
    pub fn remaining(&self, now: Duration) -> Duration {
        let elapsed = now.saturating_sub(self.last_tick);
        self.period.saturating_sub(elapsed)
    }

    /// Wait out the period, advance `state`, and re-arm from the clock
    pub fn tick<C: Clock>(
        &mut self,
        clock: &mut C,
        state: &mut AnimationState,
        mesh_count: NonZeroUsize,
    ) -> Tick {
        let now = clock.now();
        let sleep = self.remaining(now);
        if sleep.is_zero() {
            log::trace!(
                "frame overran by {:?}",
                now.saturating_sub(self.last_tick) - self.period
            );
        }
        clock.sleep(sleep);

        state.advance(self.config.angle_step, mesh_count);
        self.last_tick = clock.now();

        Tick {
            sleep,
            time: self.last_tick,
            angle: state.angle,
            active: state.active,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Clock that only moves when told to or when slept on
    #[derive(Debug, Default)]
    pub(crate) struct ManualClock {
        pub now: Duration,
        pub sleeps: Vec<Duration>,
    }

    impl ManualClock {
        pub fn advance(&mut self, by: Duration) {
            self.now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
            self.now += duration;
        }
    }

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_default_period_is_thirty_hz() {
        let period = PacerConfig::default().period();
        assert_eq!(period, Duration::from_nanos(33_333_333));
    }

    #[test]
    fn test_two_meshes_alternate() {
        let mut clock = ManualClock::default();
        let mut pacer = FramePacer::new(PacerConfig::default(), clock.now());
        let mut state = AnimationState::new();

        let active: Vec<usize> = (0..5)
            .map(|_| pacer.tick(&mut clock, &mut state, count(2)).active)
            .collect();
        assert_eq!(active, vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_n_ticks_return_to_start() {
        for n in 1..=7 {
            let mut clock = ManualClock::default();
            let mut pacer = FramePacer::new(PacerConfig::default(), clock.now());
            let mut state = AnimationState::new();
            let mut seen = Vec::new();
            for _ in 0..n {
                seen.push(pacer.tick(&mut clock, &mut state, count(n)).active);
            }
            assert_eq!(state.active, 0);
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_early_tick_sleeps_remainder() {
        let mut clock = ManualClock::default();
        let mut pacer = FramePacer::new(PacerConfig::default(), clock.now());
        let mut state = AnimationState::new();

        clock.advance(Duration::from_millis(10));
        let tick = pacer.tick(&mut clock, &mut state, count(1));
        assert_eq!(tick.sleep, Duration::from_nanos(23_333_333));
        assert_eq!(tick.time, Duration::from_nanos(33_333_333));
        assert_eq!(pacer.last_tick(), tick.time);
    }

    #[test]
    fn test_late_tick_does_not_sleep_or_catch_up() {
        let mut clock = ManualClock::default();
        let mut pacer = FramePacer::new(PacerConfig::default(), clock.now());
        let mut state = AnimationState::new();

        clock.advance(Duration::from_millis(100));
        let tick = pacer.tick(&mut clock, &mut state, count(3));
        assert_eq!(tick.sleep, Duration::ZERO);
        assert_eq!(tick.time, Duration::from_millis(100));
        // One step only, however late the tick was
        assert_eq!(tick.active, 1);
        assert!((tick.angle - 0.01).abs() < 1e-7);

        // The next tick is paced from the late timestamp
        let tick = pacer.tick(&mut clock, &mut state, count(3));
        assert_eq!(tick.sleep, Duration::from_nanos(33_333_333));
    }

    #[test]
    fn test_angle_accumulates_without_wrapping() {
        let mut clock = ManualClock::default();
        let mut pacer = FramePacer::new(PacerConfig::default(), clock.now());
        let mut state = AnimationState::new();
        for _ in 0..1000 {
            pacer.tick(&mut clock, &mut state, count(1));
        }
        assert!((state.angle - 10.0).abs() < 1e-2);
        assert_eq!(clock.sleeps.len(), 1000);
    }

    #[test]
    fn test_remaining_saturates() {
        let pacer = FramePacer::new(PacerConfig::default(), Duration::from_secs(5));
        // A clock reading before the reference never yields more than a period
        assert_eq!(pacer.remaining(Duration::from_secs(1)), pacer.config().period());
        assert_eq!(pacer.remaining(Duration::from_secs(6)), Duration::ZERO);
    }
}
