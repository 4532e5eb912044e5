//! Frame and tick timing.
//!
//! The loop runs in two phases: a fixed-timestep simulation that advances in
//! whole ticks, and a variable-timestep render that happens once per frame.
//! [`FrameClock`] owns the accumulator that converts elapsed wall time into
//! ticks and keeps the frame/tick counters of the window.

use instant::{Duration, Instant};

/// Upper bound of ticks drained in a single frame. Time beyond that is
/// discarded so a long stall does not trigger a burst of catch-up ticks.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// What happened during one call to [`FrameClock::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
    /// Wall time since the previous frame.
    pub dt: Duration,
    /// Number of fixed ticks to simulate before rendering this frame.
    pub ticks: u32,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_duration: Duration,
    last_frame: Instant,
    last_second: Instant,
    frame_delta: Duration,
    remainder: Duration,
    frames: u64,
    fps: u64,
    frames_this_second: u64,
    ticks: u64,
    tps: u64,
    ticks_this_second: u64,
}

impl FrameClock {
    pub fn new(tick_duration: Duration, now: Instant) -> Self {
        Self {
            // a zero tick would never drain the accumulator
            tick_duration: tick_duration.max(Duration::from_millis(1)),
            last_frame: now,
            last_second: now,
            frame_delta: Duration::ZERO,
            remainder: Duration::ZERO,
            frames: 0,
            fps: 0,
            frames_this_second: 0,
            ticks: 0,
            tps: 0,
            ticks_this_second: 0,
        }
    }

    /// Start a new frame at `now`.
    ///
    /// The frame counter grows by exactly one per call. A `now` earlier than
    /// the previous frame is treated as zero elapsed time.
    pub fn advance(&mut self, now: Instant) -> FrameStep {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_delta = dt;
        self.remainder += dt;

        let mut ticks = 0;
        while self.remainder >= self.tick_duration && ticks < MAX_TICKS_PER_FRAME {
            self.remainder -= self.tick_duration;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME && self.remainder >= self.tick_duration {
            log::warn!(
                "Frame took {:?}, dropping {:?} of simulation time",
                dt,
                self.remainder
            );
            self.remainder = Duration::ZERO;
        }

        self.frames += 1;
        self.frames_this_second += 1;
        self.ticks += ticks as u64;
        self.ticks_this_second += ticks as u64;

        if now.saturating_duration_since(self.last_second) >= ONE_SECOND {
            self.fps = self.frames_this_second;
            self.tps = self.ticks_this_second;
            self.frames_this_second = 0;
            self.ticks_this_second = 0;
            self.last_second = now;
            log::debug!("{} fps, {} tps", self.fps, self.tps);
        }

        FrameStep { dt, ticks }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames counted during the last completed second.
    pub fn fps(&self) -> u64 {
        self.fps
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks counted during the last completed second.
    pub fn tps(&self) -> u64 {
        self.tps
    }

    pub fn frame_delta(&self) -> Duration {
        self.frame_delta
    }

    /// Simulation time carried over to the next frame.
    pub fn remainder(&self) -> Duration {
        self.remainder
    }

    /// Progress towards the next tick in `[0, 1)`, for interpolation.
    pub fn alpha(&self) -> f32 {
        self.remainder.as_secs_f32() / self.tick_duration.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn frame_counter_strictly_increases() {
        let start = Instant::now();
        let mut clock = FrameClock::new(ms(50), start);
        let mut previous = clock.frames();
        for i in 1..=10 {
            clock.advance(start + ms(i * 3));
            assert_eq!(clock.frames(), previous + 1);
            previous = clock.frames();
        }
    }

    #[test]
    fn accumulates_partial_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::new(ms(50), start);

        let step = clock.advance(start + ms(30));
        assert_eq!(step.ticks, 0);
        assert_eq!(clock.remainder(), ms(30));

        let step = clock.advance(start + ms(60));
        assert_eq!(step.dt, ms(30));
        assert_eq!(step.ticks, 1);
        assert_eq!(clock.remainder(), ms(10));
        assert!((clock.alpha() - 0.2).abs() < 1e-4);

        let step = clock.advance(start + ms(160));
        assert_eq!(step.ticks, 2);
        assert_eq!(clock.ticks(), 3);
        assert_eq!(clock.remainder(), ms(10));
    }

    #[test]
    fn long_stall_is_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::new(ms(10), start);
        let step = clock.advance(start + Duration::from_secs(5));
        assert_eq!(step.ticks, MAX_TICKS_PER_FRAME);
        assert_eq!(clock.remainder(), Duration::ZERO);
    }

    #[test]
    fn rolls_rates_every_second() {
        let start = Instant::now();
        let mut clock = FrameClock::new(ms(100), start);
        for i in 1..=20 {
            clock.advance(start + ms(i * 50));
        }
        // the second rolled over on the 20th frame, exactly at 1000ms
        assert_eq!(clock.fps(), 20);
        assert_eq!(clock.tps(), 10);
        assert_eq!(clock.frames(), 20);
    }

    #[test]
    fn clock_going_backwards_is_zero_dt() {
        let start = Instant::now();
        let mut clock = FrameClock::new(ms(10), start + ms(100));
        let step = clock.advance(start);
        assert_eq!(step.dt, Duration::ZERO);
        assert_eq!(step.ticks, 0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn zero_tick_duration_is_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::new(Duration::ZERO, start);
        assert_eq!(clock.tick_duration(), ms(1));
        let step = clock.advance(start + ms(3));
        assert_eq!(step.ticks, 3);
    }
}
