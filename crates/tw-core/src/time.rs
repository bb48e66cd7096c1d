//! Simulation time model.
//!
//! # Design
//!
//! Two clocks run side by side:
//!
//! - `Tick` counts simulation steps.  Every per-tick counter in the core
//!   (car dwell, occupant patience, spawn spacing) is expressed in ticks, so
//!   those behaviours are exact regardless of game speed.
//! - Time of day is an abstract scaled clock in minutes, `[0, 1440)`:
//!
//!     minutes += delta * speed * minutes_per_delta
//!
//!   It wraps at midnight, incrementing the day counter once per wrap.  It is
//!   not tied to real elapsed time.

use std::fmt;

/// Length of one simulated day in minutes.
pub const MINUTES_PER_DAY: f64 = 1440.0;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (saturating).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Speed ─────────────────────────────────────────────────────────────────────

/// Discrete game-speed settings.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    #[default]
    Normal,
    Fast,
    Faster,
    Fastest,
}

impl Speed {
    pub const ALL: [Speed; 4] = [Speed::Normal, Speed::Fast, Speed::Faster, Speed::Fastest];

    pub fn multiplier(self) -> f64 {
        match self {
            Speed::Normal  => 1.0,
            Speed::Fast    => 2.0,
            Speed::Faster  => 3.0,
            Speed::Fastest => 4.0,
        }
    }

    /// Next setting, wrapping from `Fastest` back to `Normal`.
    pub fn cycle(self) -> Speed {
        match self {
            Speed::Normal  => Speed::Fast,
            Speed::Fast    => Speed::Faster,
            Speed::Faster  => Speed::Fastest,
            Speed::Fastest => Speed::Normal,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.multiplier() as u32)
    }
}

// ── ClockConfig ───────────────────────────────────────────────────────────────

/// Clock parameters, supplied once at initialization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// Time of day at tick 0, in minutes.  Default: 480 (08:00).
    pub start_minute: f64,

    /// Simulated minutes per unit of `delta` at `Speed::Normal`.
    /// Default: `0.5 / 16`, i.e. half a minute per 16 ms frame.
    pub minutes_per_delta: f64,

    /// The `delta` at which one tick moves walkers and cars by exactly their
    /// nominal per-tick speed.  Default: 16 (one 60 fps frame in ms).
    pub nominal_delta: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_minute:      8.0 * 60.0,
            minutes_per_delta: 0.5 / 16.0,
            nominal_delta:     16.0,
        }
    }
}

// ── ClockStep ─────────────────────────────────────────────────────────────────

/// What one call to [`GameClock::advance`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ClockStep {
    /// Simulated minutes added this step.
    pub minutes: f64,
    /// Number of midnight wraps crossed this step (almost always 0 or 1).
    pub rollovers: u32,
}

impl ClockStep {
    #[inline]
    pub fn day_rolled_over(&self) -> bool {
        self.rollovers > 0
    }
}

// ── GameClock ─────────────────────────────────────────────────────────────────

/// Time of day, day counter, tick counter, pause and speed state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    config: ClockConfig,
    minute: f64,
    day:    u32,
    tick:   Tick,
    speed:  Speed,
    paused: bool,
}

impl GameClock {
    pub fn new(config: ClockConfig) -> Self {
        let minute = config.start_minute.rem_euclid(MINUTES_PER_DAY);
        Self {
            config,
            minute,
            day: 1,
            tick: Tick::ZERO,
            speed: Speed::Normal,
            paused: false,
        }
    }

    /// Advance by `delta` scaled by the current speed.
    ///
    /// A paused clock does not move at all: neither the tick counter nor the
    /// time of day changes.  Negative and non-finite deltas are treated as
    /// zero.  The day counter saturates instead of overflowing.
    pub fn advance(&mut self, delta: f64) -> ClockStep {
        if self.paused {
            return ClockStep::default();
        }
        self.tick = self.tick + 1;

        let minutes = sanitize(delta) * self.speed.multiplier() * self.config.minutes_per_delta;
        let minutes = if minutes.is_finite() { minutes } else { 0.0 };
        let total = self.minute + minutes;

        // Float-to-int `as` saturates, so absurd deltas cap at u32::MAX.
        let rollovers = (total / MINUTES_PER_DAY).floor() as u32;
        self.minute = total.rem_euclid(MINUTES_PER_DAY);
        self.day = self.day.saturating_add(rollovers);
        ClockStep { minutes, rollovers }
    }

    /// Per-tick movement factor for walkers and cars: `1.0` at the nominal
    /// delta and normal speed.
    #[inline]
    pub fn motion_scale(&self, delta: f64) -> f64 {
        if self.config.nominal_delta <= 0.0 {
            return self.speed.multiplier();
        }
        sanitize(delta) / self.config.nominal_delta * self.speed.multiplier()
    }

    // ── Pause / speed ─────────────────────────────────────────────────────

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip the pause state; returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Step to the next speed setting; returns it.
    pub fn cycle_speed(&mut self) -> Speed {
        self.speed = self.speed.cycle();
        self.speed
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    // ── Readouts ──────────────────────────────────────────────────────────

    /// Minutes since midnight, in `[0, 1440)`.
    pub fn minute(&self) -> f64 {
        self.minute
    }

    pub fn hour(&self) -> u32 {
        (self.minute / 60.0) as u32
    }

    /// Current day, starting at 1.
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn is_night(&self) -> bool {
        let h = self.minute / 60.0;
        !(6.0..=20.0).contains(&h)
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.minute as u32;
        write!(f, "day {} {:02}:{:02}", self.day, total / 60, total % 60)
    }
}

fn sanitize(delta: f64) -> f64 {
    if delta.is_finite() { delta.max(0.0) } else { 0.0 }
}
