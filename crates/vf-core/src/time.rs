//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  By convention one tick
//! is one simulated minute, so 60 ticks make an hour.  The clock only needs
//! the hour of day (shift gates and arrival rates), so there is no wall-clock
//! anchor:
//!
//!   hour_of_day = (tick / ticks_per_hour) mod 24
//!
//! Integer ticks keep all schedule arithmetic exact.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
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

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` on every `interval`-th tick, excluding tick 0.
    #[inline]
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval > 0 && self.0 > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Master simulation clock.
///
/// Owned by the model and advanced exactly once per `step()`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Ticks per simulated hour.  Default: 60.
    pub ticks_per_hour: u32,
    /// The current tick.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(ticks_per_hour: u32) -> Self {
        Self {
            ticks_per_hour: ticks_per_hour.max(1),
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Hour of day, 0–23, for the current tick.
    #[inline]
    pub fn hour_of_day(&self) -> u32 {
        self.hour_at(self.current_tick)
    }

    /// Hour of day for an arbitrary tick under this clock's resolution.
    #[inline]
    pub fn hour_at(&self, tick: Tick) -> u32 {
        ((tick.0 / self.ticks_per_hour as u64) % 24) as u32
    }

    /// Break elapsed time into (day, hour, minute) since tick 0.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let tph = self.ticks_per_hour as u64;
        let total_hours = self.current_tick.0 / tph;
        let minutes = ((self.current_tick.0 % tph) * 60 / tph) as u32;
        (total_hours / 24, (total_hours % 24) as u32, minutes)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(60)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Step budget.  The model marks itself completed once the clock reaches
    /// this tick.  Default: 5000.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Ticks per simulated hour.  Default: 60.
    pub ticks_per_hour: u32,

    /// Run insight detection every N ticks.  Default: 50.
    pub insight_interval_ticks: u64,

    /// Emit a progress log line every N ticks.  0 disables it.
    pub log_interval_ticks: u64,
}

impl SimConfig {
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_hour)
    }

    /// Reject values the tick loop cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ticks_per_hour == 0 {
            return Err(CoreError::Config("ticks_per_hour must be positive".into()));
        }
        if self.insight_interval_ticks == 0 {
            return Err(CoreError::Config(
                "insight_interval_ticks must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks: 5_000,
            seed: 0,
            ticks_per_hour: 60,
            insight_interval_ticks: 50,
            log_interval_ticks: 100,
        }
    }
}
