//! Per-tick capacity pools.
//!
//! A pool counts how many units of a resource (VR stations, telehealth
//! rooms, reception desk slots) are still free *this tick*.  Acquisition is
//! not a reservation across ticks: the orchestrator refills every pool to
//! capacity exactly once per tick via [`ResourcePool::replenish`].
//!
//! An empty pool is a normal branch, not an error.  `try_acquire` returns
//! `false` and the caller falls through to its next option.

use vf_core::Tick;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    capacity:  u32,
    available: u32,
    /// Tick of the most recent replenish, if any.
    replenished_at: Option<Tick>,
    /// Units handed out since the pool was created.
    acquired_total: u64,
}

impl ResourcePool {
    /// A full pool of `capacity` units.
    pub fn new(capacity: u32) -> Self {
        Self { capacity, available: capacity, replenished_at: None, acquired_total: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn available(&self) -> u32 {
        self.available
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.available == 0
    }

    pub fn replenished_at(&self) -> Option<Tick> {
        self.replenished_at
    }

    pub fn acquired_total(&self) -> u64 {
        self.acquired_total
    }

    /// Take one unit if any is free.
    #[inline]
    pub fn try_acquire(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        self.available -= 1;
        self.acquired_total += 1;
        true
    }

    /// Return one unit.  Never exceeds capacity.
    #[inline]
    pub fn release(&mut self) {
        self.available = (self.available + 1).min(self.capacity);
    }

    /// Refill to capacity for `tick`.  A second call for the same tick is a
    /// no-op and returns `false`.
    pub fn replenish(&mut self, tick: Tick) -> bool {
        if self.replenished_at == Some(tick) {
            return false;
        }
        self.available = self.capacity;
        self.replenished_at = Some(tick);
        true
    }
}
