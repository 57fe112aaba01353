//! `EventQueue` — tick-ordered store of deferred events.
//!
//! `BTreeMap` gives O(log W) insert and ordered draining, where W is the
//! number of distinct due ticks.  Providers schedule at most one break
//! return and one treatment completion at a time, so W stays small.
//!
//! Events due at the same tick keep insertion order.

use std::collections::BTreeMap;

use vf_core::{ProviderId, Tick};

use crate::{DeferredEvent, EventKind};

#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<Tick, Vec<DeferredEvent>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: DeferredEvent) {
        self.inner.entry(event.due).or_default().push(event);
        self.total += 1;
    }

    /// Schedule `kind` for `provider`, `delay` ticks after `now`.
    pub fn schedule(&mut self, now: Tick, delay: u64, provider: ProviderId, kind: EventKind) -> Tick {
        let due = now.offset(delay);
        self.push(DeferredEvent::new(due, provider, kind));
        due
    }

    /// Remove and return every event with `due ≤ now`, earliest first.
    ///
    /// Returns an empty `Vec` (no allocation) on the common tick with
    /// nothing due.
    pub fn drain_due(&mut self, now: Tick) -> Vec<DeferredEvent> {
        let mut fired = Vec::new();
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            let batch = entry.remove();
            self.total -= batch.len();
            fired.extend(batch);
        }
        fired
    }

    /// The earliest tick with at least one queued event.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Pending events for `provider`, in due order.
    pub fn pending_for(&self, provider: ProviderId) -> impl Iterator<Item = &DeferredEvent> + '_ {
        self.inner
            .values()
            .flat_map(|v| v.iter())
            .filter(move |e| e.provider == provider)
    }
}
