//! Observer hooks for progress reporting and data collection.

use vf_core::Tick;
use vf_insight::Insight;

use crate::MetricsSnapshot;

/// Callbacks invoked by [`HospitalModel`][crate::HospitalModel] at key
/// points of a step.  All methods default to no-ops.
///
/// # Example — insight printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_insights(&mut self, tick: Tick, found: &[Insight]) {
///         for i in found {
///             println!("{tick}: [{}] {}", i.severity, i.title);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before any processing for `tick`.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// After `tick` completes.  `metrics` is the snapshot taken at its start.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &MetricsSnapshot) {}

    /// A periodic detection pass surfaced `found` (never called when empty).
    fn on_insights(&mut self, _tick: Tick, _found: &[Insight]) {}

    /// Once, when the run completes or is stopped.
    fn on_run_end(&mut self, _final_tick: Tick, _metrics: &MetricsSnapshot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
