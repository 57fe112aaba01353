//! Pool → dedup → confidence filter → rank → truncate.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::detectors::DETECTORS;
use crate::{Census, Insight, InsightKind, InsightThresholds};

/// Runs the detector battery and keeps a run-scoped history of what it
/// surfaced.
#[derive(Clone, Debug, Default)]
pub struct InsightEngine {
    thresholds: InsightThresholds,
    history:    Vec<Insight>,
}

impl InsightEngine {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds, history: Vec::new() }
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Every insight surfaced by [`run`](Self::run), oldest first.
    pub fn history(&self) -> &[Insight] {
        &self.history
    }

    /// All detector findings before filtering, in pooling order.
    pub fn pool(&self, census: &Census<'_>) -> Vec<Insight> {
        #[cfg(not(feature = "parallel"))]
        {
            DETECTORS.iter().flat_map(|d| d(census, &self.thresholds)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // `collect` keeps detector order.
            DETECTORS
                .par_iter()
                .flat_map_iter(|d| d(census, &self.thresholds))
                .collect()
        }
    }

    /// Surfaced insights for `census`.  Pure: the same census gives the
    /// same result, ids included.
    pub fn detect(&self, census: &Census<'_>) -> Vec<Insight> {
        let pooled = self.pool(census);
        let raw = pooled.len();
        let mut surfaced = filter_insights(pooled, &self.thresholds);
        for (seq, insight) in surfaced.iter_mut().enumerate() {
            insight.id = insight_id(insight.kind, census.tick.0, seq);
        }
        debug!(tick = census.tick.0, raw, surfaced = surfaced.len(), "insight pass");
        surfaced
    }

    /// [`detect`](Self::detect), then append the result to the history.
    pub fn run(&mut self, census: &Census<'_>) -> Vec<Insight> {
        let found = self.detect(census);
        for i in &found {
            info!(tick = census.tick.0, kind = %i.kind, severity = %i.severity, title = %i.title, "insight");
        }
        self.history.extend(found.iter().cloned());
        found
    }
}

pub fn insight_id(kind: InsightKind, tick: u64, seq: usize) -> String {
    format!("{}_{}_{}", kind.id_prefix(), tick, seq)
}

/// Dedup by `(kind, title)` keeping the first, drop low confidence, sort by
/// severity then confidence (both descending, stable), keep the top
/// `max_results`.
pub fn filter_insights(pool: Vec<Insight>, th: &InsightThresholds) -> Vec<Insight> {
    let mut seen = HashSet::new();
    let mut kept: Vec<Insight> = pool
        .into_iter()
        .filter(|i| seen.insert((i.kind, i.title.clone())))
        .filter(|i| i.confidence >= th.confidence)
        .collect();
    kept.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    kept.truncate(th.max_results);
    kept
}
