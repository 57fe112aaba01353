//! Detector constants.  The defaults are the production values.

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InsightThresholds {
    /// Live patients needed before wait patterns are analysed.
    pub min_wait_sample: usize,
    /// Patients per condition group.
    pub min_group_size: usize,
    /// Mental-health average wait (ticks) that counts as a crisis.
    pub mental_health_wait_crisis: f64,
    /// Average wait (ticks) flagged for any other condition.
    pub excessive_wait: f64,
    /// Live patients needed for the wait/satisfaction correlation.
    pub min_correlation_sample: usize,
    /// `|r|` above which the correlation is reported.
    pub correlation_strength: f64,
    /// Specialty load relative to the mean that marks a bottleneck.
    pub bottleneck_factor: f64,
    /// Waiting-room headcount that marks a capacity crisis.
    pub congestion_waiting: usize,
    /// VR sessions per tick below which stations count as underused.
    pub vr_underuse: f64,
    /// VR-willing patients needed (strictly more than this).
    pub min_vr_adopters: usize,
    /// Current average wait that marks a temporal stress pattern.
    pub temporal_wait: f64,
    /// Per-provider load relative to the mean that marks idle staff.
    pub underuse_factor: f64,
    /// Minimum confidence for a surfaced insight.
    pub confidence: f64,
    /// Insights returned per pass.
    pub max_results: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            min_wait_sample:           20,
            min_group_size:            5,
            mental_health_wait_crisis: 45.0,
            excessive_wait:            60.0,
            min_correlation_sample:    30,
            correlation_strength:      0.5,
            bottleneck_factor:         1.5,
            congestion_waiting:        50,
            vr_underuse:               0.5,
            min_vr_adopters:           10,
            temporal_wait:             60.0,
            underuse_factor:           0.5,
            confidence:                0.75,
            max_results:               10,
        }
    }
}
