//! Insight records.  Immutable once surfaced.

use std::collections::BTreeMap;
use std::fmt;

/// Detector finding category.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InsightKind {
    WaitTimeCrisis,
    ExcessiveWait,
    CorrelationFound,
    ResourceBottleneck,
    CapacityCrisis,
    InnovationUnderutilization,
    SocialNetworkPattern,
    TemporalPattern,
    ResourceOptimization,
}

impl InsightKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InsightKind::WaitTimeCrisis             => "wait_time_crisis",
            InsightKind::ExcessiveWait              => "excessive_wait",
            InsightKind::CorrelationFound           => "correlation_found",
            InsightKind::ResourceBottleneck         => "resource_bottleneck",
            InsightKind::CapacityCrisis             => "capacity_crisis",
            InsightKind::InnovationUnderutilization => "innovation_underutilization",
            InsightKind::SocialNetworkPattern       => "social_network_pattern",
            InsightKind::TemporalPattern            => "temporal_pattern",
            InsightKind::ResourceOptimization       => "resource_optimization",
        }
    }

    /// Leading segment of insight ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            InsightKind::WaitTimeCrisis | InsightKind::ExcessiveWait => "wait_pattern",
            InsightKind::CorrelationFound           => "satisfaction_driver",
            InsightKind::ResourceBottleneck         => "bottleneck",
            InsightKind::CapacityCrisis             => "congestion",
            InsightKind::InnovationUnderutilization => "vr_underuse",
            InsightKind::SocialNetworkPattern       => "social_influence",
            InsightKind::TemporalPattern            => "temporal_pattern",
            InsightKind::ResourceOptimization       => "resource_opt",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered `Low < Medium < High`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low    => "low",
            Severity::Medium => "medium",
            Severity::High   => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An impact entry is either a figure or a free-text estimate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ImpactValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ImpactValue {
    fn from(v: f64) -> Self {
        ImpactValue::Number(v)
    }
}

impl From<usize> for ImpactValue {
    fn from(v: usize) -> Self {
        ImpactValue::Number(v as f64)
    }
}

impl From<String> for ImpactValue {
    fn from(v: String) -> Self {
        ImpactValue::Text(v)
    }
}

impl From<&str> for ImpactValue {
    fn from(v: &str) -> Self {
        ImpactValue::Text(v.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insight {
    /// `<prefix>_<tick>_<seq>`; empty until the engine surfaces the finding.
    pub id:             String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind:           InsightKind,
    pub severity:       Severity,
    pub title:          String,
    pub description:    String,
    pub recommendation: String,
    pub confidence:     f64,
    pub supporting_data: BTreeMap<String, f64>,
    pub impact:         BTreeMap<String, ImpactValue>,
}

impl Insight {
    pub fn new(kind: InsightKind, severity: Severity, confidence: f64, title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            kind,
            severity,
            title: title.into(),
            description: String::new(),
            recommendation: String::new(),
            confidence: confidence.clamp(0.0, 1.0),
            supporting_data: BTreeMap::new(),
            impact: BTreeMap::new(),
        }
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn recommend(mut self, text: impl Into<String>) -> Self {
        self.recommendation = text.into();
        self
    }

    pub fn support(mut self, key: &str, value: f64) -> Self {
        self.supporting_data.insert(key.to_owned(), value);
        self
    }

    pub fn with_impact(mut self, key: &str, value: impl Into<ImpactValue>) -> Self {
        self.impact.insert(key.to_owned(), value.into());
        self
    }
}
