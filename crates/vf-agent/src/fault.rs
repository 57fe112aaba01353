//! Per-agent fault accounting.
//!
//! A step that fails is isolated by the scheduler and recorded here.
//! Consecutive failures escalate:
//!
//! | Consecutive faults | Status                                 |
//! |--------------------|----------------------------------------|
//! | 1–2                | `Active` (retried next tick)           |
//! | 3–4                | `Inactive` for the following tick      |
//! | 5                  | `Error`, never stepped again           |
//!
//! A clean step resets the consecutive count.

use vf_core::Tick;

/// Consecutive faults that trigger a one-tick deactivation.
pub const DEACTIVATE_AFTER: u32 = 3;
/// Consecutive faults that disable the agent permanently.
pub const DISABLE_AFTER: u32 = 5;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentStatus {
    #[default]
    Active,
    /// Skipped until `until` (exclusive).
    Inactive { until: Tick },
    /// Permanently skipped.
    Error,
}

#[derive(Clone, Debug, Default)]
pub struct FaultTracker {
    status:      AgentStatus,
    consecutive: u32,
    total:       u32,
    last_error:  Option<String>,
}

impl FaultTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the agent should be stepped at `now`.  An expired
    /// deactivation flips back to `Active` here.
    pub fn is_runnable(&mut self, now: Tick) -> bool {
        match self.status {
            AgentStatus::Active => true,
            AgentStatus::Error => false,
            AgentStatus::Inactive { until } if now >= until => {
                self.status = AgentStatus::Active;
                true
            }
            AgentStatus::Inactive { .. } => false,
        }
    }

    /// Record a failed step at `now` and return the resulting status.
    pub fn record_fault(&mut self, now: Tick, message: impl Into<String>) -> AgentStatus {
        self.consecutive += 1;
        self.total += 1;
        self.last_error = Some(message.into());

        self.status = if self.consecutive >= DISABLE_AFTER {
            AgentStatus::Error
        } else if self.consecutive >= DEACTIVATE_AFTER {
            AgentStatus::Inactive { until: now + 2 }
        } else {
            AgentStatus::Active
        };
        self.status
    }

    /// Record a clean step.
    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }
}
