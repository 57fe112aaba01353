//! The `Steppable` trait — one behavioural update per agent per tick.

use vf_agent::{AgentStatus, FaultTracker};
use vf_core::Tick;

use crate::{AgentFault, Intent, StepContext};

/// Implemented by each agent kind.
///
/// `Peers` is the collection of the *other* agent kind, borrowed mutably for
/// the duration of the step: a patient pairs itself with a provider, a
/// provider pulls a patient out of the waiting room.
///
/// # Contract
///
/// - `step` runs to completion; it never blocks or suspends.
/// - Returning `Err` reports a fault.  The scheduler logs it, calls
///   [`on_fault`](Self::on_fault), and carries on with the next agent.
/// - Returned intents are applied before the next agent steps.
pub trait Steppable {
    type Peers: ?Sized;

    fn step(
        &mut self,
        peers: &mut Self::Peers,
        ctx:   &mut StepContext<'_>,
    ) -> Result<Vec<Intent>, AgentFault>;

    fn faults(&mut self) -> &mut FaultTracker;

    /// Record a fault and return the agent's new status.
    fn on_fault(&mut self, fault: &AgentFault, tick: Tick) -> AgentStatus {
        self.faults().record_fault(tick, fault.to_string())
    }

    /// Record a clean step.
    fn on_success(&mut self) {
        self.faults().record_success();
    }
}
