//! Randomised-order agent scheduler with fault isolation.

use std::fmt;

use tracing::warn;

use vf_agent::{AgentStatus, AgentStore};
use vf_behavior::{apply_intents, StepContext, Steppable};
use vf_core::{PatientId, ProviderId};

/// Handle to a scheduled agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AgentRef {
    Patient(PatientId),
    Provider(ProviderId),
}

impl fmt::Display for AgentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentRef::Patient(id)  => id.fmt(f),
            AgentRef::Provider(id) => id.fmt(f),
        }
    }
}

/// What one [`Scheduler::step`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub stepped: usize,
    /// Retired mid-tick, deactivated, or disabled.
    pub skipped: usize,
    pub faults:  usize,
    pub retired: usize,
}

/// The live agent set.  Order is irrelevant; every tick runs a fresh
/// shuffle of a snapshot.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    live: Vec<AgentRef>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { live: Vec::with_capacity(n) }
    }

    /// Register an agent.  Only call between ticks.
    pub fn add(&mut self, agent: AgentRef) {
        self.live.push(agent);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn agents(&self) -> &[AgentRef] {
        &self.live
    }

    /// Step every live agent exactly once, in a random order drawn from the
    /// run RNG.  Each agent's intents are applied before the next agent
    /// runs.  Terminal patients are retired afterwards.
    pub fn step(&mut self, agents: &mut AgentStore, ctx: &mut StepContext<'_>) -> StepReport {
        let mut order = self.live.clone();
        ctx.rng.shuffle(&mut order);

        let mut report = StepReport::default();
        let AgentStore { patients, providers } = agents;

        for agent in order {
            let outcome = match agent {
                AgentRef::Patient(id) => {
                    let Some(p) = patients.get_mut(id.index()) else {
                        report.skipped += 1;
                        continue;
                    };
                    if p.is_terminal() || !p.faults.is_runnable(ctx.tick) {
                        report.skipped += 1;
                        continue;
                    }
                    match p.step(&mut providers[..], ctx) {
                        Ok(intents) => {
                            p.on_success();
                            apply_intents(intents, patients);
                            Ok(())
                        }
                        Err(fault) => Err((p.on_fault(&fault, ctx.tick), fault)),
                    }
                }
                AgentRef::Provider(id) => {
                    let Some(p) = providers.get_mut(id.index()) else {
                        report.skipped += 1;
                        continue;
                    };
                    if !p.faults.is_runnable(ctx.tick) {
                        report.skipped += 1;
                        continue;
                    }
                    match p.step(&mut patients[..], ctx) {
                        Ok(intents) => {
                            p.on_success();
                            apply_intents(intents, patients);
                            Ok(())
                        }
                        Err(fault) => Err((p.on_fault(&fault, ctx.tick), fault)),
                    }
                }
            };

            match outcome {
                Ok(()) => report.stepped += 1,
                Err((status, fault)) => {
                    report.faults += 1;
                    warn!(tick = ctx.tick.0, %agent, ?status, %fault, "agent step failed");
                    if status == AgentStatus::Error {
                        warn!(%agent, "agent disabled after repeated faults");
                    }
                }
            }
        }

        let before = self.live.len();
        self.live.retain(|a| match a {
            AgentRef::Patient(id) => patients.get(id.index()).is_some_and(|p| !p.is_terminal()),
            AgentRef::Provider(_) => true,
        });
        report.retired = before - self.live.len();
        report
    }
}
