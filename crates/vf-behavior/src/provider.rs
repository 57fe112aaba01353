//! Provider loop: wellbeing → shift gate → break → patient selection.
//! Treatment completion and break return arrive as deferred events, handled
//! by [`handle_event`].

use tracing::debug;

use vf_agent::{Condition, FaultTracker, Patient, PatientState, Provider, ProviderActivity, Specialty};
use vf_core::PatientId;
use vf_facility::WaitingRoom;
use vf_schedule::EventKind;

use crate::treatment::{self, station_for};
use crate::{AgentFault, Intent, StepContext, Steppable};

pub const ENERGY_DRAIN: f64 = 0.5;
pub const STRESS_HIGH_ACUITY: f64 = 1.0;
pub const STRESS_LOW_ACUITY: f64 = 0.5;
pub const BREAK_LENGTH: u64 = 15;
pub const BREAK_ENERGY: f64 = 20.0;
pub const BREAK_STRESS_RELIEF: f64 = 15.0;
pub const MAX_PATIENTS_BEFORE_BREAK: u32 = 15;

const WALK_SPEED: f32 = 1.5;

impl Steppable for Provider {
    type Peers = [Patient];

    fn step(
        &mut self,
        patients: &mut [Patient],
        ctx: &mut StepContext<'_>,
    ) -> Result<Vec<Intent>, AgentFault> {
        if self.activity == ProviderActivity::Treating && self.current_patient.is_none() {
            return Err(AgentFault::inconsistent(self.id, "treating without a patient"));
        }

        update_wellbeing(self);

        if !shift_gate(self, ctx.hour) {
            return Ok(Vec::new());
        }

        if self.activity == ProviderActivity::Idle && needs_break(self) && !self.break_taken {
            take_break(self, ctx);
        } else if self.is_available() {
            if let Some(id) = select_patient(self, &ctx.facility.waiting_room, patients) {
                let patient = patients.get_mut(id.index()).ok_or(AgentFault::UnknownPatient(id))?;
                treatment::begin_treatment(self, patient, ctx)?;
            }
        }

        walk(self, ctx);
        Ok(Vec::new())
    }

    fn faults(&mut self) -> &mut FaultTracker {
        &mut self.faults
    }
}

/// Energy drain, stress build-up, burnout, and the efficiency they imply.
pub fn update_wellbeing(p: &mut Provider) {
    p.energy = (p.energy - ENERGY_DRAIN).max(0.0);
    if p.is_treating() {
        let load = match p.current_urgency {
            Some(u) if u <= 2 => STRESS_HIGH_ACUITY,
            _ => STRESS_LOW_ACUITY,
        };
        p.stress = (p.stress + load).min(100.0);
    }
    if p.energy < 30.0 && p.stress > 70.0 {
        p.burnout_risk = (p.burnout_risk + 1.0).min(100.0);
    }
    p.current_efficiency = p.base_efficiency * (p.energy / 100.0) * (1.0 - p.stress / 200.0);
}

/// Apply the shift window for `hour`.  Returns whether the provider is on
/// duty this tick.  A provider mid-treatment finishes it even past shift end.
pub fn shift_gate(p: &mut Provider, hour: u32) -> bool {
    let on_shift = p.shift.on_shift(hour);
    if !on_shift {
        if !p.is_treating() && p.activity != ProviderActivity::OffShift {
            debug!(provider = %p.id, hour, "shift ended");
            p.activity = ProviderActivity::OffShift;
        }
        return false;
    }
    if p.activity == ProviderActivity::OffShift {
        p.activity = ProviderActivity::Idle;
        p.patients_seen_today = 0;
        p.break_taken = false;
    }
    true
}

pub fn needs_break(p: &Provider) -> bool {
    p.energy < 40.0 || p.stress > 80.0 || p.patients_seen_today >= MAX_PATIENTS_BEFORE_BREAK
}

fn take_break(p: &mut Provider, ctx: &mut StepContext<'_>) {
    p.energy = (p.energy + BREAK_ENERGY).min(100.0);
    p.stress = (p.stress - BREAK_STRESS_RELIEF).max(0.0);
    p.activity = ProviderActivity::OnBreak;
    p.break_taken = true;
    ctx.events.schedule(ctx.tick, BREAK_LENGTH, p.id, EventKind::ReturnFromBreak);
    ctx.counters.breaks_taken += 1;
    debug!(tick = ctx.tick.0, provider = %p.id, energy = p.energy, stress = p.stress, "break");
}

/// `(6 − urgency) × 10 + min(wait / 5, 20) + specialty bonus`.
pub fn patient_priority(provider: &Provider, patient: &Patient) -> f64 {
    let urgency = patient.urgency();
    let mut priority = (6 - urgency as i32) as f64 * 10.0 + (patient.wait_time as f64 / 5.0).min(20.0);
    match provider.specialty {
        Specialty::MentalHealth if patient.condition == Condition::MentalHealth => priority += 20.0,
        Specialty::Emergency if urgency <= 2 => priority += 30.0,
        _ => {}
    }
    priority
}

/// Highest-priority eligible waiting patient.  Ties keep waiting-room order.
pub fn select_patient(provider: &Provider, room: &WaitingRoom, patients: &[Patient]) -> Option<PatientId> {
    let mut best: Option<(PatientId, f64)> = None;
    for id in room.iter() {
        let Some(patient) = patients.get(id.index()) else { continue };
        if patient.state != PatientState::Waiting || !provider.can_treat(patient) {
            continue;
        }
        let priority = patient_priority(provider, patient);
        if best.is_none_or(|(_, b)| priority > b) {
            best = Some((id, priority));
        }
    }
    best.map(|(id, _)| id)
}

/// Apply a deferred event addressed to `provider`.
pub fn handle_event(
    provider: &mut Provider,
    patients: &mut [Patient],
    kind:     EventKind,
    ctx:      &mut StepContext<'_>,
) -> Result<(), AgentFault> {
    match kind {
        EventKind::ReturnFromBreak => {
            if provider.activity == ProviderActivity::OnBreak {
                provider.activity = ProviderActivity::Idle;
                debug!(tick = ctx.tick.0, provider = %provider.id, "back from break");
            }
            Ok(())
        }
        EventKind::TreatmentComplete { patient } => {
            if provider.current_patient != Some(patient) {
                debug!(provider = %provider.id, patient = %patient, "stale completion ignored");
                return Ok(());
            }
            let record = patients.get_mut(patient.index());
            if record.is_none() {
                treatment::complete_treatment(provider, None, ctx);
                return Err(AgentFault::UnknownPatient(patient));
            }
            treatment::complete_treatment(provider, record, ctx);
            Ok(())
        }
    }
}

/// Presentation only: drift toward the assigned station.
fn walk(p: &mut Provider, ctx: &StepContext<'_>) {
    let topology = ctx.facility.topology();
    let station = p.station.or_else(|| topology.lookup(station_for(p.specialty)));
    if let Some(target) = station.and_then(|s| topology.position(s)) {
        p.position.step_toward(target, WALK_SPEED);
    }
}
