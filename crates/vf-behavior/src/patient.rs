//! Patient journey: Arrival → CheckIn → Waiting → Treatment → Discharged,
//! with LeftWithoutTreatment as the early exit from Waiting.

use tracing::debug;

use vf_agent::{FaultTracker, Patient, PatientState, Provider};
use vf_core::{Modality, SimRng};
use vf_facility::area::names;

use crate::treatment::{self, area_for, move_patient, relocate_patient};
use crate::{triage, AgentFault, Intent, PeerEffect, StepContext, Steppable};

/// Satisfaction starts eroding after this many ticks of waiting.
pub const IMPATIENT_AFTER: u64 = 30;
/// A second, steeper erosion kicks in here.
pub const FRUSTRATED_AFTER: u64 = 60;
/// Walkouts are only possible past this wait.
pub const WALKOUT_AFTER: u64 = 120;
/// Scale of the walkout ramp: `p = (wait − 120) / 240`.
pub const WALKOUT_RAMP: f64 = 240.0;
/// Only low-urgency patients (≥ this) walk out.
pub const WALKOUT_MIN_URGENCY: u8 = 4;

pub const WALKOUT_PENALTY: f64 = 20.0;
pub const WALKOUT_PEER_PENALTY: f64 = 5.0;
pub const VR_INFLUENCE_THRESHOLD: f64 = 80.0;
pub const VR_TECH_COMFORT_BOOST: f64 = 10.0;

const WALK_SPEED: f32 = 2.0;

/// Walkout probability for a given wait.  Not capped: values ≥ 1 make the
/// walkout certain.
pub fn walkout_probability(wait_time: u64) -> f64 {
    (wait_time as f64 - WALKOUT_AFTER as f64) / WALKOUT_RAMP
}

impl Steppable for Patient {
    type Peers = [Provider];

    fn step(
        &mut self,
        providers: &mut [Provider],
        ctx: &mut StepContext<'_>,
    ) -> Result<Vec<Intent>, AgentFault> {
        let intents = match self.state {
            PatientState::Arrival => {
                arrive(self, ctx);
                Vec::new()
            }
            PatientState::CheckIn => {
                check_in(self, ctx);
                Vec::new()
            }
            PatientState::Waiting => wait(self, providers, ctx)?,
            // No dedicated triage stage yet; nothing moves a patient here.
            PatientState::Triage => Vec::new(),
            PatientState::Treatment => receive_treatment(self, ctx)?,
            PatientState::Discharged | PatientState::LeftWithoutTreatment => Vec::new(),
        };
        walk(self, ctx);
        Ok(intents)
    }

    fn faults(&mut self) -> &mut FaultTracker {
        &mut self.faults
    }
}

fn arrive(p: &mut Patient, ctx: &mut StepContext<'_>) {
    p.state = PatientState::CheckIn;
    ctx.counters.arrivals += 1;
    move_patient(p, ctx.facility, names::ENTRANCE);
    p.destination = ctx.facility.area(names::RECEPTION);
}

fn check_in(p: &mut Patient, ctx: &mut StepContext<'_>) {
    if !ctx.facility.reception.try_acquire() {
        p.wait_time += 1;
        return;
    }
    p.state = PatientState::Waiting;
    ctx.facility.waiting_room.join(p.id);
    move_patient(p, ctx.facility, names::WAITING_ROOM);

    if ctx.ai_triage_enabled && !p.ai_triaged {
        let outcome = triage::assess(p, ctx.rng);
        ctx.counters.ai_triage_assessments += 1;
        debug!(
            patient = %p.id,
            score = outcome.score,
            accurate = outcome.accurate,
            before = outcome.before,
            after = outcome.after,
            "AI triage"
        );
    }
}

fn wait(
    p: &mut Patient,
    providers: &mut [Provider],
    ctx: &mut StepContext<'_>,
) -> Result<Vec<Intent>, AgentFault> {
    p.wait_time += 1;
    if p.wait_time > IMPATIENT_AFTER {
        p.adjust_satisfaction(-1.0);
    }
    if p.wait_time > FRUSTRATED_AFTER {
        p.adjust_satisfaction(-2.0);
    }

    if p.urgency() >= WALKOUT_MIN_URGENCY && p.wait_time > WALKOUT_AFTER {
        let roll: f64 = ctx.rng.random();
        if roll < walkout_probability(p.wait_time) {
            return Ok(walk_out(p, ctx));
        }
    }

    let Some(provider) = providers.iter_mut().find(|pr| pr.is_available() && pr.can_treat(p)) else {
        return Ok(Vec::new());
    };
    treatment::begin_treatment(provider, p, ctx)?;
    Ok(Vec::new())
}

fn walk_out(p: &mut Patient, ctx: &mut StepContext<'_>) -> Vec<Intent> {
    p.state = PatientState::LeftWithoutTreatment;
    p.adjust_satisfaction(-WALKOUT_PENALTY);
    p.exit_tick = Some(ctx.tick);
    ctx.facility.waiting_room.remove(p.id);
    relocate_patient(p, ctx.facility, None);
    ctx.counters.left_without_treatment += 1;

    debug!(tick = ctx.tick.0, patient = %p.id, wait = p.wait_time, "walked out");

    if p.social_connections.is_empty() {
        return Vec::new();
    }
    vec![Intent::Influence {
        from:    p.id,
        targets: p.social_connections.clone(),
        effect:  PeerEffect::Dissatisfy { amount: WALKOUT_PEER_PENALTY },
    }]
}

/// Pick the modality, taking a pool slot where one is needed.
pub fn determine_treatment_type(p: &Patient, ctx: &mut StepContext<'_>) -> Modality {
    if p.vr_willing && p.is_mental_health() && ctx.facility.vr_stations.try_acquire() {
        Modality::Vr
    } else if p.prefers_telehealth && ctx.facility.telehealth_rooms.try_acquire() {
        Modality::Telehealth
    } else {
        Modality::Traditional
    }
}

fn receive_treatment(p: &mut Patient, ctx: &mut StepContext<'_>) -> Result<Vec<Intent>, AgentFault> {
    if p.provider.is_none() {
        return Err(AgentFault::inconsistent(p.id, "in treatment without a provider"));
    }

    let modality = determine_treatment_type(p, ctx);
    p.modality = Some(modality);
    move_patient(p, ctx.facility, area_for(p.condition, modality));

    let mut intents = Vec::new();
    match modality {
        Modality::Vr => {
            let quality = ctx.rng.gen_range(0.7..=1.0);
            p.adjust_satisfaction(30.0 * quality);
            p.relieve_pain(3.0);
            ctx.counters.vr_sessions += 1;
            if p.satisfaction() > VR_INFLUENCE_THRESHOLD {
                if let Some(intent) = vr_word_of_mouth(p, ctx.rng) {
                    intents.push(intent);
                }
            }
        }
        Modality::Telehealth => {
            let quality = ctx.rng.gen_range(0.6..=0.95);
            p.adjust_satisfaction((quality - 0.6) * 30.0);
            p.relieve_pain(1.0);
            ctx.counters.telehealth_sessions += 1;
        }
        Modality::Traditional => {
            let quality = ctx.rng.gen_range(0.5..=0.9);
            p.adjust_satisfaction((quality - 0.7) * 20.0);
            p.relieve_pain(2.0);
        }
    }

    treatment::discharge(p, ctx);
    debug!(tick = ctx.tick.0, patient = %p.id, modality = %modality, "discharged");
    Ok(intents)
}

/// A delighted VR patient talks a sample of its contacts into trying VR.
fn vr_word_of_mouth(p: &Patient, rng: &mut SimRng) -> Option<Intent> {
    let n = (p.influence_strength * p.social_connections.len() as f64) as usize;
    if n == 0 {
        return None;
    }
    Some(Intent::Influence {
        from:    p.id,
        targets: rng.choose_multiple(&p.social_connections, n),
        effect:  PeerEffect::AdoptVr { tech_comfort_boost: VR_TECH_COMFORT_BOOST },
    })
}

/// Presentation only: drift toward the destination area's layout position.
fn walk(p: &mut Patient, ctx: &StepContext<'_>) {
    let Some(dest) = p.destination else { return };
    let Some(target) = ctx.facility.topology().position(dest) else { return };
    if p.position.step_toward(target, WALK_SPEED) {
        p.destination = None;
    }
}
