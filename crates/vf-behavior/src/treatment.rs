//! Pairing, treatment duration and quality, and completion.
//!
//! Both pairing paths (a waiting patient finding a free provider, and an
//! idle provider pulling from the waiting room) go through
//! [`begin_treatment`], so the waiting-room removal and the completion event
//! happen in exactly one place.

use tracing::debug;

use vf_agent::{Condition, Patient, PatientState, Provider, ProviderActivity, Specialty};
use vf_core::{AreaId, Modality, SimRng};
use vf_facility::area::names;
use vf_facility::FacilityState;
use vf_schedule::EventKind;

use crate::{AgentFault, FaultResult, StepContext};

/// Efficiency floor for duration math.  An exhausted provider is slow, not
/// stalled forever.
pub const MIN_EFFICIENCY: f64 = 0.1;
/// Extra ticks per comorbidity.
pub const COMORBIDITY_TICKS: u64 = 5;
/// Duration multiplier when the VR path is open.
pub const VR_SPEEDUP: f64 = 0.8;

/// Treatment area for a provider's specialty.
pub fn station_for(specialty: Specialty) -> &'static str {
    match specialty {
        Specialty::Emergency    => names::EMERGENCY,
        Specialty::MentalHealth => names::MENTAL_HEALTH,
        Specialty::PrimaryCare  => names::PRIMARY_CARE,
        Specialty::Specialist | Specialty::General => names::SPECIALIST,
    }
}

/// Area a patient moves to once a modality is chosen.
pub fn area_for(condition: Condition, modality: Modality) -> &'static str {
    match modality {
        Modality::Vr         => names::VR_THERAPY_SUITE,
        Modality::Telehealth => names::TELEHEALTH_CENTER,
        Modality::Traditional => match condition {
            Condition::Emergency    => names::EMERGENCY,
            Condition::MentalHealth => names::MENTAL_HEALTH,
            Condition::Urgent | Condition::Chronic => names::SPECIALIST,
            Condition::Routine | Condition::Preventive => names::PRIMARY_CARE,
        },
    }
}

/// Move a patient to the named area, keeping occupancy counters in step.
/// Unknown names (e.g. on the fallback topology) leave the patient where
/// it is.
pub fn move_patient(patient: &mut Patient, facility: &mut FacilityState, area: &str) {
    let Some(to) = facility.area(area) else { return };
    relocate_patient(patient, facility, Some(to));
}

/// Move a patient to `to` (`None` = left the building).
pub fn relocate_patient(patient: &mut Patient, facility: &mut FacilityState, to: Option<AreaId>) {
    facility.relocate(patient.location, to);
    patient.location = to;
    patient.destination = to;
}

/// Whether the shortened VR pathway applies to this pairing.
pub fn vr_path_eligible(provider: &Provider, patient: &Patient, facility: &FacilityState) -> bool {
    patient.is_mental_health()
        && patient.vr_willing
        && provider.vr_certified
        && facility.vr_stations.available() > 0
}

/// `floor(base / efficiency) + 5 × comorbidities`, × 0.8 on the VR path,
/// never below one tick.
pub fn treatment_duration(provider: &Provider, patient: &Patient, vr_path: bool) -> u64 {
    let efficiency = provider.current_efficiency.max(MIN_EFFICIENCY);
    let base = (patient.condition.base_duration() as f64 / efficiency).floor() as u64;
    let mut duration = base + COMORBIDITY_TICKS * patient.comorbidities.len() as u64;
    if vr_path {
        duration = (duration as f64 * VR_SPEEDUP).floor() as u64;
    }
    duration.max(1)
}

/// Care quality delivered at completion, in `[0.5, 1.0]`.
pub fn treatment_quality(provider: &Provider, rng: &mut SimRng) -> f64 {
    let mut quality = provider.current_efficiency;
    if provider.stress > 70.0 {
        quality *= 0.9;
    }
    if provider.energy < 30.0 {
        quality *= 0.85;
    }
    (quality + rng.noise(0.1)).clamp(0.5, 1.0)
}

/// Pair `provider` with `patient` and schedule the completion event.
///
/// The patient must be waiting and the provider available; anything else
/// is a fault and nothing is changed.
pub fn begin_treatment(
    provider: &mut Provider,
    patient:  &mut Patient,
    ctx:      &mut StepContext<'_>,
) -> FaultResult<u64> {
    if !provider.is_available() {
        return Err(AgentFault::inconsistent(provider.id, "paired while unavailable"));
    }
    if !patient.state.can_advance_to(PatientState::Treatment) || patient.provider.is_some() {
        return Err(AgentFault::inconsistent(
            patient.id,
            format!("paired from state {}", patient.state),
        ));
    }

    let vr_path = vr_path_eligible(provider, patient, ctx.facility);
    let duration = treatment_duration(provider, patient, vr_path);

    ctx.facility.waiting_room.remove(patient.id);
    patient.state = PatientState::Treatment;
    patient.provider = Some(provider.id);
    if let Some(station) = provider.station {
        relocate_patient(patient, ctx.facility, Some(station));
    } else {
        move_patient(patient, ctx.facility, station_for(provider.specialty));
    }

    provider.activity = ProviderActivity::Treating;
    provider.current_patient = Some(patient.id);
    provider.current_urgency = Some(patient.urgency());
    let due = ctx.events.schedule(
        ctx.tick,
        duration,
        provider.id,
        EventKind::TreatmentComplete { patient: patient.id },
    );
    provider.treatment_due = Some(due);
    ctx.counters.treatments_started += 1;

    debug!(
        tick = ctx.tick.0,
        provider = %provider.id,
        patient = %patient.id,
        duration,
        vr_path,
        "treatment started"
    );
    Ok(duration)
}

/// Close out a provider's treatment.  `patient` is `None` when the record
/// is gone; the provider is freed either way.  Returns the quality.
pub fn complete_treatment(
    provider: &mut Provider,
    patient:  Option<&mut Patient>,
    ctx:      &mut StepContext<'_>,
) -> f64 {
    let quality = treatment_quality(provider, ctx.rng);

    if let Some(patient) = patient {
        patient.adjust_satisfaction((quality - 0.5) * 40.0);
        patient.relieve_pain(5.0 * quality);
        // The patient never got its own step in (skipped or deactivated):
        // close the visit here so it cannot stay in treatment forever.
        if patient.state == PatientState::Treatment {
            patient.modality.get_or_insert(Modality::Traditional);
            discharge(patient, ctx);
        }
    }

    provider.patients_seen_today += 1;
    provider.patients_seen_total += 1;
    provider.current_patient = None;
    provider.current_urgency = None;
    provider.treatment_due = None;
    if provider.activity == ProviderActivity::Treating {
        provider.activity = ProviderActivity::Idle;
    }
    if quality > 0.8 {
        provider.satisfaction = (provider.satisfaction + 2.0).min(100.0);
    }
    ctx.counters.treatments_completed += 1;

    debug!(tick = ctx.tick.0, provider = %provider.id, quality, "treatment complete");
    quality
}

/// Mark the patient discharged and count it.  A discharged patient has
/// left the building, so no area keeps it in its occupancy.
pub fn discharge(patient: &mut Patient, ctx: &mut StepContext<'_>) {
    patient.state = PatientState::Discharged;
    patient.exit_tick = Some(ctx.tick);
    relocate_patient(patient, ctx.facility, None);
    ctx.counters.treated += 1;
}
