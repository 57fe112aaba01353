//! Veteran patient entity.

use std::fmt;

use vf_core::{AreaId, Modality, PatientId, Position, ProviderId, Tick};

use crate::FaultTracker;

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Presenting condition.  Assigned at creation and never changed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Condition {
    Emergency,
    Urgent,
    Routine,
    MentalHealth,
    Chronic,
    Preventive,
}

impl Condition {
    pub const ALL: [Condition; 6] = [
        Condition::Emergency,
        Condition::Urgent,
        Condition::Routine,
        Condition::MentalHealth,
        Condition::Chronic,
        Condition::Preventive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Emergency    => "emergency",
            Condition::Urgent       => "urgent",
            Condition::Routine      => "routine",
            Condition::MentalHealth => "mental_health",
            Condition::Chronic      => "chronic",
            Condition::Preventive   => "preventive",
        }
    }

    /// Base treatment duration in ticks at full efficiency.
    pub fn base_duration(self) -> u64 {
        match self {
            Condition::Emergency    => 45,
            Condition::Urgent       => 30,
            Condition::Routine      => 20,
            Condition::MentalHealth => 50,
            Condition::Chronic      => 25,
            Condition::Preventive   => 15,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position in the patient journey.
///
/// Progression is strictly forward; `Discharged` and `LeftWithoutTreatment`
/// are terminal.  `Triage` is reserved for a dedicated triage stage and is
/// skipped by the current flow (Waiting goes straight to Treatment).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatientState {
    Arrival,
    CheckIn,
    Waiting,
    Triage,
    Treatment,
    Discharged,
    LeftWithoutTreatment,
}

impl PatientState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PatientState::Discharged | PatientState::LeftWithoutTreatment)
    }

    /// Rank along the journey; both terminals share the top rank.
    fn rank(self) -> u8 {
        match self {
            PatientState::Arrival              => 0,
            PatientState::CheckIn              => 1,
            PatientState::Waiting              => 2,
            PatientState::Triage               => 3,
            PatientState::Treatment            => 4,
            PatientState::Discharged           => 5,
            PatientState::LeftWithoutTreatment => 5,
        }
    }

    /// `true` if `self → next` respects forward progression.
    pub fn can_advance_to(self, next: PatientState) -> bool {
        !self.is_terminal() && next.rank() > self.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatientState::Arrival              => "arrival",
            PatientState::CheckIn              => "check_in",
            PatientState::Waiting              => "waiting",
            PatientState::Triage               => "triage",
            PatientState::Treatment            => "treatment",
            PatientState::Discharged           => "discharged",
            PatientState::LeftWithoutTreatment => "left_without_treatment",
        }
    }
}

impl fmt::Display for PatientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceEra {
    Vietnam,
    GulfWar,
    OefOif,
    Korea,
    Peacetime,
}

impl ServiceEra {
    pub const ALL: [ServiceEra; 5] = [
        ServiceEra::Vietnam,
        ServiceEra::GulfWar,
        ServiceEra::OefOif,
        ServiceEra::Korea,
        ServiceEra::Peacetime,
    ];

    /// Adjustment to technology comfort relative to `100 − age`.
    pub fn tech_modifier(self) -> f64 {
        match self {
            ServiceEra::OefOif    => 20.0,
            ServiceEra::GulfWar   => 10.0,
            ServiceEra::Peacetime => 5.0,
            ServiceEra::Vietnam   => -10.0,
            ServiceEra::Korea     => -20.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceEra::Vietnam   => "Vietnam",
            ServiceEra::GulfWar   => "Gulf War",
            ServiceEra::OefOif    => "OEF/OIF",
            ServiceEra::Korea     => "Korea",
            ServiceEra::Peacetime => "Peacetime",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comorbidity {
    Ptsd,
    Depression,
    Anxiety,
    ChronicPain,
    Diabetes,
    Hypertension,
    SubstanceUse,
    Tbi,
}

impl Comorbidity {
    pub const ALL: [Comorbidity; 8] = [
        Comorbidity::Ptsd,
        Comorbidity::Depression,
        Comorbidity::Anxiety,
        Comorbidity::ChronicPain,
        Comorbidity::Diabetes,
        Comorbidity::Hypertension,
        Comorbidity::SubstanceUse,
        Comorbidity::Tbi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Comorbidity::Ptsd         => "PTSD",
            Comorbidity::Depression   => "Depression",
            Comorbidity::Anxiety      => "Anxiety",
            Comorbidity::ChronicPain  => "Chronic Pain",
            Comorbidity::Diabetes     => "Diabetes",
            Comorbidity::Hypertension => "Hypertension",
            Comorbidity::SubstanceUse => "Substance Use",
            Comorbidity::Tbi          => "TBI",
        }
    }
}

// ── Patient ───────────────────────────────────────────────────────────────────

/// Scalar bounds.
pub const SATISFACTION_MAX: f64 = 100.0;
pub const PAIN_MAX: f64 = 10.0;
pub const URGENCY_MIN: u8 = 1;
pub const URGENCY_MAX: u8 = 5;

/// A veteran moving through the facility.
///
/// Bounded scalars (`satisfaction`, `pain_level`, `urgency`) are private and
/// only change through clamping mutators, so the bounds hold after every
/// mutation.
#[derive(Clone, Debug)]
pub struct Patient {
    pub id: PatientId,

    // ── Demographics ──────────────────────────────────────────────────────
    pub age:               u32,
    pub service_era:       ServiceEra,
    pub disability_rating: u8,

    // ── Clinical ──────────────────────────────────────────────────────────
    pub condition:     Condition,
    urgency:           u8,
    pub comorbidities: Vec<Comorbidity>,
    pain_level:        f64,

    // ── Preferences ───────────────────────────────────────────────────────
    pub tech_comfort:       f64,
    pub vr_willing:         bool,
    pub prefers_telehealth: bool,
    pub influence_strength: f64,

    // ── Journey ───────────────────────────────────────────────────────────
    pub state:        PatientState,
    pub wait_time:    u64,
    satisfaction:     f64,
    pub arrival_tick: Tick,
    pub exit_tick:    Option<Tick>,

    // ── Treatment record ──────────────────────────────────────────────────
    pub modality:   Option<Modality>,
    pub provider:   Option<ProviderId>,
    pub ai_triaged: bool,

    // ── Social ────────────────────────────────────────────────────────────
    /// Non-owning handles into the agent store.
    pub social_connections: Vec<PatientId>,

    // ── Spatial (presentation only) ───────────────────────────────────────
    pub location:    Option<AreaId>,
    pub destination: Option<AreaId>,
    pub position:    Position,

    pub faults: FaultTracker,
}

impl Patient {
    /// A patient at `Arrival` with neutral preferences.  Population
    /// generation fills the demographic fields afterwards.
    pub fn new(id: PatientId, condition: Condition, urgency: u8, arrival_tick: Tick) -> Self {
        Self {
            id,
            age: 55,
            service_era: ServiceEra::Peacetime,
            disability_rating: 0,
            condition,
            urgency: urgency.clamp(URGENCY_MIN, URGENCY_MAX),
            comorbidities: Vec::new(),
            pain_level: 0.0,
            tech_comfort: 50.0,
            vr_willing: false,
            prefers_telehealth: false,
            influence_strength: 0.5,
            state: PatientState::Arrival,
            wait_time: 0,
            satisfaction: 50.0,
            arrival_tick,
            exit_tick: None,
            modality: None,
            provider: None,
            ai_triaged: false,
            social_connections: Vec::new(),
            location: None,
            destination: None,
            position: Position::default(),
            faults: FaultTracker::new(),
        }
    }

    // ── Bounded scalars ───────────────────────────────────────────────────

    #[inline]
    pub fn satisfaction(&self) -> f64 {
        self.satisfaction
    }

    /// Add `delta`, clamped to [0, 100].
    #[inline]
    pub fn adjust_satisfaction(&mut self, delta: f64) {
        self.set_satisfaction(self.satisfaction + delta);
    }

    #[inline]
    pub fn set_satisfaction(&mut self, value: f64) {
        if !value.is_nan() {
            self.satisfaction = value.clamp(0.0, SATISFACTION_MAX);
        }
    }

    #[inline]
    pub fn pain_level(&self) -> f64 {
        self.pain_level
    }

    pub fn set_pain_level(&mut self, value: f64) {
        self.pain_level = value.clamp(0.0, PAIN_MAX);
    }

    /// Lower pain by `amount`, floored at 0.
    pub fn relieve_pain(&mut self, amount: f64) {
        self.set_pain_level(self.pain_level - amount);
    }

    #[inline]
    pub fn urgency(&self) -> u8 {
        self.urgency
    }

    pub fn set_urgency(&mut self, value: i32) {
        self.urgency = value.clamp(URGENCY_MIN as i32, URGENCY_MAX as i32) as u8;
    }

    // ── Journey helpers ───────────────────────────────────────────────────

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    #[inline]
    pub fn is_mental_health(&self) -> bool {
        self.condition == Condition::MentalHealth
    }

    /// Ticks from arrival to exit (or to `now` while still in the facility).
    pub fn length_of_stay(&self, now: Tick) -> u64 {
        self.exit_tick.unwrap_or(now).since(self.arrival_tick)
    }

    /// `true` once the patient has reached treatment, whether or not it has
    /// finished.
    pub fn reached_treatment(&self) -> bool {
        matches!(self.state, PatientState::Treatment | PatientState::Discharged)
    }
}
