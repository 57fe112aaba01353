//! Healthcare provider entity.

use std::fmt;

use vf_core::{AreaId, PatientId, Position, ProviderId, Tick};
use vf_schedule::Shift;

use crate::{Condition, FaultTracker, Patient};

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProviderType {
    Physician,
    NursePractitioner,
    PhysicianAssistant,
    Nurse,
    Therapist,
    Technician,
}

impl ProviderType {
    /// Multiplier applied to the experience factor in base efficiency.
    pub fn efficiency_modifier(self) -> f64 {
        match self {
            ProviderType::Physician          => 1.0,
            ProviderType::NursePractitioner  => 0.95,
            ProviderType::PhysicianAssistant => 0.95,
            ProviderType::Nurse              => 0.85,
            ProviderType::Therapist          => 0.9,
            ProviderType::Technician         => 0.8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderType::Physician          => "physician",
            ProviderType::NursePractitioner  => "nurse_practitioner",
            ProviderType::PhysicianAssistant => "physician_assistant",
            ProviderType::Nurse              => "nurse",
            ProviderType::Therapist          => "therapist",
            ProviderType::Technician         => "technician",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Specialty {
    Emergency,
    PrimaryCare,
    MentalHealth,
    Specialist,
    General,
}

impl Specialty {
    pub const ALL: [Specialty; 5] = [
        Specialty::Emergency,
        Specialty::PrimaryCare,
        Specialty::MentalHealth,
        Specialty::Specialist,
        Specialty::General,
    ];

    /// Eligibility rule shared by patient-side pairing and provider-side
    /// waiting-room selection.
    pub fn can_treat(self, condition: Condition, urgency: u8) -> bool {
        match self {
            Specialty::Emergency    => urgency <= 2,
            Specialty::MentalHealth => condition == Condition::MentalHealth,
            Specialty::PrimaryCare  => matches!(
                condition,
                Condition::Routine | Condition::Chronic | Condition::Preventive
            ),
            Specialty::Specialist   => matches!(condition, Condition::Urgent | Condition::Chronic),
            Specialty::General      => urgency >= 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Specialty::Emergency    => "emergency",
            Specialty::PrimaryCare  => "primary_care",
            Specialty::MentalHealth => "mental_health",
            Specialty::Specialist   => "specialist",
            Specialty::General      => "general",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a provider is in its availability loop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProviderActivity {
    #[default]
    OffShift,
    Idle,
    OnBreak,
    Treating,
}

impl ProviderActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderActivity::OffShift => "off_shift",
            ProviderActivity::Idle     => "idle",
            ProviderActivity::OnBreak  => "on_break",
            ProviderActivity::Treating => "treating",
        }
    }
}

impl fmt::Display for ProviderActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// Wellbeing starting values.
pub const INITIAL_ENERGY: f64 = 100.0;
pub const INITIAL_STRESS: f64 = 20.0;
pub const INITIAL_SATISFACTION: f64 = 70.0;

#[derive(Clone, Debug)]
pub struct Provider {
    pub id:            ProviderId,
    pub provider_type: ProviderType,
    pub specialty:     Specialty,

    // ── Capability ────────────────────────────────────────────────────────
    pub experience_years:     u32,
    pub base_efficiency:      f64,
    pub current_efficiency:   f64,
    pub vr_certified:         bool,
    pub telehealth_certified: bool,
    pub innovation_adoption:  f64,

    // ── Wellbeing (all 0–100) ─────────────────────────────────────────────
    pub energy:       f64,
    pub stress:       f64,
    pub burnout_risk: f64,
    pub satisfaction: f64,

    // ── Availability ──────────────────────────────────────────────────────
    pub activity:        ProviderActivity,
    pub current_patient: Option<PatientId>,
    pub shift:           Shift,
    /// Urgency of the current patient, cached at pairing for stress updates.
    pub current_urgency: Option<u8>,
    pub treatment_due:   Option<Tick>,
    pub break_taken:     bool,

    pub patients_seen_today: u32,
    pub patients_seen_total: u32,

    // ── Spatial (presentation only) ───────────────────────────────────────
    pub station:  Option<AreaId>,
    pub position: Position,

    pub faults: FaultTracker,
}

impl Provider {
    /// `base_efficiency = type_modifier × min(1, 0.7 + 0.02 × experience)`.
    pub fn base_efficiency_for(provider_type: ProviderType, experience_years: u32) -> f64 {
        let experience_factor = (0.7 + 0.02 * experience_years as f64).min(1.0);
        provider_type.efficiency_modifier() * experience_factor
    }

    pub fn new(
        id: ProviderId,
        provider_type: ProviderType,
        specialty: Specialty,
        experience_years: u32,
    ) -> Self {
        let base = Self::base_efficiency_for(provider_type, experience_years);
        Self {
            id,
            provider_type,
            specialty,
            experience_years,
            base_efficiency: base,
            current_efficiency: base,
            vr_certified: false,
            telehealth_certified: false,
            innovation_adoption: 0.5,
            energy: INITIAL_ENERGY,
            stress: INITIAL_STRESS,
            burnout_risk: 0.0,
            satisfaction: INITIAL_SATISFACTION,
            activity: ProviderActivity::OffShift,
            current_patient: None,
            shift: Shift::DAY,
            current_urgency: None,
            treatment_due: None,
            break_taken: false,
            patients_seen_today: 0,
            patients_seen_total: 0,
            station: None,
            position: Position::default(),
            faults: FaultTracker::new(),
        }
    }

    /// On shift, not on break, and not treating anyone.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.activity == ProviderActivity::Idle && self.current_patient.is_none()
    }

    #[inline]
    pub fn is_treating(&self) -> bool {
        self.current_patient.is_some()
    }

    /// Whether this provider's specialty covers `patient`.
    #[inline]
    pub fn can_treat(&self, patient: &Patient) -> bool {
        self.specialty.can_treat(patient.condition, patient.urgency())
    }
}
