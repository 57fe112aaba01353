//! `AgentStore` — owning storage for every patient and provider in a run.
//!
//! # Layout
//!
//! Patients and providers live in two dense `Vec`s indexed by their ids
//! (`PatientId(i)` is `patients[i]`).  Ids are handed out sequentially and
//! never reused.  A patient that reaches a terminal state stays in the
//! `Vec` as an archived record: metrics read the whole population, while
//! the scheduler only steps live agents.

use vf_core::{PatientId, ProviderId};

use crate::{Patient, PatientState, Provider};

#[derive(Default)]
pub struct AgentStore {
    pub patients:  Vec<Patient>,
    pub providers: Vec<Provider>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(patients: usize, providers: usize) -> Self {
        Self {
            patients:  Vec::with_capacity(patients),
            providers: Vec::with_capacity(providers),
        }
    }

    // ── Id allocation ─────────────────────────────────────────────────────

    /// The id the next inserted patient will receive.
    #[inline]
    pub fn next_patient_id(&self) -> PatientId {
        PatientId(self.patients.len() as u32)
    }

    #[inline]
    pub fn next_provider_id(&self) -> ProviderId {
        ProviderId(self.providers.len() as u32)
    }

    /// Insert a patient whose id was taken from [`next_patient_id`](Self::next_patient_id).
    pub fn push_patient(&mut self, patient: Patient) -> PatientId {
        debug_assert_eq!(patient.id, self.next_patient_id());
        let id = patient.id;
        self.patients.push(patient);
        id
    }

    pub fn push_provider(&mut self, provider: Provider) -> ProviderId {
        debug_assert_eq!(provider.id, self.next_provider_id());
        let id = provider.id;
        self.providers.push(provider);
        id
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.get(id.index())
    }

    #[inline]
    pub fn patient_mut(&mut self, id: PatientId) -> Option<&mut Patient> {
        self.patients.get_mut(id.index())
    }

    #[inline]
    pub fn provider(&self, id: ProviderId) -> Option<&Provider> {
        self.providers.get(id.index())
    }

    #[inline]
    pub fn provider_mut(&mut self, id: ProviderId) -> Option<&mut Provider> {
        self.providers.get_mut(id.index())
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Patients not yet in a terminal state.
    pub fn live_patients(&self) -> impl Iterator<Item = &Patient> + '_ {
        self.patients.iter().filter(|p| !p.is_terminal())
    }

    pub fn patients_in(&self, state: PatientState) -> impl Iterator<Item = &Patient> + '_ {
        self.patients.iter().filter(move |p| p.state == state)
    }

    /// The provider currently paired with `patient`, if any.
    pub fn provider_of(&self, patient: PatientId) -> Option<&Provider> {
        self.providers.iter().find(|p| p.current_patient == Some(patient))
    }
}
