//! Read-only snapshot handed to the detectors.

use vf_agent::{Patient, Provider};
use vf_core::{PatientId, Tick};

/// Everything a detection pass may look at.
///
/// `patients` is the full id-indexed store, retired patients included, so
/// social links and waiting-room ids resolve.  Detectors that work on the
/// *live* population go through [`Census::live_patients`].
#[derive(Clone, Copy)]
pub struct Census<'a> {
    pub tick:         Tick,
    pub patients:     &'a [Patient],
    pub providers:    &'a [Provider],
    pub waiting_room: &'a [PatientId],
    pub vr_stations:  u32,
    pub vr_sessions_completed: u64,
    /// Average wait from the latest metrics snapshot.
    pub current_average_wait: f64,
}

impl<'a> Census<'a> {
    pub fn live_patients(&self) -> impl Iterator<Item = &'a Patient> + 'a {
        self.patients.iter().filter(|p| !p.is_terminal())
    }

    #[inline]
    pub fn patient(&self, id: PatientId) -> Option<&'a Patient> {
        self.patients.get(id.index())
    }

    pub fn waiting_patients(&self) -> impl Iterator<Item = &'a Patient> + 'a {
        let patients = self.patients;
        self.waiting_room.iter().filter_map(move |id| patients.get(id.index()))
    }
}
