//! Provider working hours.

/// A daily working window `[start_hour, end_hour)` in hours of day.
///
/// When `end_hour <= start_hour` the shift wraps past midnight
/// (e.g. 22–6).  `start_hour == end_hour` means the provider never works.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub start_hour: u32,
    pub end_hour:   u32,
}

impl Shift {
    /// The default day shift, 08:00–17:00.
    pub const DAY: Shift = Shift { start_hour: 8, end_hour: 17 };

    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self { start_hour, end_hour }
    }

    /// `true` if `hour` (0–23) falls inside the shift.
    #[inline]
    pub fn on_shift(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            self.start_hour <= hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    /// Shift length in hours.
    pub fn hours(&self) -> u32 {
        if self.start_hour <= self.end_hour {
            self.end_hour - self.start_hour
        } else {
            24 - self.start_hour + self.end_hour
        }
    }
}

impl Default for Shift {
    fn default() -> Self {
        Self::DAY
    }
}
