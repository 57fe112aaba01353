//! CSV shift loader.
//!
//! # CSV format
//!
//! One row per provider whose hours differ from the default day shift.
//!
//! ```csv
//! provider_id,shift_start,shift_end
//! 0,8,17
//! 1,22,6
//! 4,12,20
//! ```
//!
//! Hours are 0–23 (`shift_end` may be 24).  Providers absent from the CSV
//! receive [`Shift::DAY`].  Rows naming a provider beyond `provider_count`
//! are rejected rather than silently dropped.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{ScheduleError, Shift};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ShiftRecord {
    provider_id: u32,
    shift_start: u32,
    shift_end:   u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-provider shifts from a CSV file.
///
/// Returns a `Vec` of length `provider_count`, indexed by `ProviderId`.
pub fn load_shifts_csv(path: &Path, provider_count: usize) -> Result<Vec<Shift>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_shifts_reader(file, provider_count)
}

/// Like [`load_shifts_csv`] but accepts any `Read` source.
pub fn load_shifts_reader<R: Read>(
    reader: R,
    provider_count: usize,
) -> Result<Vec<Shift>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut shifts = vec![Shift::DAY; provider_count];

    for result in csv_reader.deserialize::<ShiftRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let idx = row.provider_id as usize;
        if idx >= provider_count {
            return Err(ScheduleError::InvalidShift {
                provider: row.provider_id,
                reason:   format!("only {provider_count} providers exist"),
            });
        }
        if row.shift_start > 23 || row.shift_end > 24 {
            return Err(ScheduleError::InvalidShift {
                provider: row.provider_id,
                reason:   format!("hours {}–{} out of range", row.shift_start, row.shift_end),
            });
        }
        shifts[idx] = Shift::new(row.shift_start, row.shift_end);
    }

    Ok(shifts)
}
