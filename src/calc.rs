use serde::Serialize;

use crate::store::{AttendanceRecord, Status};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubjectStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub percent: u32,
}

/// Round-half-up to the nearest integer, matching `Math.round`.
fn round_half_up(x: f64) -> u32 {
    (x + 0.5).floor() as u32
}

/// Reduce a record set to display statistics for one subject.
///
/// `abandoned` marks count toward `total` but neither `present` nor `absent`,
/// so they pull the percentage down. Pure; never touches storage.
pub fn compute_stats(records: &[AttendanceRecord], subject_id: &str) -> SubjectStats {
    let mut total = 0usize;
    let mut present = 0usize;
    let mut absent = 0usize;

    for r in records.iter().filter(|r| r.subject_id == subject_id) {
        total += 1;
        match r.status {
            Status::Present => present += 1,
            Status::Absent => absent += 1,
            Status::Abandoned => {}
        }
    }

    let percent = if total > 0 {
        round_half_up(100.0 * present as f64 / total as f64)
    } else {
        0
    };

    SubjectStats {
        total,
        present,
        absent,
        percent,
    }
}

/// Status of the unique record for `(subject_id, date)`, or `None` when no
/// mark exists. `None` is not the same thing as `Absent`.
pub fn status_for_date(
    records: &[AttendanceRecord],
    subject_id: &str,
    date: &str,
) -> Option<Status> {
    records
        .iter()
        .find(|r| r.subject_id == subject_id && r.date == date)
        .map(|r| r.status)
}
