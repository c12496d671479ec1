use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Present,
    Absent,
    Abandoned,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Present => "present",
            Status::Absent => "absent",
            Status::Abandoned => "abandoned",
        }
    }

    pub fn parse(raw: &str) -> Option<Status> {
        match raw {
            "present" => Some(Status::Present),
            "absent" => Some(Status::Absent),
            "abandoned" => Some(Status::Abandoned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub date: String,
    pub status: Status,
    pub created_at: String,
}

/// One (subject, date, status) assertion as submitted by a caller.
/// Raw strings on purpose: validation happens here, not at the deserializer.
#[derive(Debug, Clone)]
pub struct NewMark {
    pub subject_id: String,
    pub subject_name: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug)]
pub enum StoreError {
    Validation(String),
    Storage(String),
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation(message) => f.write_str(message),
            StoreError::Storage(message) => write!(f, "storage error: {}", message),
            StoreError::NotFound(what) => write!(f, "{} not found", what),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> StoreError {
        StoreError::Storage(e.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    pub record: AttendanceRecord,
    pub created: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillOutcome {
    pub created: usize,
    pub skipped: usize,
}

fn record_from_row(r: &rusqlite::Row) -> rusqlite::Result<AttendanceRecord> {
    let status_raw: String = r.get(4)?;
    let status = Status::parse(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown status: {}", status_raw).into(),
        )
    })?;
    Ok(AttendanceRecord {
        id: r.get(0)?,
        subject_id: r.get(1)?,
        subject_name: r.get(2)?,
        date: r.get(3)?,
        status,
        created_at: r.get(5)?,
    })
}

fn validate_date(date: &str) -> Result<(), StoreError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| StoreError::Validation("date must be YYYY-MM-DD".to_string()))?;
    // chrono accepts unpadded components; the stored form must be the exact
    // 10-char shape or month-prefix queries would miss it.
    if parsed.format("%Y-%m-%d").to_string() != date {
        return Err(StoreError::Validation("date must be YYYY-MM-DD".to_string()));
    }
    Ok(())
}

fn validate_mark(mark: &NewMark) -> Result<Status, StoreError> {
    if mark.subject_id.trim().is_empty() {
        return Err(StoreError::Validation("missing subjectId".to_string()));
    }
    if mark.subject_name.trim().is_empty() {
        return Err(StoreError::Validation("missing subjectName".to_string()));
    }
    if mark.date.trim().is_empty() {
        return Err(StoreError::Validation("missing date".to_string()));
    }
    if mark.status.trim().is_empty() {
        return Err(StoreError::Validation("missing status".to_string()));
    }
    validate_date(&mark.date)?;
    Status::parse(&mark.status)
        .ok_or_else(|| StoreError::Validation(format!("unknown status: {}", mark.status)))
}

fn parse_month_key(ym: &str) -> Result<(i32, u32), StoreError> {
    let Some((y, m)) = ym.split_once('-') else {
        return Err(StoreError::Validation("month must be YYYY-MM".to_string()));
    };
    if y.len() != 4 || m.len() != 2 {
        return Err(StoreError::Validation("month must be YYYY-MM".to_string()));
    }
    let year = y
        .parse::<i32>()
        .map_err(|_| StoreError::Validation("month year must be numeric".to_string()))?;
    let month = m
        .parse::<u32>()
        .map_err(|_| StoreError::Validation("month must be YYYY-MM".to_string()))?;
    if !(1..=12).contains(&month) {
        return Err(StoreError::Validation(
            "month must be between 01 and 12".to_string(),
        ));
    }
    Ok((year, month))
}

fn days_in_month(year: i32, month: u32) -> usize {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => 30,
    }
}

/// Every date of a `YYYY-MM` month, in calendar order, in the stored shape.
pub fn month_dates(ym: &str) -> Result<Vec<String>, StoreError> {
    let (year, month) = parse_month_key(ym)?;
    let days = days_in_month(year, month);
    Ok((1..=days)
        .map(|day| format!("{:04}-{:02}-{:02}", year, month, day))
        .collect())
}

pub fn find_mark(
    conn: &Connection,
    subject_id: &str,
    date: &str,
) -> Result<AttendanceRecord, StoreError> {
    conn.query_row(
        "SELECT id, subject_id, subject_name, date, status, created_at
         FROM attendance_records
         WHERE subject_id = ? AND date = ?",
        (subject_id, date),
        record_from_row,
    )
    .optional()?
    .ok_or_else(|| StoreError::NotFound(format!("mark for {} on {}", subject_id, date)))
}

/// Create or overwrite the single record for `(subject_id, date)`.
///
/// The unique index on the pair is the durable guarantee; the transaction only
/// ties the existence check to the write so `created` matches what happened.
pub fn upsert_mark(conn: &Connection, mark: &NewMark) -> Result<UpsertOutcome, StoreError> {
    let status = validate_mark(mark)?;

    let tx = conn.unchecked_transaction()?;
    let created = match find_mark(&tx, &mark.subject_id, &mark.date) {
        Ok(existing) => {
            tx.execute(
                "UPDATE attendance_records SET status = ?, subject_name = ? WHERE id = ?",
                (status.as_str(), &mark.subject_name, &existing.id),
            )?;
            false
        }
        Err(StoreError::NotFound(_)) => {
            tx.execute(
                "INSERT INTO attendance_records(id, subject_id, subject_name, date, status, created_at)
                 VALUES(?, ?, ?, ?, ?, ?)
                 ON CONFLICT(subject_id, date) DO UPDATE SET
                   status = excluded.status,
                   subject_name = excluded.subject_name",
                (
                    Uuid::new_v4().to_string(),
                    &mark.subject_id,
                    &mark.subject_name,
                    &mark.date,
                    status.as_str(),
                    Utc::now().to_rfc3339(),
                ),
            )?;
            true
        }
        Err(e) => return Err(e),
    };
    let record = find_mark(&tx, &mark.subject_id, &mark.date)?;
    tx.commit()?;

    Ok(UpsertOutcome { record, created })
}

/// Records whose date falls in the given `YYYY-MM` month; all records when
/// no month is given. No ordering guarantee.
pub fn query_by_month(
    conn: &Connection,
    month: Option<&str>,
) -> Result<Vec<AttendanceRecord>, StoreError> {
    let Some(ym) = month else {
        return query_all(conn);
    };
    parse_month_key(ym)?;
    let mut stmt = conn.prepare(
        "SELECT id, subject_id, subject_name, date, status, created_at
         FROM attendance_records
         WHERE date LIKE ?",
    )?;
    let records = stmt
        .query_map([format!("{}-%", ym)], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn query_all(conn: &Connection) -> Result<Vec<AttendanceRecord>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, subject_id, subject_name, date, status, created_at
         FROM attendance_records",
    )?;
    let records = stmt
        .query_map([], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Batch form of "fill empties": one insert per day of the month that has no
/// record for the subject yet. Existing marks are never touched.
pub fn fill_missing_days(
    conn: &Connection,
    subject_id: &str,
    subject_name: &str,
    ym: &str,
    status: &str,
) -> Result<FillOutcome, StoreError> {
    if subject_id.trim().is_empty() {
        return Err(StoreError::Validation("missing subjectId".to_string()));
    }
    if subject_name.trim().is_empty() {
        return Err(StoreError::Validation("missing subjectName".to_string()));
    }
    let status = Status::parse(status)
        .ok_or_else(|| StoreError::Validation(format!("unknown status: {}", status)))?;
    let dates = month_dates(ym)?;

    let tx = conn.unchecked_transaction()?;
    let mut created = 0usize;
    let mut skipped = 0usize;
    for date in &dates {
        let changed = tx.execute(
            "INSERT INTO attendance_records(id, subject_id, subject_name, date, status, created_at)
             VALUES(?, ?, ?, ?, ?, ?)
             ON CONFLICT(subject_id, date) DO NOTHING",
            (
                Uuid::new_v4().to_string(),
                subject_id,
                subject_name,
                date,
                status.as_str(),
                Utc::now().to_rfc3339(),
            ),
        )?;
        if changed == 1 {
            created += 1;
        } else {
            skipped += 1;
        }
    }
    tx.commit()?;

    Ok(FillOutcome { created, skipped })
}
