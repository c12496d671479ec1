use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::calc;
use crate::http::error::{missing_fields, ApiError};
use crate::http::types::AppState;
use crate::store::{self, NewMark};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    month: Option<String>,
}

fn month_param(month: Option<&str>) -> Option<&str> {
    // An empty `month=` means "all records", same as leaving it off.
    month.map(str::trim).filter(|m| !m.is_empty())
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let conn = state.db()?;
    let records = store::query_by_month(&conn, month_param(query.month.as_deref()))?;
    Ok(HttpResponse::Ok().json(records))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkBody {
    subject_id: Option<String>,
    subject_name: Option<String>,
    date: Option<String>,
    status: Option<String>,
}

fn required(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing_fields()),
    }
}

pub async fn upsert(
    state: web::Data<AppState>,
    body: web::Json<MarkBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let mark = NewMark {
        subject_id: required(body.subject_id)?,
        subject_name: required(body.subject_name)?,
        date: required(body.date)?,
        status: required(body.status)?,
    };

    let conn = state.db()?;
    let outcome = store::upsert_mark(&conn, &mark)?;
    log::debug!(
        "{} mark {} {} -> {}",
        if outcome.created { "created" } else { "updated" },
        mark.subject_id,
        mark.date,
        outcome.record.status.as_str()
    );
    if outcome.created {
        Ok(HttpResponse::Created().json(outcome.record))
    } else {
        Ok(HttpResponse::Ok().json(outcome.record))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBody {
    subject_id: Option<String>,
    subject_name: Option<String>,
    month: Option<String>,
    status: Option<String>,
}

/// Bulk "fill empties": create a mark for every day of the month the subject
/// has none, defaulting to absent.
pub async fn fill(
    state: web::Data<AppState>,
    body: web::Json<FillBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let subject_id = required(body.subject_id)?;
    let subject_name = required(body.subject_name)?;
    let month = required(body.month)?;
    let status = body.status.unwrap_or_else(|| "absent".to_string());

    let conn = state.db()?;
    let outcome = store::fill_missing_days(&conn, &subject_id, &subject_name, &month, &status)?;
    log::info!(
        "filled {} days for {} in {} ({} already marked)",
        outcome.created,
        subject_id,
        month,
        outcome.skipped
    );
    Ok(HttpResponse::Ok().json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    subject: String,
    month: Option<String>,
}

/// Monthly stats when `month` is given, cumulative otherwise.
pub async fn stats(
    state: web::Data<AppState>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, ApiError> {
    let conn = state.db()?;
    let records = store::query_by_month(&conn, month_param(query.month.as_deref()))?;
    let stats = calc::compute_stats(&records, &query.subject);
    Ok(HttpResponse::Ok().json(stats))
}
