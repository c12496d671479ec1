use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::calc;
use crate::http::error::ApiError;
use crate::http::types::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    subject: String,
    month: String,
}

/// CSV of one subject-month: a `date,status` header, then one row per day of
/// the month with an empty status cell for unrecorded days.
pub async fn csv(
    state: web::Data<AppState>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, ApiError> {
    let dates = store::month_dates(&query.month)?;
    let records = {
        let conn = state.db()?;
        store::query_by_month(&conn, Some(query.month.as_str()))?
    };

    let mut out = String::from("date,status\n");
    for date in &dates {
        out.push_str(date);
        out.push(',');
        if let Some(status) = calc::status_for_date(&records, &query.subject, date) {
            out.push_str(status.as_str());
        }
        out.push('\n');
    }

    let filename = format!("{}_{}.csv", query.subject, query.month);
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(out))
}
