use actix_web::{web, HttpResponse};

use crate::http::types::AppState;

/// The configured subject catalog, in its configured order.
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.catalog)
}
