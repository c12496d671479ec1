pub mod error;
pub mod handlers;
pub mod types;

use actix_web::web;

pub use types::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/attendance")
            .route(web::get().to(handlers::attendance::list))
            .route(web::post().to(handlers::attendance::upsert)),
    )
    .service(web::resource("/attendance/fill").route(web::post().to(handlers::attendance::fill)))
    .service(web::resource("/attendance/stats").route(web::get().to(handlers::attendance::stats)))
    .service(web::resource("/attendance/export").route(web::get().to(handlers::export::csv)))
    .service(web::resource("/subjects").route(web::get().to(handlers::subjects::list)));
}
