use actix_web::{middleware, web, App, HttpServer};

use attendanced::config::{load_catalog, AppConfig};
use attendanced::db;
use attendanced::http::{self, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env()?;
    let catalog = load_catalog(config.subjects_path.as_deref())?;
    let conn = db::open_db(&config.data_dir)?;
    let state = web::Data::new(AppState::new(conn, catalog));

    log::info!(
        "attendanced listening on http://{}:{} ({} subjects)",
        config.host,
        config.port,
        state.catalog.len()
    );
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(http::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
