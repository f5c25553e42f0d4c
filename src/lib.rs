pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod logging;
pub mod page;
pub mod render;
pub mod server;

#[cfg(test)]
mod testing;

use actix_web::{web, App, HttpServer};
use anyhow::Context;

pub async fn run() -> anyhow::Result<()> {
    let settings = crate::config::Settings::load().context("Failed to load configuration")?;
    logging::init_logging(&settings.log_level)?;

    if settings.database_url.is_none() {
        tracing::warn!("DATABASE_URL is not set; every page will report it");
    }
    if settings.unsafe_demo_enabled() {
        tracing::warn!("ALLOW_UNSAFE_DEMO=1: the SQL injection demo is reachable");
    }

    let bind = settings.bind_address();
    tracing::info!("Starting pgpeek on {}", bind);

    let state = web::Data::new(server::AppState::new(settings, db::PgConnector));
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(server::routes::<db::PgConnector>)
    })
    .bind(&bind)
    .with_context(|| format!("Failed to bind {}", bind))?
    .run()
    .await?;

    Ok(())
}
