pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::interfaces::clock::SystemClock;
use crate::application::usecases::expiration_sweep::{ExpirationSweepUseCase, run_sweep_loop};
use crate::infrastructure::postgres::{
    postgres_connection, repositories::subscriptions::SubscriptionPostgres,
};

pub async fn run() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");
    let db_pool = Arc::new(postgres_pool);

    let sweep_usecase = Arc::new(ExpirationSweepUseCase::new(
        Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool))),
        Arc::new(SystemClock),
    ));
    let sweep_interval = Duration::from_secs(dotenvy_env.sweeper.interval_hours * 60 * 60);
    let sweeper = tokio::spawn(run_sweep_loop(sweep_usecase, sweep_interval));
    info!(
        interval_hours = dotenvy_env.sweeper.interval_hours,
        "Expiration sweeper has been started"
    );

    infrastructure::axum_http::http_serve::start(Arc::new(dotenvy_env), Arc::clone(&db_pool))
        .await?;

    // The serve loop only returns on shutdown; take the sweeper down with it.
    sweeper.abort();

    Ok(())
}
