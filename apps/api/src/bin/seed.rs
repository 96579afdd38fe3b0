use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_ats::config::SeedConfig;
use resume_ats::db::create_pool;
use resume_ats::seed::seed_dummy_data;

#[tokio::main]
async fn main() -> Result<()> {
    let config = SeedConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = create_pool(&config.database_url).await?;
    let mut rng = rand::rng();
    let inserted = seed_dummy_data(&pool, config.count, &mut rng).await?;

    info!("Seeded {inserted} rows into {}", config.database_url);
    Ok(())
}
