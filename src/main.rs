use restate_data::config::AppConfig;
use restate_data::seed::SeedPipeline;
use restate_data::store::RestStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    restate_data::init_logging()?;

    let config = AppConfig::load()?;
    log::info!("Configuration loaded: endpoint={}", config.store.endpoint);

    // Fail on missing identifiers before any request goes out
    let collections = config.collection_ids()?;
    let store = Arc::new(RestStore::new(&config.store)?);

    let pipeline = SeedPipeline::new(store, collections).with_plan(config.seed.plan());
    let report = match config.seed.rng_seed {
        Some(seed) => {
            log::info!("Using fixed random seed {}", seed);
            pipeline.with_seed(seed).run().await
        }
        None => {
            let mut pipeline = pipeline;
            pipeline.run().await
        }
    };

    match report {
        Ok(report) => {
            log::info!(
                "Seeded {} agents, {} reviews, {} galleries and {} properties ({} documents cleared)",
                report.agents.len(),
                report.reviews.len(),
                report.galleries.len(),
                report.properties.len(),
                report.cleared
            );
            Ok(())
        }
        Err(err) => {
            log::error!("Error seeding data: {}", err);
            Err(err.into())
        }
    }
}
