use cart_buddy::{
    bot,
    config::{database, shop},
    core::{
        product::RandomQuota,
        session::Session,
        source::{HttpProductSource, load_catalog},
        storage::DatabaseStorage,
    },
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load shop configuration
    let config = shop::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Configuration loaded.");

    // 4. Open the database that backs cart storage
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Fetch the catalog once; failures leave it empty
    let source = HttpProductSource::new(&config.catalog.source_url, config.catalog.limit);
    let mut quotas = RandomQuota::new(rand::thread_rng(), config.catalog.quota_range());
    let catalog = load_catalog(&source, &mut quotas).await;

    // 6. Restore the stored cart and reconcile it against the new catalog
    let session = Session::start(
        catalog,
        Box::new(DatabaseStorage::new(db)),
        config.cart.storage_key.clone(),
        config.cart.allowance,
    )
    .await?;

    // 7. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, session).await.map_err(Error::from)?;

    Ok(())
}
