use std::sync::Arc;

use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use listing_service::app::AppContext;
use listing_service::config::Config;
use listing_service::repository::mongo::Collections;
use listing_service::workers::{self, LogDelivery};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,listing_service=debug")
        }))
        .init();

    info!("🔧 Starting listing-service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "✅ Configuration loaded: env={}, database={}",
        config.app.env, config.mongo.database
    );

    // Connect to MongoDB and verify the server is reachable
    let client = Client::with_uri_str(&config.mongo.uri)
        .await
        .context("Failed to connect to MongoDB")?;
    let db = client.database(&config.mongo.database);
    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB ping failed")?;
    info!("✅ MongoDB connection established");

    // Unique indexes backing the engagement invariants
    Collections::new(&db)
        .ensure_indexes()
        .await
        .context("Failed to create indexes")?;
    info!("✅ Indexes ensured");

    // Wire services and start the delivery worker. The context owns the
    // sending half of the delivery channel; dropping it lets the worker
    // drain and exit.
    let (context, rx) = AppContext::new(&config, &db);
    let delivery = tokio::spawn(workers::run(rx, Arc::new(LogDelivery)));
    info!("✅ Delivery worker started");

    shutdown_signal().await;
    info!("Shutdown signal received, stopping listing-service");

    drop(context);
    delivery.await.context("Delivery worker panicked")?;
    Ok(())
}
