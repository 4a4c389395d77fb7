use std::sync::Arc;

use lead_intake_api::config::Config;
use lead_intake_api::db::Database;
use lead_intake_api::handlers::{self, AppState};
use lead_intake_api::mailer::SmtpMailer;
use lead_intake_api::store::{LeadStore, PgLeadStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes logging, loads configuration, builds the SMTP mailer and the
/// optional lead store, then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_intake_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let mailer = SmtpMailer::new(&config.mail)
        .map_err(|e| anyhow::anyhow!("Failed to initialize SMTP mailer: {}", e))?;

    // Persistence is only wired up when a database is configured
    let store: Option<Arc<dyn LeadStore>> = match &config.database_url {
        Some(url) => {
            let db = Database::new(url).await?;
            tracing::info!("Database connection pool established");
            Some(Arc::new(PgLeadStore::new(db.pool)))
        }
        None => {
            tracing::info!("No DATABASE_URL set, leads will not be stored");
            None
        }
    };

    let app_state = Arc::new(AppState {
        config: config.clone(),
        mailer: Arc::new(mailer),
        store,
    });

    let app = handlers::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
