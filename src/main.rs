use anyhow::Result;
use postales_del_vinedo::config::Config;
use postales_del_vinedo::i18n::{Catalog, CatalogValidator, Language};
use postales_del_vinedo::server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("postales_del_vinedo=info".parse()?),
        )
        .init();

    info!("Starting Postales del Viñedo API");

    let config = Config::from_env()?;

    // Gaps in the English copy fall back to Spanish; surface them once at boot.
    let report = CatalogValidator::validate(Catalog::global(), Language::ENGLISH);
    for error in &report.errors {
        warn!("Catalog error: {}", error);
    }
    info!(
        "English catalog: {} errors, {} keys covered by fallback or extra",
        report.errors.len(),
        report.warnings.len()
    );

    server::run(config).await
}
