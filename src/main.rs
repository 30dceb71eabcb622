use coupon_desk::{
    config::{catalog, settings::Settings},
    core::{export, ledger::format_status_summary},
    errors::Result,
};
use dotenvy::dotenv;
use std::{fs::File, io};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Load .env file (non-fatal, env vars can be set externally)
    let dotenv_loaded = dotenv().is_ok();

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    info!(dotenv_loaded, "Attempted to load .env file.");

    // 3. Load runtime settings
    let settings = Settings::from_env().inspect_err(|e| error!("Invalid settings: {}", e))?;
    let today = settings.reference_date();

    // 4. Seed the ledger from the coupon catalog
    let ledger = catalog::load_catalog(&settings.catalog_path)
        .and_then(catalog::Catalog::into_ledger)
        .inspect_err(|e| error!("Failed to load coupon catalog: {}", e))?;

    // 5. Report statuses as of the reference date
    let summary = ledger.status_summary(today);
    info!("{}", format_status_summary(&summary, today));

    // 6. Export the catalog as CSV
    let rows = match &settings.export_path {
        Some(path) => {
            let file = File::create(path)
                .inspect_err(|e| error!("Cannot create export file {}: {}", path.display(), e))?;
            export::export_ledger(&ledger, today, file)?
        }
        None => export::export_ledger(&ledger, today, io::stdout().lock())?,
    };
    info!(rows, "Coupon export finished.");

    Ok(())
}
