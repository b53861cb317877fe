//! Kassabok importer
//!
//! Reads manually entered verifications from JSON files and files them for the
//! configured user.

mod import;

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kassabok_core::fiscal::FiscalYear;
use kassabok_core::ledger::VerificationService;
use kassabok_db::{
    MemoryFiscalYearStore, MemoryUserDirectory, MemoryVerificationStore, StaticExchangeRates,
};
use kassabok_shared::AppConfig;
use kassabok_shared::types::{CurrencyCode, Id};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kassabok=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        anyhow::bail!("usage: kassabok-import <file.json>...");
    }

    let mut verifications = Vec::new();
    for path in &paths {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {path}"))?;
        let parsed = import::parse(&contents).with_context(|| format!("in {path}"))?;
        info!(path = %path, count = parsed.len(), "Read import file");
        verifications.extend(parsed);
    }

    let user_id = Id::from(config.importer.user_id.clone());
    let local: CurrencyCode = config
        .importer
        .local_currency
        .parse()
        .context("invalid local currency")?;

    let users = Arc::new(MemoryUserDirectory::new());
    users.insert(user_id.clone(), local.as_str()).await;

    let rates = StaticExchangeRates::from_config(local, &config.importer.exchange_rates, NaiveDate::MIN)
        .context("invalid exchange rates")?;

    let service = VerificationService::new(
        Arc::new(MemoryVerificationStore::new()),
        seed_fiscal_years(&user_id, &import::years(&verifications)).await?,
        Arc::new(rates),
        users,
    )
    .with_config(&config);

    let summary = import::run(&service, &user_id, verifications).await;
    info!(
        created = summary.created,
        duplicates = summary.duplicates,
        rejected = summary.rejected,
        "Import finished"
    );

    Ok(())
}

/// One calendar-year fiscal year per year the import touches.
async fn seed_fiscal_years(
    user_id: &Id,
    years: &std::collections::BTreeSet<i32>,
) -> anyhow::Result<Arc<MemoryFiscalYearStore>> {
    let store = MemoryFiscalYearStore::new();
    let ctx = kassabok_core::ValidationContext::current();
    for &year in years {
        let fiscal_year = FiscalYear::calendar_year(Id::generate(), user_id.clone(), year)
            .with_context(|| format!("unsupported year {year}"))?;
        store.insert(fiscal_year, &ctx).await?;
    }
    Ok(Arc::new(store))
}
