//! Label reconciliation binary.
//!
//! One-shot run: fetch the workspace, plan, apply, report. Exits
//! non-zero on startup-fatal conditions (missing token, bad mapping)
//! and on fetch-phase retry exhaustion; per-issue failures are logged
//! and counted only.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use label_sync::config::{Config, ResolverMode};
use label_sync::rules::{LabelRequirementResolver, MappingResolver, StaticRangeResolver};
use label_sync::{LinearClient, SyncEngine};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("label_sync=info".parse()?))
        .init();

    info!("Starting label reconciliation run...");

    // Load configuration
    let config = Config::default();

    let token = config
        .api_token
        .as_deref()
        .context("LINEAR_API_TOKEN must be set")?;

    let client = match &config.api_url {
        Some(url) => LinearClient::with_url(token, url)?,
        None => LinearClient::new(token)?,
    };

    let resolver: Box<dyn LabelRequirementResolver + Send + Sync> = match config.mode {
        ResolverMode::Static => {
            info!("Using static numeric-range inference");
            Box::new(StaticRangeResolver)
        }
        ResolverMode::Mapping => {
            let path = config
                .mapping_path
                .as_deref()
                .context("LABEL_SYNC_MAPPING_PATH must be set in mapping mode")?;
            let resolver = MappingResolver::from_path(path)?;
            info!(projects = resolver.len(), "Loaded project mapping");
            Box::new(resolver)
        }
    };

    let engine = SyncEngine::new(client, resolver, config.retry);
    let report = engine.run().await.context("Reconciliation run failed")?;

    info!(
        issues = report.issues_seen,
        planned = report.planned,
        updated = report.updated,
        failed = report.failed,
        "Run finished"
    );

    Ok(())
}
