use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cagefetch_core::{
    config_path_from_env, load_config, validate_config, DownloadOrchestrator, EventDiscovery,
    EventStore, HttpMagnetResolver, JsonEventStore, MagnetResolver, Notifier, ProcessReport,
    ProwlarrSearcher, PushoverNotifier, QBittorrentClient, SanitizedConfig, Searcher,
    SegmentOutcome, SherdogDiscovery, TorrentClient,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = config_path_from_env();
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = SanitizedConfig::from(&config);
    info!(
        config = %serde_json::to_string(&sanitized).unwrap_or_default(),
        "Configuration loaded"
    );

    let store: Arc<dyn EventStore> = Arc::new(JsonEventStore::new(&config.data_file));
    let searcher: Arc<dyn Searcher> = Arc::new(
        ProwlarrSearcher::new(config.prowlarr.clone()).context("Failed to create indexer client")?,
    );
    let resolver: Arc<dyn MagnetResolver> = Arc::new(
        HttpMagnetResolver::with_timeout(Duration::from_secs(config.prowlarr.timeout_secs as u64))
            .context("Failed to create magnet resolver")?,
    );
    let torrent_client: Arc<dyn TorrentClient> = Arc::new(
        QBittorrentClient::new(config.qbittorrent.clone())
            .context("Failed to create qBittorrent client")?,
    );
    let notifier: Arc<dyn Notifier> = Arc::new(
        PushoverNotifier::new(config.pushover.clone()).context("Failed to create notifier")?,
    );

    let discovery =
        SherdogDiscovery::new(config.discovery.clone()).context("Failed to create discovery")?;
    let events = discovery
        .discover()
        .await
        .context("Failed to discover events")?;

    let orchestrator = DownloadOrchestrator::new(
        config.download.clone(),
        store,
        searcher,
        resolver,
        torrent_client,
        notifier,
    );

    let reports = orchestrator
        .process_discovered(events)
        .await
        .context("Failed to process events")?;

    for report in &reports {
        log_report(report);
    }

    Ok(())
}

fn log_report(report: &ProcessReport) {
    debug!(
        report = %serde_json::to_string(report).unwrap_or_default(),
        "Event report"
    );

    if report.skipped {
        info!(event = %report.event.name, "Event already complete");
        return;
    }

    for segment in &report.segments {
        match &segment.outcome {
            SegmentOutcome::Submitted { title, notified, .. } => info!(
                event = %report.event.name,
                segment = %segment.segment,
                title = %title,
                notified,
                "Submitted"
            ),
            SegmentOutcome::QueryFailed { error } | SegmentOutcome::SubmissionFailed { error } => {
                warn!(
                    event = %report.event.name,
                    segment = %segment.segment,
                    outcome = segment.outcome.as_str(),
                    error = %error,
                    "Segment not downloaded"
                )
            }
            outcome => info!(
                event = %report.event.name,
                segment = %segment.segment,
                outcome = outcome.as_str(),
                "Segment unchanged"
            ),
        }
    }
}
