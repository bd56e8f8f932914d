use futures::future::join_all;
use pricesense::analyzer::{Analyzer, PricingEngine};
use pricesense::config::{load_config, AppConfig};
use pricesense::model::{EndorsementIntensity, StorageError};
use pricesense::storage::SqliteStore;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    info!("🚀 PriceSense starting...");

    // Load configuration from file
    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    // Initialize storage (SQLite) with async access (wrapped in a Mutex)
    let storage = match SqliteStore::new(&config.database_path) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            error!("Failed to initialize storage: {:?}", e);
            return;
        }
    };

    // Seed a demo campaign on first run so there is something to report on
    if config.seed_demo_data {
        if let Err(e) = seed_demo_data(&storage).await {
            warn!("Demo seeding failed: {:?}", e);
        }
    }

    // Which campaigns to report on: the configured ids, or every campaign
    // in the database when none are configured
    let campaign_ids: Vec<i64> = if config.campaign_ids.is_empty() {
        match storage.lock().await.list_campaigns() {
            Ok(campaigns) => campaigns.iter().map(|c| c.id).collect(),
            Err(e) => {
                error!("Failed to list campaigns: {:?}", e);
                return;
            }
        }
    } else {
        config.campaign_ids.clone()
    };

    info!("Campaigns to analyze: {}", campaign_ids.len());

    let engine = PricingEngine::new(storage.clone());

    // Analyze all campaigns concurrently
    let tasks: Vec<_> = campaign_ids
        .iter()
        .map(|&campaign_id| report_campaign(&engine, storage.clone(), campaign_id))
        .collect();
    join_all(tasks).await;

    info!("All campaign reports finished.");
}

/// Analyzes a single campaign and logs the headline figures plus the full
/// JSON report.
async fn report_campaign(
    engine: &PricingEngine<Arc<Mutex<SqliteStore>>>,
    storage: Arc<Mutex<SqliteStore>>,
    campaign_id: i64,
) {
    let title = {
        let storage_guard = storage.lock().await;
        match storage_guard.get_campaign(campaign_id) {
            Ok(Some(campaign)) => campaign.title,
            Ok(None) => {
                warn!("Campaign {} not found, skipping", campaign_id);
                return;
            }
            Err(e) => {
                warn!("Campaign lookup failed: {:?}", e);
                return;
            }
        }
    };

    info!("Analyzing campaign {}: {}", campaign_id, title);

    let report = match engine.analyze_campaign(campaign_id).await {
        Ok(report) => report,
        Err(e) => {
            warn!("Analysis failed for campaign {}: {:?}", campaign_id, e);
            return;
        }
    };

    if report.total_responses == 0 {
        info!("Campaign {}: no priced pledges yet.", campaign_id);
        return;
    }

    info!(
        "Campaign {}: {} responses | avg ${:.2} | median ${:.2} | optimal ${:.2} (revenue ${:.2})",
        campaign_id,
        report.total_responses,
        report.average_price,
        report.median_price,
        report.optimal_price,
        report.max_revenue
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => info!("Full report for campaign {}:\n{}", campaign_id, json),
        Err(e) => warn!("Report serialization failed: {:?}", e),
    }
}

/// Seeds one demo campaign with randomized pledges so a fresh database
/// produces a meaningful report. Does nothing if any campaign already exists.
async fn seed_demo_data(storage: &Arc<Mutex<SqliteStore>>) -> Result<(), StorageError> {
    let storage_guard = storage.lock().await;

    if !storage_guard.list_campaigns()?.is_empty() {
        return Ok(());
    }

    info!("Empty database, seeding demo campaign...");
    let campaign_id = storage_guard.create_campaign("Modular Travel Keyboard")?;

    let mut rng = rand::rng();
    for n in 1..=40 {
        let user_id = format!("user-{:03}", n);

        // Roughly one in five supporters pledges without naming a price
        let price_ceiling = if rng.random_range(0..5) == 0 {
            None
        } else {
            Some((rng.random_range(5.0..180.0) * 100.0_f64).round() / 100.0)
        };
        storage_guard.record_pledge(campaign_id, &user_id, price_ceiling)?;

        // Most, but not all, supporters also tag how badly they want it
        if rng.random_range(0..4) > 0 {
            let intensity = match rng.random_range(0..3) {
                0 => EndorsementIntensity::NeatIdea,
                1 => EndorsementIntensity::ProbablyBuy,
                _ => EndorsementIntensity::TakeMyMoney,
            };
            storage_guard.record_endorsement(campaign_id, &user_id, intensity)?;
        }
    }

    let total = storage_guard.count_pledges(campaign_id)?;
    info!("Seeded demo campaign {} with {} pledges", campaign_id, total);
    Ok(())
}
