//! Shared fixtures for the pricing analysis integration tests.
//!
//! Provides an in-memory SQLite store and a seeding helper that writes
//! pledges and endorsements through the same public API the binary uses.

use pricesense::model::EndorsementIntensity;
use pricesense::storage::SqliteStore;

/// Fresh in-memory store with the schema applied.
pub fn setup_store() -> SqliteStore {
    SqliteStore::new(":memory:").unwrap()
}

/// Creates a campaign and records one pledge per entry, in order. An entry is
/// `(price_ceiling, intensity)`; entries with an intensity also get an
/// endorsement recorded for the same user.
pub fn seed_campaign(
    store: &SqliteStore,
    title: &str,
    entries: &[(Option<f64>, Option<EndorsementIntensity>)],
) -> i64 {
    let campaign_id = store.create_campaign(title).unwrap();
    for (n, (price_ceiling, intensity)) in entries.iter().enumerate() {
        let user_id = format!("user-{:03}", n + 1);
        store
            .record_pledge(campaign_id, &user_id, *price_ceiling)
            .unwrap();
        if let Some(intensity) = intensity {
            store
                .record_endorsement(campaign_id, &user_id, *intensity)
                .unwrap();
        }
    }
    campaign_id
}
