use crate::model::{CampaignRecord, EndorsementIntensity, PricedPledge, StorageError};
use crate::storage::traits::PledgeSource;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the database (creating it if missing) and runs the migrations.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS campaigns (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pledges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                campaign_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                price_ceiling REAL,
                pledged_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS endorsements (
                campaign_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                intensity TEXT NOT NULL,
                endorsed_at TEXT NOT NULL,
                PRIMARY KEY (campaign_id, user_id)
            );

            CREATE INDEX IF NOT EXISTS idx_pledges_campaign ON pledges(campaign_id);
            ",
        )?;

        Ok(Self { conn })
    }

    /// Creates a campaign and returns its id.
    pub fn create_campaign(&self, title: &str) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO campaigns (title, created_at) VALUES (?1, ?2)",
            params![title, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Records a pledge. A missing price ceiling is stored as NULL: the
    /// supporter pledged without naming a willingness-to-pay figure.
    pub fn record_pledge(
        &self,
        campaign_id: i64,
        user_id: &str,
        price_ceiling: Option<f64>,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO pledges (campaign_id, user_id, price_ceiling, pledged_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![campaign_id, user_id, price_ceiling, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Records (or replaces) a user's endorsement intensity for a campaign.
    /// One tag per user per campaign; re-tagging overwrites.
    pub fn record_endorsement(
        &self,
        campaign_id: i64,
        user_id: &str,
        intensity: EndorsementIntensity,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO endorsements (campaign_id, user_id, intensity, endorsed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                campaign_id,
                user_id,
                intensity.as_tag(),
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Fetches a campaign record, if it exists.
    pub fn get_campaign(&self, campaign_id: i64) -> Result<Option<CampaignRecord>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at FROM campaigns WHERE id = ?1")?;

        let mut rows = stmt.query(params![campaign_id])?;
        if let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let title: String = row.get(1)?;
            let created_at_str: String = row.get(2)?;
            Ok(Some(CampaignRecord {
                id,
                title,
                created_at: parse_timestamp(&created_at_str)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Returns all campaigns, oldest first.
    pub fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at FROM campaigns ORDER BY id ASC")?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let title: String = row.get(1)?;
            let created_at: String = row.get(2)?;
            Ok((id, title, created_at))
        })?;

        let mut campaigns = Vec::new();
        for row in rows {
            let (id, title, created_at_str) = row?;
            campaigns.push(CampaignRecord {
                id,
                title,
                created_at: parse_timestamp(&created_at_str)?,
            });
        }

        Ok(campaigns)
    }

    /// Total pledge rows for a campaign, priced or not.
    pub fn count_pledges(&self, campaign_id: i64) -> Result<usize, StorageError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pledges WHERE campaign_id = ?1",
            params![campaign_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// The batched read behind the analysis engine: every priced pledge for the
    /// campaign LEFT JOINed to the pledging user's intensity tag, in original
    /// pledge order. Null ceilings are filtered here; the positive-amount
    /// filter stays with the engine.
    pub fn list_priced_pledges(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<PricedPledge>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT p.price_ceiling, e.intensity
             FROM pledges p
             LEFT JOIN endorsements e
               ON e.campaign_id = p.campaign_id AND e.user_id = p.user_id
             WHERE p.campaign_id = ?1 AND p.price_ceiling IS NOT NULL
             ORDER BY p.id ASC",
        )?;

        let rows = stmt.query_map(params![campaign_id], |row| {
            let price_ceiling: Option<f64> = row.get(0)?;
            let tag: Option<String> = row.get(1)?;
            Ok((price_ceiling, tag))
        })?;

        let mut pledges = Vec::new();
        for row in rows {
            let (price_ceiling, tag) = row?;
            let intensity = match tag {
                Some(tag) => Some(EndorsementIntensity::from_tag(&tag)?),
                None => None,
            };
            pledges.push(PricedPledge {
                price_ceiling,
                intensity,
            });
        }

        Ok(pledges)
    }
}

/// Parses an RFC 3339 timestamp stored by this module.
fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, StorageError> {
    text.parse()
        .map_err(|e| StorageError::InvalidData(format!("invalid timestamp: {}", e)))
}

#[async_trait::async_trait]
impl PledgeSource for Arc<Mutex<SqliteStore>> {
    async fn list_priced_pledges(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<PricedPledge>, StorageError> {
        self.lock().await.list_priced_pledges(campaign_id)
    }
}
