use chrono::{DateTime, Duration, Utc};
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use std::sync::Arc;

use crate::db::mongo::DATABASE;

const COLLECTION: &str = "PlanQuotas";

/// Hours before a spent free-generation credit refills.
const REFILL_HOURS: i64 = 24;

/// One bucket per identity. Capacity is 1, so the whole state is the moment
/// the credit was last spent.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct QuotaRecord {
    pub identity: String,
    pub last_final_call: mongodb::bson::DateTime,
}

/// Pure bucket decision: the single credit is available when it was never
/// spent or the refill window has elapsed. `check_and_consume` enforces the
/// same rule through filtered update commands so the spend is atomic.
pub fn bucket_allows(last_use: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_use {
        None => true,
        Some(spent_at) => now - spent_at >= Duration::hours(REFILL_HOURS),
    }
}

/// Token-bucket gate for final generation calls by non-subscribers. Backed by
/// a Mongo collection keyed by identity; subscribers never reach this check.
#[derive(Clone)]
pub struct QuotaService {
    client: Arc<Client>,
}

impl QuotaService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<QuotaRecord> {
        self.client.database(DATABASE).collection(COLLECTION)
    }

    /// Returns true and spends the credit when the identity still has one;
    /// returns false without touching the record otherwise. Each step is a
    /// single filtered update, so concurrent requests for the same identity
    /// cannot both win the credit.
    pub async fn check_and_consume(&self, identity: &str) -> Result<bool, mongodb::error::Error> {
        let collection = self.collection();
        let now = Utc::now();
        let now_bson = mongodb::bson::DateTime::from_millis(now.timestamp_millis());
        let cutoff = now - Duration::hours(REFILL_HOURS);
        let cutoff_bson = mongodb::bson::DateTime::from_millis(cutoff.timestamp_millis());

        // Refill path: only a record whose last spend predates the window
        // matches, and the match and the spend are one update.
        let refilled = collection
            .update_one(
                doc! { "identity": identity, "last_final_call": { "$lte": cutoff_bson } },
                doc! { "$set": { "last_final_call": now_bson } },
            )
            .await?;
        if refilled.modified_count == 1 {
            return Ok(true);
        }

        // First-use path: exactly one caller gets the insert; anyone who
        // finds the record already there has no credit left.
        let inserted = collection
            .update_one(
                doc! { "identity": identity },
                doc! { "$setOnInsert": {
                    "identity": identity,
                    "last_final_call": now_bson,
                } },
            )
            .upsert(true)
            .await?;
        if inserted.upserted_id.is_some() {
            return Ok(true);
        }

        log::info!("Quota exhausted for identity {}", identity);
        Ok(false)
    }
}
