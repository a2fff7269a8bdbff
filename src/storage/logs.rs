/// The drink-log store: CRUD over the single serialized collection
///
/// The whole collection lives as one JSON array under one key, so every
/// mutation is a full read-modify-write of the serialized payload. At one
/// record per calendar day that O(n) cost is a deliberate tradeoff for a
/// trivially simple layout, not an oversight.
///
/// None of these operations surface errors: a missing key or a corrupt
/// payload reads as the empty collection, and a failed write is a logged
/// no-op, matching the degrade policy of the underlying store.

use chrono::NaiveDate;
use crate::domain::DrinkLog;
use crate::storage::KeyValueStore;

/// The key the entire serialized collection is stored under
pub const LOGS_KEY: &str = "drinkLogs";

/// Load and deserialize the full collection
///
/// Returns an empty collection on a missing key or a decode failure; the
/// failure is logged, never raised.
pub async fn get_logs<S: KeyValueStore>(store: &S) -> Vec<DrinkLog> {
    let Some(raw) = store.get_string(LOGS_KEY).await else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(logs) => logs,
        Err(e) => {
            tracing::warn!(error = %e, "stored log collection failed to decode, treating as empty");
            Vec::new()
        }
    }
}

/// Find the record for a single date, if any
pub async fn get_log_for_date<S: KeyValueStore>(store: &S, date: NaiveDate) -> Option<DrinkLog> {
    get_logs(store).await.into_iter().find(|l| l.date == date)
}

/// Insert or replace the record for the entry's date
///
/// Any existing record with the same date is dropped and the new entry is
/// appended, so the stored order is not chronological. Consumers sort.
pub async fn save_log<S: KeyValueStore>(store: &S, entry: &DrinkLog) {
    let logs = get_logs(store).await;
    let mut updated: Vec<DrinkLog> = logs.into_iter().filter(|l| l.date != entry.date).collect();
    updated.push(entry.clone());
    persist(store, &updated).await;
    tracing::debug!(date = %entry.date, drinks = entry.drinks, "saved log entry");
}

/// Remove the record for a date; removing an unlogged date changes nothing
pub async fn delete_log<S: KeyValueStore>(store: &S, date: NaiveDate) {
    let logs = get_logs(store).await;
    let updated: Vec<DrinkLog> = logs.into_iter().filter(|l| l.date != date).collect();
    persist(store, &updated).await;
    tracing::debug!(%date, "deleted log entry");
}

/// Drop the entire collection
pub async fn clear_logs<S: KeyValueStore>(store: &S) {
    store.remove(LOGS_KEY).await;
    tracing::debug!("cleared log collection");
}

async fn persist<S: KeyValueStore>(store: &S, logs: &[DrinkLog]) {
    match serde_json::to_string(logs) {
        Ok(json) => store.save_string(LOGS_KEY, &json).await,
        Err(e) => tracing::warn!(error = %e, "failed to serialize log collection, write dropped"),
    }
}
