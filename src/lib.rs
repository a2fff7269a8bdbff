/// Public library interface for HabitSip
///
/// This module wires the key/value store, the log store, preferences and
/// the statistics engine together behind one app handle, and re-exports the
/// public types a frontend or test harness needs.

use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod prefs;
mod export;
mod onboarding;

// Re-export public modules and types
pub use domain::*;
pub use storage::{KeyValueStore, SqliteStore, StorageError, LOGS_KEY};
pub use analytics::{achievements, AchievementStatus, AnalyticsEngine, DashboardStats, PeriodStats};
pub use prefs::{Goal, Preferences, ReminderConfig, ReminderTime, ThemePref};
pub use export::{render_csv, ExportError};
pub use onboarding::OnboardingStep;

/// Errors that can reach the binary
///
/// Routine reads and writes degrade silently inside the store; what's left
/// is startup failure, write-boundary validation and the export-with-no-data
/// case.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// The assembled application core
///
/// Owns the device-local store and the analytics engine; every operation a
/// frontend needs goes through here.
pub struct HabitSip {
    store: SqliteStore,
    analytics: AnalyticsEngine,
}

impl HabitSip {
    /// Open (or create) the database at the given path
    pub fn open(db_path: PathBuf) -> Result<Self, AppError> {
        tracing::info!("Opening HabitSip store at: {:?}", db_path);

        let store = SqliteStore::open(db_path)?;
        let analytics = AnalyticsEngine::new();

        Ok(Self { store, analytics })
    }

    /// An in-memory instance, useful for tests
    pub fn open_in_memory() -> Result<Self, AppError> {
        Ok(Self {
            store: SqliteStore::open_in_memory()?,
            analytics: AnalyticsEngine::new(),
        })
    }

    /// Direct access to the underlying store
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// The settings service over this store
    pub fn prefs(&self) -> Preferences<'_, SqliteStore> {
        Preferences::new(&self.store)
    }

    pub async fn logs(&self) -> Vec<DrinkLog> {
        storage::get_logs(&self.store).await
    }

    pub async fn log_for_date(&self, date: chrono::NaiveDate) -> Option<DrinkLog> {
        storage::get_log_for_date(&self.store, date).await
    }

    pub async fn save_log(&self, entry: &DrinkLog) {
        storage::save_log(&self.store, entry).await;
    }

    pub async fn delete_log(&self, date: chrono::NaiveDate) {
        storage::delete_log(&self.store, date).await;
    }

    pub async fn clear_logs(&self) {
        storage::clear_logs(&self.store).await;
    }

    /// Dashboard statistics for the given "today"
    pub async fn dashboard(&self, today: chrono::NaiveDate) -> DashboardStats {
        let logs = self.logs().await;
        let avg_cost = self.prefs().avg_cost().await;
        self.analytics.dashboard(&logs, avg_cost, today)
    }

    /// Aggregate over an inclusive date range
    pub async fn stats_for_period(
        &self,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> PeriodStats {
        let logs = self.logs().await;
        self.analytics.stats_for_period(&logs, start, end)
    }

    /// Evaluate the full achievement catalog
    pub async fn achievements(&self) -> Vec<AchievementStatus> {
        let logs = self.logs().await;
        achievements::evaluate(&logs)
    }

    /// Export the collection as CSV; fails when there is nothing to export
    pub async fn export_csv(&self, out_dir: Option<&Path>) -> Result<PathBuf, ExportError> {
        export::export_logs_csv(&self.store, out_dir).await
    }
}
