/// CSV export of the log collection
///
/// Renders the full collection as `Date,Drinks,Type,Note` rows and writes
/// them to a timestamped file for the platform share step to pick up.
/// Exporting an empty collection is the one routine operation that raises,
/// so the caller can show a distinct message.

use std::path::{Path, PathBuf};
use chrono::Local;
use thiserror::Error;
use crate::domain::DrinkLog;
use crate::storage::{self, KeyValueStore};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No logs to export")]
    NoLogs,

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Quote one CSV value: wrap in double quotes, double any embedded quote
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(values: &[&str]) -> String {
    values.iter().map(|v| csv_field(v)).collect::<Vec<_>>().join(",")
}

/// Render the collection as CSV, header first, records in stored order
pub fn render_csv(logs: &[DrinkLog]) -> String {
    let mut lines = vec![csv_row(&["Date", "Drinks", "Type", "Note"])];
    for log in logs {
        let date = log.date.to_string();
        let drinks = log.drinks.to_string();
        let note = log.note.as_deref().unwrap_or("");
        lines.push(csv_row(&[&date, &drinks, log.kind.as_label(), note]));
    }
    lines.join("\n")
}

/// Export the full collection to a CSV file and return its path
///
/// The file lands in `out_dir`, or the system temp directory when none is
/// given, named `habitsip_logs_<timestamp>.csv`.
pub async fn export_logs_csv<S: KeyValueStore>(
    store: &S,
    out_dir: Option<&Path>,
) -> Result<PathBuf, ExportError> {
    let logs = storage::get_logs(store).await;
    if logs.is_empty() {
        return Err(ExportError::NoLogs);
    }

    let file_name = format!("habitsip_logs_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
    let dir = out_dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
    let path = dir.join(file_name);

    std::fs::write(&path, render_csv(&logs))?;

    tracing::info!(path = %path.display(), records = logs.len(), "exported log collection");
    Ok(path)
}
