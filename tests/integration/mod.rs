/// Integration tests over a real on-disk store
use habitsip::*;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tempfile::NamedTempFile;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[cfg(test)]
mod store_workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_read_round_trip() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");

        let mut breakdown = BTreeMap::new();
        breakdown.insert("beer".to_string(), 2);
        breakdown.insert("wine".to_string(), 1);
        let entry = DrinkLog::new(
            date("2024-01-10"),
            3,
            DrinkKind::Mixed,
            Some("birthday".to_string()),
            Some(breakdown),
        )
        .unwrap();

        app.save_log(&entry).await;
        assert_eq!(app.log_for_date(date("2024-01-10")).await, Some(entry));
    }

    #[tokio::test]
    async fn test_same_date_save_keeps_only_the_latest() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");

        let first = DrinkLog::new(date("2024-01-10"), 4, DrinkKind::Beer, None, None).unwrap();
        let second = DrinkLog::clean_day(date("2024-01-10"), None).unwrap();
        app.save_log(&first).await;
        app.save_log(&second).await;

        let logs = app.logs().await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0], second);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");

        app.save_log(&DrinkLog::clean_day(date("2024-01-10"), None).unwrap()).await;
        app.delete_log(date("2024-01-10")).await;
        assert_eq!(app.log_for_date(date("2024-01-10")).await, None);

        app.save_log(&DrinkLog::clean_day(date("2024-01-11"), None).unwrap()).await;
        app.clear_logs().await;
        assert!(app.logs().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_reads_as_empty() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");

        app.store().save_string(LOGS_KEY, "this is not json").await;
        assert!(app.logs().await.is_empty());

        // And the next save starts a fresh collection.
        app.save_log(&DrinkLog::clean_day(date("2024-01-10"), None).unwrap()).await;
        assert_eq!(app.logs().await.len(), 1);
    }
}

#[cfg(test)]
mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        {
            let app = HabitSip::open(db_path.clone()).expect("Failed to open first instance");
            app.save_log(&DrinkLog::clean_day(date("2024-01-10"), None).unwrap()).await;
            app.prefs().set_user_name("Sam").await;
        }

        let app = HabitSip::open(db_path).expect("Failed to open second instance");
        assert_eq!(app.logs().await.len(), 1);
        assert_eq!(app.prefs().user_name().await, Some("Sam".to_string()));
    }
}

#[cfg(test)]
mod statistics_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_over_saved_records() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");
        app.prefs().set_avg_cost(5.0).await;

        app.save_log(&DrinkLog::clean_day(date("2024-02-01"), None).unwrap()).await;
        app.save_log(&DrinkLog::clean_day(date("2024-02-02"), None).unwrap()).await;
        app.save_log(&DrinkLog::new(date("2024-02-03"), 2, DrinkKind::Beer, None, None).unwrap())
            .await;

        let stats = app.dashboard(date("2024-02-03")).await;
        assert_eq!(stats.current_streak, 0); // today has drinks
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.clean_this_month, 2);
        assert_eq!(stats.drinks_this_week, 2);
        assert_eq!(stats.money_saved, 10.0);
    }

    #[tokio::test]
    async fn test_non_numeric_cost_counts_as_zero() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");
        app.store().save_string("avgCost", "six-ish").await;

        app.save_log(&DrinkLog::clean_day(date("2024-02-01"), None).unwrap()).await;

        let stats = app.dashboard(date("2024-02-01")).await;
        assert_eq!(stats.clean_this_month, 1);
        assert_eq!(stats.money_saved, 0.0);
    }

    #[tokio::test]
    async fn test_period_stats_inclusive_range() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");
        app.save_log(&DrinkLog::new(date("2024-01-01"), 2, DrinkKind::Wine, None, None).unwrap())
            .await;
        app.save_log(&DrinkLog::clean_day(date("2024-01-02"), None).unwrap()).await;

        let stats = app.stats_for_period(date("2024-01-01"), date("2024-01-02")).await;
        assert_eq!(stats.drinks, 2);
        assert_eq!(stats.clean_days, 1);
    }
}

#[cfg(test)]
mod export_tests {
    use super::*;

    #[tokio::test]
    async fn test_export_empty_collection_fails() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");
        let result = app.export_csv(None).await;
        assert!(matches!(result, Err(ExportError::NoLogs)));
    }

    #[tokio::test]
    async fn test_export_one_record_writes_two_lines() {
        let app = HabitSip::open_in_memory().expect("Failed to open store");
        app.save_log(
            &DrinkLog::new(
                date("2024-01-10"),
                2,
                DrinkKind::Beer,
                Some("with \"friends\"".to_string()),
                None,
            )
            .unwrap(),
        )
        .await;

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = app.export_csv(Some(dir.path())).await.expect("Export failed");

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "\"Date\",\"Drinks\",\"Type\",\"Note\"");
        assert_eq!(lines[1], "\"2024-01-10\",\"2\",\"beer\",\"with \"\"friends\"\"\"");
    }
}
