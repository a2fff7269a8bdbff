/// Unit tests over the public library surface
use habitsip::*;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn clean(s: &str) -> DrinkLog {
    DrinkLog::clean_day(date(s), None).unwrap()
}

fn drinking(s: &str, n: u32) -> DrinkLog {
    DrinkLog::new(date(s), n, DrinkKind::Beer, None, None).unwrap()
}

#[cfg(test)]
mod domain_tests {
    use super::*;

    #[test]
    fn test_breakdown_invariant_holds_for_valid_records() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert("beer".to_string(), 2);
        breakdown.insert("wine".to_string(), 1);

        let log = DrinkLog::new(date("2024-01-10"), 3, DrinkKind::Mixed, None, Some(breakdown))
            .unwrap();
        let sum: u32 = log.breakdown.as_ref().unwrap().values().sum();
        assert_eq!(sum, log.drinks);
    }

    #[test]
    fn test_breakdown_mismatch_is_rejected() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert("beer".to_string(), 2);

        let result = DrinkLog::new(date("2024-01-10"), 5, DrinkKind::Beer, None, Some(breakdown));
        assert!(result.is_err());
    }

    #[test]
    fn test_clean_iff_zero_drinks() {
        assert!(DrinkLog::new(date("2024-01-10"), 0, DrinkKind::Clean, None, None).is_ok());
        assert!(DrinkLog::new(date("2024-01-10"), 0, DrinkKind::Wine, None, None).is_err());
        assert!(DrinkLog::new(date("2024-01-10"), 1, DrinkKind::Clean, None, None).is_err());
    }
}

#[cfg(test)]
mod streak_tests {
    use super::*;

    #[test]
    fn test_best_streak_five_then_broken() {
        let mut logs: Vec<DrinkLog> = (1..=5)
            .map(|d| clean(&format!("2024-01-{:02}", d)))
            .collect();
        logs.push(drinking("2024-01-06", 1));

        assert_eq!(best_streak(&logs), 5);
    }

    #[test]
    fn test_current_streak_zero_when_yesterday_unlogged() {
        // Clean days further back don't matter once a day is missing.
        let logs = vec![
            clean("2024-01-05"),
            clean("2024-01-06"),
            clean("2024-01-07"),
            clean("2024-01-08"),
            clean("2024-01-10"),
        ];
        // Today itself is clean but 2024-01-09 is unlogged.
        assert_eq!(current_streak(&logs, date("2024-01-10")), 1);

        let without_today: Vec<DrinkLog> =
            logs.iter().filter(|l| l.date != date("2024-01-10")).cloned().collect();
        assert_eq!(current_streak(&without_today, date("2024-01-10")), 0);
    }

    #[test]
    fn test_current_streak_caps_at_lookback_window() {
        let today = date("2024-06-30");
        let logs: Vec<DrinkLog> = (0..60)
            .map(|i| DrinkLog::clean_day(today - Duration::days(i), None).unwrap())
            .collect();

        // The backward walk stops one day past the 30-day cap.
        assert_eq!(current_streak(&logs, today), 31);
    }
}

#[cfg(test)]
mod analytics_tests {
    use super::*;

    #[test]
    fn test_period_aggregate_from_two_records() {
        let logs = vec![drinking("2024-01-01", 2), clean("2024-01-02")];
        let engine = AnalyticsEngine::new();

        let stats = engine.stats_for_period(&logs, date("2024-01-01"), date("2024-01-02"));
        assert_eq!(stats.drinks, 2);
        assert_eq!(stats.clean_days, 1);
    }

    #[test]
    fn test_money_saved_is_clean_days_times_cost() {
        let logs = vec![clean("2024-02-01"), clean("2024-02-10"), drinking("2024-02-05", 4)];
        let engine = AnalyticsEngine::new();

        let stats = engine.dashboard(&logs, Some(7.5), date("2024-02-10"));
        assert_eq!(stats.clean_this_month, 2);
        assert_eq!(stats.money_saved, 15.0);
    }

    #[test]
    fn test_achievements_recompute_from_scratch() {
        let run: Vec<DrinkLog> = (0..7)
            .map(|i| DrinkLog::clean_day(date("2024-01-01") + Duration::days(i), None).unwrap())
            .collect();

        let unlocked = achievements::evaluate(&run);
        assert!(unlocked.iter().find(|s| s.id == "seven_streak").unwrap().unlocked);

        // Dropping a middle record relocks the streak achievement.
        let broken: Vec<DrinkLog> =
            run.iter().filter(|l| l.date != date("2024-01-04")).cloned().collect();
        let relocked = achievements::evaluate(&broken);
        assert!(!relocked.iter().find(|s| s.id == "seven_streak").unwrap().unlocked);
    }
}

#[cfg(test)]
mod export_tests {
    use super::*;

    #[test]
    fn test_csv_header_and_quoting() {
        let logs = vec![DrinkLog::new(
            date("2024-01-10"),
            1,
            DrinkKind::Wine,
            Some("said \"just one\"".to_string()),
            None,
        )
        .unwrap()];

        let csv = render_csv(&logs);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "\"Date\",\"Drinks\",\"Type\",\"Note\"");
        assert!(lines[1].contains("\"said \"\"just one\"\"\""));
    }
}

#[cfg(test)]
mod onboarding_tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        let mut step = OnboardingStep::first();
        let mut count = 0;
        while !step.is_terminal() {
            step = step.next();
            count += 1;
        }
        assert_eq!(count, 5);
        assert_eq!(step, OnboardingStep::Main);
    }
}

#[cfg(test)]
mod prefs_tests {
    use super::*;

    #[test]
    fn test_enum_spellings() {
        assert_eq!(Goal::Sobriety.to_string(), "Sobriety");
        assert_eq!("Moderation".parse(), Ok(Goal::Moderation));
        assert_eq!(ThemePref::System.to_string(), "system");
        assert!("Dark".parse::<ThemePref>().is_err()); // stored spelling is lowercase
    }

    #[test]
    fn test_prefs_over_in_memory_store() {
        // Exercise the async API from a sync test.
        tokio_test::block_on(async {
            let app = HabitSip::open_in_memory().unwrap();
            let prefs = app.prefs();

            prefs.set_goal(Goal::Sobriety).await;
            prefs.set_avg_cost(6.0).await;
            assert_eq!(prefs.goal().await, Some(Goal::Sobriety));
            assert_eq!(prefs.avg_cost().await, Some(6.0));
        });
    }
}
