/// Streak derivation over the drink-log collection
///
/// Pure functions with no state and no I/O. A streak is a maximal run of
/// consecutive clean days (logged dates with zero drinks). "Today" is always
/// an explicit parameter so the calculations stay deterministic.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use crate::domain::DrinkLog;

/// How many days before today the current-streak walk will look back.
///
/// The walk processes today plus this many prior days before giving up, so
/// an unbroken run longer than the window reports at most 31. Kept as-is;
/// lifting the cap would change reported numbers for long streaks.
pub const CURRENT_STREAK_LOOKBACK_DAYS: i64 = 30;

/// Current streak of consecutive clean days ending at `today`
///
/// Walks backward one calendar day at a time, counting days that are logged
/// with zero drinks. An unlogged day breaks the streak just like a drinking
/// day does.
pub fn current_streak(logs: &[DrinkLog], today: NaiveDate) -> u32 {
    let by_date: HashMap<NaiveDate, &DrinkLog> =
        logs.iter().map(|l| (l.date, l)).collect();

    let mut streak = 0;
    for offset in 0.. {
        let day = today - Duration::days(offset);
        match by_date.get(&day) {
            Some(log) if log.is_clean() => streak += 1,
            _ => break,
        }
        if offset >= CURRENT_STREAK_LOOKBACK_DAYS {
            break;
        }
    }
    streak
}

/// Best streak of consecutive clean days anywhere in the collection
///
/// Sorts records ascending by date and scans once with a running counter
/// that resets on any record with drinks. Stored order is irrelevant.
pub fn best_streak(logs: &[DrinkLog]) -> u32 {
    let mut sorted: Vec<&DrinkLog> = logs.iter().collect();
    sorted.sort_by_key(|l| l.date);

    let mut best = 0;
    let mut run = 0;
    for log in sorted {
        if log.is_clean() {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}
