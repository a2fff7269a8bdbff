/// Statistics engine deriving dashboard and period views from the log
/// collection
///
/// Every function here is pure: the full collection comes in as a slice,
/// "today" is an explicit parameter, nothing is cached and nothing touches
/// storage. Displayed statistics are always re-derived from scratch.

pub mod achievements;

pub use achievements::*;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use crate::domain::{best_streak, current_streak, DrinkLog};

/// Aggregate over an inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    /// Total drinks over records in range
    pub drinks: u32,
    /// Records in range with zero drinks
    pub clean_days: u32,
}

/// The numbers the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub current_streak: u32,
    pub best_streak: u32,
    pub clean_this_month: u32,
    pub drinks_this_week: u32,
    /// Clean days this month times the average per-drink cost
    pub money_saved: f64,
}

/// Analytics engine for processing the log collection
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Sum drinks and count clean days over an inclusive range
    pub fn stats_for_period(
        &self,
        logs: &[DrinkLog],
        start: NaiveDate,
        end: NaiveDate,
    ) -> PeriodStats {
        let in_range = logs.iter().filter(|l| l.date >= start && l.date <= end);

        let mut drinks = 0;
        let mut clean_days = 0;
        for log in in_range {
            drinks += log.drinks;
            if log.is_clean() {
                clean_days += 1;
            }
        }

        PeriodStats { drinks, clean_days }
    }

    /// Derive the full dashboard view
    ///
    /// `avg_cost` is the externally supplied per-drink cost; unset or
    /// non-finite counts as zero. Month and week windows are lower-bounded
    /// only (a record dated past today still lands in its month).
    pub fn dashboard(
        &self,
        logs: &[DrinkLog],
        avg_cost: Option<f64>,
        today: NaiveDate,
    ) -> DashboardStats {
        let start_of_month = today.with_day(1).unwrap_or(today);
        let clean_this_month = logs
            .iter()
            .filter(|l| l.is_clean() && l.date >= start_of_month)
            .count() as u32;

        let week_ago = today - Duration::days(6);
        let drinks_this_week = logs
            .iter()
            .filter(|l| l.date >= week_ago)
            .map(|l| l.drinks)
            .sum();

        let cost = avg_cost.filter(|c| c.is_finite()).unwrap_or(0.0);

        DashboardStats {
            current_streak: current_streak(logs, today),
            best_streak: best_streak(logs),
            clean_this_month,
            drinks_this_week,
            money_saved: f64::from(clean_this_month) * cost,
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
