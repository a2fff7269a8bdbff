/// Achievement predicates over the full log history
///
/// Each achievement is an independent boolean predicate, re-evaluated from
/// scratch on every check. There is no incremental or cached state: losing
/// a record can relock an achievement, which is the intended behavior.

use serde::Serialize;
use crate::domain::{best_streak, DrinkLog};

/// A single achievement definition
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    achieved: fn(&[DrinkLog]) -> bool,
}

impl Achievement {
    /// Evaluate this achievement against the full collection
    pub fn achieved(&self, logs: &[DrinkLog]) -> bool {
        (self.achieved)(logs)
    }
}

/// Evaluated status of one achievement, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementStatus {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_clean",
        title: "First Clean Day",
        description: "Log your first day with 0 drinks",
        achieved: |logs| logs.iter().any(|l| l.is_clean()),
    },
    Achievement {
        id: "seven_streak",
        title: "7-Day Streak",
        description: "Stay clean for 7 consecutive days",
        achieved: |logs| best_streak(logs) >= 7,
    },
    Achievement {
        id: "thirty_streak",
        title: "30-Day Streak",
        description: "Stay clean for 30 consecutive days",
        achieved: |logs| best_streak(logs) >= 30,
    },
    Achievement {
        id: "hundred_clean",
        title: "100 Clean Days",
        description: "Accumulate 100 clean days overall",
        achieved: |logs| logs.iter().filter(|l| l.is_clean()).count() >= 100,
    },
];

/// The full achievement catalog, in display order
pub fn catalog() -> &'static [Achievement] {
    ACHIEVEMENTS
}

/// Evaluate every achievement against the collection
pub fn evaluate(logs: &[DrinkLog]) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|a| AchievementStatus {
            id: a.id,
            title: a.title,
            description: a.description,
            unlocked: a.achieved(logs),
        })
        .collect()
}
