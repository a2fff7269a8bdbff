/// Typed access to the preference scalars
///
/// Each preference is an independent key/value pair in the store; this
/// module wraps the raw string encodings in typed accessors. The service is
/// passed down explicitly wherever settings are needed, there is no global
/// state. Unknown stored spellings decode to absent rather than erroring.

use std::fmt;
use std::str::FromStr;
use crate::storage::KeyValueStore;

pub const KEY_USER_NAME: &str = "userName";
pub const KEY_GOAL: &str = "goal";
pub const KEY_AVG_COST: &str = "avgCost";
pub const KEY_DAILY_REMINDER: &str = "dailyReminder";
pub const KEY_REMINDER_TIME: &str = "reminderTime";
pub const KEY_THEME: &str = "themePref";
pub const KEY_ONBOARDING_DONE: &str = "onboardingDone";

/// What the user is working toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// No alcohol at all
    Sobriety,
    /// Cutting back
    Moderation,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Sobriety => "Sobriety",
            Goal::Moderation => "Moderation",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sobriety" => Ok(Goal::Sobriety),
            "Moderation" => Ok(Goal::Moderation),
            _ => Err(()),
        }
    }
}

/// Theme choice for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePref {
    Light,
    Dark,
    /// Follow the device scheme
    #[default]
    System,
}

impl ThemePref {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePref::Light => "light",
            ThemePref::Dark => "dark",
            ThemePref::System => "system",
        }
    }
}

impl fmt::Display for ThemePref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePref {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePref::Light),
            "dark" => Ok(ThemePref::Dark),
            "system" => Ok(ThemePref::System),
            _ => Err(()),
        }
    }
}

/// Daily check-in time, stored as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime {
    pub hour: u8,
    pub minute: u8,
}

impl ReminderTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }
}

impl Default for ReminderTime {
    /// 8 pm local time
    fn default() -> Self {
        Self { hour: 20, minute: 0 }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s.split_once(':').ok_or(())?;
        let hour = h.parse().map_err(|_| ())?;
        let minute = m.parse().map_err(|_| ())?;
        ReminderTime::new(hour, minute).ok_or(())
    }
}

/// What the external notification scheduler is told
///
/// The scheduler owns its own scheduling state; the core only stores and
/// hands over this configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderConfig {
    pub enabled: bool,
    pub time: ReminderTime,
}

/// Settings service over the key/value store
pub struct Preferences<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> Preferences<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn user_name(&self) -> Option<String> {
        self.store.get_string(KEY_USER_NAME).await
    }

    pub async fn set_user_name(&self, name: &str) {
        self.store.save_string(KEY_USER_NAME, name.trim()).await;
    }

    pub async fn goal(&self) -> Option<Goal> {
        let raw = self.store.get_string(KEY_GOAL).await?;
        raw.parse().ok()
    }

    pub async fn set_goal(&self, goal: Goal) {
        self.store.save_string(KEY_GOAL, goal.as_str()).await;
    }

    /// Average per-drink cost; non-finite stored values read as unset
    pub async fn avg_cost(&self) -> Option<f64> {
        self.store.get_number(KEY_AVG_COST).await.filter(|c| c.is_finite())
    }

    pub async fn set_avg_cost(&self, cost: f64) {
        self.store.save_number(KEY_AVG_COST, cost).await;
    }

    pub async fn daily_reminder(&self) -> bool {
        self.store.get_boolean(KEY_DAILY_REMINDER).await.unwrap_or(false)
    }

    pub async fn set_daily_reminder(&self, enabled: bool) {
        self.store.save_boolean(KEY_DAILY_REMINDER, enabled).await;
    }

    pub async fn reminder_time(&self) -> ReminderTime {
        match self.store.get_string(KEY_REMINDER_TIME).await {
            Some(raw) => raw.parse().unwrap_or_default(),
            None => ReminderTime::default(),
        }
    }

    pub async fn set_reminder_time(&self, time: ReminderTime) {
        self.store.save_string(KEY_REMINDER_TIME, &time.to_string()).await;
    }

    /// The enabled + hour + minute bundle for the notification scheduler
    pub async fn reminder(&self) -> ReminderConfig {
        ReminderConfig {
            enabled: self.daily_reminder().await,
            time: self.reminder_time().await,
        }
    }

    pub async fn theme(&self) -> ThemePref {
        match self.store.get_string(KEY_THEME).await {
            Some(raw) => raw.parse().unwrap_or_default(),
            None => ThemePref::default(),
        }
    }

    pub async fn set_theme(&self, theme: ThemePref) {
        self.store.save_string(KEY_THEME, theme.as_str()).await;
    }

    pub async fn onboarding_done(&self) -> bool {
        self.store.get_boolean(KEY_ONBOARDING_DONE).await.unwrap_or(false)
    }

    pub async fn set_onboarding_done(&self, done: bool) {
        self.store.save_boolean(KEY_ONBOARDING_DONE, done).await;
    }
}
