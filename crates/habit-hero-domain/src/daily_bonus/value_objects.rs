use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::date::lenient_optional_day;

/// Login streak state stored on the user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLoginState {
    #[serde(default, with = "lenient_optional_day")]
    pub last_login_date: Option<NaiveDate>,
    #[serde(default)]
    pub streak: u32,
}

/// Result of evaluating a login against the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBonus {
    pub new_streak: u32,
    pub bonus_xp: u32,
    /// False when the user already logged in today; the bonus must not be granted
    pub show_bonus: bool,
}

impl DailyBonus {
    /// Login state to persist once the bonus has been handled
    pub fn next_state(&self, today: NaiveDate) -> DailyLoginState {
        DailyLoginState {
            last_login_date: Some(today),
            streak: self.new_streak,
        }
    }
}
