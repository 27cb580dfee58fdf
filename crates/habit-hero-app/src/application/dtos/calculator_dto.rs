use serde::{Deserialize, Serialize};

use habit_hero_domain::habit::Habit;

/// `{ xp, level, habits[], rawAmount, bypassMultiplier }`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpLedgerRequestDto {
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub habits: Vec<Habit>,
    pub raw_amount: i64,
    #[serde(default)]
    pub bypass_multiplier: bool,
}

fn first_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpLedgerResponseDto {
    pub xp: u32,
    pub level: u32,
    pub leveled_up: bool,
    pub effective_amount: u32,
    pub levels_gained: u32,
}

/// `{ lastLoginDate, currentDate, currentStreak }`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBonusRequestDto {
    #[serde(default)]
    pub last_login_date: Option<String>,
    pub current_date: String,
    #[serde(default)]
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBonusResponseDto {
    pub new_streak: u32,
    pub bonus_xp: u32,
    pub show_bonus: bool,
}
