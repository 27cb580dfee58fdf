use serde::Serialize;

use habit_hero_domain::habit::{Habit, SelectionSummary};
use habit_hero_domain::progression::LedgerOutcome;
use habit_hero_domain::record::{BeatOutcome, PersonalRecord};
use habit_hero_domain::todo::ToDo;

/// XP credited by one action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpAwardDto {
    pub source: String,
    pub raw_amount: u32,
    pub effective_amount: u32,
    pub multiplier: f64,
    pub xp: u32,
    pub level: u32,
    pub xp_to_next_level: u32,
    pub leveled_up: bool,
    pub levels_gained: u32,
}

impl XpAwardDto {
    pub fn from_outcome(
        source: &str,
        raw_amount: u32,
        multiplier: f64,
        outcome: &LedgerOutcome,
    ) -> Self {
        Self {
            source: source.to_string(),
            raw_amount,
            effective_amount: outcome.effective_amount,
            multiplier,
            xp: outcome.state.xp(),
            level: outcome.state.level(),
            xp_to_next_level: outcome.state.xp_to_next_level(),
            leveled_up: outcome.leveled_up,
            levels_gained: outcome.levels_gained,
        }
    }
}

/// Result of a mutating action: its payload, the XP it earned and whether the
/// store accepted the write
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcomeDto<T: Serialize> {
    #[serde(flatten)]
    pub result: T,
    pub award: Option<XpAwardDto>,
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitHabitsResultDto {
    pub completed: Vec<Habit>,
    pub base_xp: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatRecordResultDto {
    pub record: PersonalRecord,
    pub outcome: BeatOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStatusDto {
    pub xp: u32,
    pub level: u32,
    pub threshold: u32,
    pub xp_to_next_level: u32,
    pub progress: f64,
    pub multiplier: f64,
    pub active_streaks: usize,
    pub daily_streak: u32,
    pub last_login_date: Option<String>,
    pub selection: SelectionSummary,
    /// XP the selection would earn with the current multiplier
    pub preview_xp: u32,
    pub habits: Vec<Habit>,
    pub prs: Vec<PersonalRecord>,
    pub todos: Vec<ToDo>,
}
