use serde::Serialize;

/// XP for matching a personal record
pub const RECORD_TIE_XP: u32 = 25;

/// XP for beating a personal record
pub const RECORD_BEAT_XP: u32 = 50;

/// XP for completing a to-do
pub const TODO_COMPLETION_XP: u32 = 5;

/// User actions that award XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardEvent {
    /// Sum of the `xp` of every habit checked off in one submission
    HabitSubmission { base_xp: u32 },
    RecordTied,
    RecordBeaten,
    TodoCompleted,
    DailyLogin { bonus_xp: u32 },
}

impl RewardEvent {
    pub fn base_amount(&self) -> u32 {
        match self {
            RewardEvent::HabitSubmission { base_xp } => *base_xp,
            RewardEvent::RecordTied => RECORD_TIE_XP,
            RewardEvent::RecordBeaten => RECORD_BEAT_XP,
            RewardEvent::TodoCompleted => TODO_COMPLETION_XP,
            RewardEvent::DailyLogin { bonus_xp } => *bonus_xp,
        }
    }

    /// Only habit submissions are scaled by the streak multiplier
    pub fn uses_streak_multiplier(&self) -> bool {
        matches!(self, RewardEvent::HabitSubmission { .. })
    }

    pub fn source(&self) -> &'static str {
        match self {
            RewardEvent::HabitSubmission { .. } => "habit submission",
            RewardEvent::RecordTied => "tie PR",
            RewardEvent::RecordBeaten => "beat PR",
            RewardEvent::TodoCompleted => "toggle todo",
            RewardEvent::DailyLogin { .. } => "daily login",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_amounts() {
        assert_eq!(RewardEvent::RecordTied.base_amount(), 25);
        assert_eq!(RewardEvent::RecordBeaten.base_amount(), 50);
        assert_eq!(RewardEvent::TodoCompleted.base_amount(), 5);
        assert_eq!(RewardEvent::HabitSubmission { base_xp: 30 }.base_amount(), 30);
    }

    #[test]
    fn test_only_habits_use_multiplier() {
        assert!(RewardEvent::HabitSubmission { base_xp: 1 }.uses_streak_multiplier());
        assert!(!RewardEvent::RecordTied.uses_streak_multiplier());
        assert!(!RewardEvent::RecordBeaten.uses_streak_multiplier());
        assert!(!RewardEvent::TodoCompleted.uses_streak_multiplier());
        assert!(!RewardEvent::DailyLogin { bonus_xp: 10 }.uses_streak_multiplier());
    }
}
