use std::fmt;

use crate::habit::Habit;

/// Habits at or above this streak count as an active streak
pub const ACTIVE_STREAK_MIN: u32 = 2;

/// Bonus factor applied to habit-submission XP.
///
/// Stored in tenths so `1 + 0.1 * n` stays exact: 10 is 1.0x, 15 is the 1.5x cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreakMultiplier {
    tenths: u32,
}

impl StreakMultiplier {
    pub const BASE: Self = Self { tenths: 10 };
    pub const MAX: Self = Self { tenths: 15 };

    /// `min(1 + 0.1 * n, 1.5)` where `n` is the number of habits with an active streak.
    pub fn from_habits(habits: &[Habit]) -> Self {
        let active = habits
            .iter()
            .filter(|habit| habit.streak() >= ACTIVE_STREAK_MIN)
            .count();
        Self::from_active_streaks(active)
    }

    pub fn from_active_streaks(active: usize) -> Self {
        let bonus = u32::try_from(active)
            .unwrap_or(u32::MAX)
            .min(Self::MAX.tenths - Self::BASE.tenths);
        Self {
            tenths: Self::BASE.tenths + bonus,
        }
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// Scale an amount, rounding halves away from zero.
    pub fn apply(&self, amount: u32) -> u32 {
        let scaled = (u64::from(amount) * u64::from(self.tenths) + 5) / 10;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

impl Default for StreakMultiplier {
    fn default() -> Self {
        Self::BASE
    }
}

impl fmt::Display for StreakMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}x", self.tenths / 10, self.tenths % 10)
    }
}
