use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::date::lenient_optional_day;
use crate::shared::{DomainError, HabitId};

/// XP a new habit is worth when none is given
pub const DEFAULT_HABIT_XP: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    id: HabitId,
    name: String,
    #[serde(default = "default_habit_xp")]
    xp: u32,
    #[serde(default)]
    streak: u32,
    #[serde(default, with = "lenient_optional_day")]
    last_completed_date: Option<NaiveDate>,
    /// Transient UI flag; always reset when a profile is loaded
    #[serde(default)]
    selected: bool,
}

fn default_habit_xp() -> u32 {
    DEFAULT_HABIT_XP
}

impl Habit {
    pub fn new(name: String, xp: u32) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Habit name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: HabitId::new(),
            name: name.trim().to_string(),
            xp,
            streak: 0,
            last_completed_date: None,
            selected: false,
        })
    }

    pub fn restore(
        id: HabitId,
        name: String,
        xp: u32,
        streak: u32,
        last_completed_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            xp,
            streak,
            last_completed_date,
            selected: false,
        }
    }

    pub fn builder(name: &str, xp: u32) -> HabitBuilder {
        HabitBuilder {
            habit: Self::restore(HabitId::new(), name.to_string(), xp, 0, None),
        }
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_completed_date(&self) -> Option<NaiveDate> {
        self.last_completed_date
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn has_active_streak(&self) -> bool {
        self.streak >= crate::progression::ACTIVE_STREAK_MIN
    }

    pub fn toggle_selection(&mut self) {
        self.selected = !self.selected;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Record a completion on `today` and return the base XP earned.
    ///
    /// Completing the day after the last completion extends the streak, a
    /// repeat on the same day keeps it, anything else starts over at 1.
    pub fn complete_on(&mut self, today: NaiveDate) -> u32 {
        self.streak = match self.last_completed_date {
            Some(last) if last == today => self.streak,
            Some(last) if (today - last).num_days() == 1 => self.streak.saturating_add(1),
            _ => 1,
        };
        self.last_completed_date = Some(today);
        self.selected = false;
        self.xp
    }
}

/// Builder for restoring habits with history, mostly in tests and imports
pub struct HabitBuilder {
    habit: Habit,
}

impl HabitBuilder {
    pub fn id(mut self, id: HabitId) -> Self {
        self.habit.id = id;
        self
    }

    pub fn streak(mut self, streak: u32) -> Self {
        self.habit.streak = streak;
        self
    }

    pub fn last_completed_date(mut self, date: Option<NaiveDate>) -> Self {
        self.habit.last_completed_date = date;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.habit.selected = selected;
        self
    }

    pub fn build(self) -> Habit {
        self.habit
    }
}
