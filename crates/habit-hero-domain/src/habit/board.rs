use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use super::aggregate::Habit;
use crate::progression::StreakMultiplier;
use crate::rewards::RewardEvent;
use crate::shared::{DomainError, HabitId};

/// Count and base XP of the habits currently selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SelectionSummary {
    pub count: usize,
    pub base_xp: u32,
}

/// Result of checking off the selected habits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitSubmission {
    pub completed: Vec<HabitId>,
    pub base_xp: u32,
    /// Multiplier in effect before this submission updated any streak
    pub multiplier: StreakMultiplier,
}

impl HabitSubmission {
    pub fn reward_event(&self) -> RewardEvent {
        RewardEvent::HabitSubmission {
            base_xp: self.base_xp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Operations over a user's habit collection
pub struct HabitBoard;

impl HabitBoard {
    pub fn selected_summary(habits: &[Habit]) -> SelectionSummary {
        habits
            .iter()
            .filter(|habit| habit.is_selected())
            .fold(SelectionSummary::default(), |acc, habit| SelectionSummary {
                count: acc.count + 1,
                base_xp: acc.base_xp.saturating_add(habit.xp()),
            })
    }

    /// XP the current selection would earn right now
    pub fn preview_xp(habits: &[Habit]) -> u32 {
        let summary = Self::selected_summary(habits);
        StreakMultiplier::from_habits(habits).apply(summary.base_xp)
    }

    pub fn active_streaks(habits: &[Habit]) -> Vec<&Habit> {
        habits
            .iter()
            .filter(|habit| habit.has_active_streak())
            .collect()
    }

    pub fn reset_selections(habits: &mut [Habit]) {
        for habit in habits.iter_mut() {
            habit.set_selected(false);
        }
    }

    /// Complete every selected habit on `today`.
    pub fn submit_selected(habits: &mut [Habit], today: NaiveDate) -> HabitSubmission {
        let multiplier = StreakMultiplier::from_habits(habits);
        let mut completed = Vec::new();
        let mut base_xp = 0u32;

        for habit in habits.iter_mut().filter(|habit| habit.is_selected()) {
            base_xp = base_xp.saturating_add(habit.complete_on(today));
            completed.push(habit.id().clone());
        }

        info!(
            "[habits] submitted count={} base_xp={} multiplier={}",
            completed.len(),
            base_xp,
            multiplier
        );

        HabitSubmission {
            completed,
            base_xp,
            multiplier,
        }
    }

    /// Select exactly `ids` and complete them. Unknown ids fail before anything changes.
    pub fn submit(
        habits: &mut [Habit],
        ids: &[HabitId],
        today: NaiveDate,
    ) -> Result<HabitSubmission, DomainError> {
        if let Some(missing) = ids
            .iter()
            .find(|id| !habits.iter().any(|habit| habit.id() == *id))
        {
            return Err(DomainError::HabitNotFound(missing.to_string()));
        }

        for habit in habits.iter_mut() {
            let selected = ids.contains(habit.id());
            habit.set_selected(selected);
        }

        Ok(Self::submit_selected(habits, today))
    }
}
