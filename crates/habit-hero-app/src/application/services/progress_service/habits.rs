use chrono::NaiveDate;

use habit_hero_domain::habit::{Habit, HabitBoard, DEFAULT_HABIT_XP};
use habit_hero_domain::shared::{DomainError, HabitId};

use super::{Change, ProgressService};
use crate::application::dtos::{ActionOutcomeDto, SubmitHabitsResultDto};

impl ProgressService {
    pub async fn add_habit(
        &self,
        name: String,
        xp: Option<u32>,
    ) -> Result<ActionOutcomeDto<Habit>, DomainError> {
        let habit = Habit::new(name, xp.unwrap_or(DEFAULT_HABIT_XP))?;

        let change = self
            .session
            .with_profile(|profile| {
                profile.habits.push(habit.clone());
                let mut change = Change::new(habit);
                change.update = change.update.with_habits(&profile.habits);
                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }

    /// Check off exactly `ids` on `today`.
    ///
    /// The multiplier is taken from the streaks as they were before this
    /// submission.
    pub async fn submit_habits(
        &self,
        ids: &[HabitId],
        today: NaiveDate,
    ) -> Result<ActionOutcomeDto<SubmitHabitsResultDto>, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::Validation("No habits selected".to_string()));
        }

        let change = self
            .session
            .with_profile(|profile| {
                let submission = HabitBoard::submit(&mut profile.habits, ids, today)?;

                let completed = profile
                    .habits
                    .iter()
                    .filter(|habit| submission.completed.contains(habit.id()))
                    .cloned()
                    .collect();

                let mut change = Change::new(SubmitHabitsResultDto {
                    completed,
                    base_xp: submission.base_xp,
                });
                Self::apply_reward(
                    profile,
                    submission.reward_event(),
                    submission.multiplier,
                    &mut change,
                );
                change.update = change.update.with_habits(&profile.habits);

                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }
}
