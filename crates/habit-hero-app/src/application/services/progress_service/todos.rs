use habit_hero_domain::progression::StreakMultiplier;
use habit_hero_domain::shared::{DomainError, TodoId};
use habit_hero_domain::todo::ToDo;

use super::{Change, ProgressService};
use crate::application::dtos::ActionOutcomeDto;

impl ProgressService {
    pub async fn add_todo(&self, text: String) -> Result<ActionOutcomeDto<ToDo>, DomainError> {
        let todo = ToDo::new(text)?;

        let change = self
            .session
            .with_profile(|profile| {
                profile.todos.push(todo.clone());
                let mut change = Change::new(todo);
                change.update = change.update.with_todos(&profile.todos);
                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }

    /// Flip a to-do; only finishing it earns XP
    pub async fn toggle_todo(&self, id: &TodoId) -> Result<ActionOutcomeDto<ToDo>, DomainError> {
        let change = self
            .session
            .with_profile(|profile| {
                let todo = profile.todo_mut(id)?;
                let reward = todo.toggle();
                let mut change = Change::new(todo.clone());

                if let Some(reward) = reward {
                    Self::apply_reward(profile, reward, StreakMultiplier::BASE, &mut change);
                }
                change.update = change.update.with_todos(&profile.todos);

                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }
}
