use serde::{Deserialize, Serialize};

use crate::rewards::RewardEvent;
use crate::shared::{DomainError, TodoId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDo {
    id: TodoId,
    text: String,
    #[serde(default)]
    completed: bool,
}

impl ToDo {
    pub fn new(text: String) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation(
                "To-do text cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: TodoId::new(),
            text: text.trim().to_string(),
            completed: false,
        })
    }

    pub fn restore(id: TodoId, text: String, completed: bool) -> Self {
        Self {
            id,
            text,
            completed,
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flip completion. Only the open -> done transition earns XP.
    pub fn toggle(&mut self) -> Option<RewardEvent> {
        self.completed = !self.completed;
        self.completed.then_some(RewardEvent::TodoCompleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_todo() {
        let todo = ToDo::new(" Buy milk ".to_string()).unwrap();
        assert_eq!(todo.text(), "Buy milk");
        assert!(!todo.is_completed());
    }

    #[test]
    fn test_empty_todo_rejected() {
        assert!(matches!(
            ToDo::new("".to_string()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_toggle_awards_only_on_completion() {
        let mut todo = ToDo::new("Call mom".to_string()).unwrap();

        let first = todo.toggle();
        assert_eq!(first, Some(RewardEvent::TodoCompleted));
        assert_eq!(first.map(|e| e.base_amount()), Some(5));
        assert!(todo.is_completed());

        assert_eq!(todo.toggle(), None);
        assert!(!todo.is_completed());

        // Re-opening and finishing again earns XP again
        assert_eq!(todo.toggle(), Some(RewardEvent::TodoCompleted));
    }
}
