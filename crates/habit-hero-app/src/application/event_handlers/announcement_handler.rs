use async_trait::async_trait;
use log::info;
use std::sync::{Arc, Mutex};

use habit_hero_domain::events::event_bus::EventHandler;
use habit_hero_domain::events::progress_events::*;
use habit_hero_domain::shared::DomainError;

/// Messages queued for the user, drained by the presentation layer
#[derive(Debug, Clone, Default)]
pub struct Announcements {
    messages: Arc<Mutex<Vec<String>>>,
}

impl Announcements {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, message: String) -> Result<(), DomainError> {
        self.messages
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("Announcements lock poisoned: {}", e)))?
            .push(message);
        Ok(())
    }

    pub fn drain(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut messages) => std::mem::take(&mut *messages),
            Err(_) => Vec::new(),
        }
    }
}

/// Turns milestone events into user-facing announcements
#[derive(Clone)]
pub struct AnnouncementEventHandler {
    announcements: Announcements,
}

impl AnnouncementEventHandler {
    pub fn new(announcements: Announcements) -> Self {
        Self { announcements }
    }
}

#[async_trait]
impl EventHandler<LeveledUp> for AnnouncementEventHandler {
    async fn handle(&self, event: &LeveledUp) -> Result<(), DomainError> {
        info!(
            "Handling LeveledUp event: {} -> {}",
            event.previous_level, event.new_level
        );

        let message = if event.levels_gained > 1 {
            format!(
                "Level up! {} levels at once, you are now level {}",
                event.levels_gained, event.new_level
            )
        } else {
            format!("Level up! You are now level {}", event.new_level)
        };
        self.announcements.push(message)
    }
}

#[async_trait]
impl EventHandler<DailyBonusGranted> for AnnouncementEventHandler {
    async fn handle(&self, event: &DailyBonusGranted) -> Result<(), DomainError> {
        info!(
            "Handling DailyBonusGranted event for {} (streak {})",
            event.day, event.streak
        );

        self.announcements.push(format!(
            "Daily bonus: +{} XP ({}-day streak)",
            event.bonus_xp, event.streak
        ))
    }
}

#[async_trait]
impl EventHandler<PersonalRecordBeaten> for AnnouncementEventHandler {
    async fn handle(&self, event: &PersonalRecordBeaten) -> Result<(), DomainError> {
        info!("Handling PersonalRecordBeaten event for {}", event.record_id);

        self.announcements.push(format!(
            "New personal record for {}: {} (was {})",
            event.name, event.current, event.previous
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_level_up_announcement() {
        let announcements = Announcements::new();
        let handler = AnnouncementEventHandler::new(announcements.clone());

        handler
            .handle(&LeveledUp {
                previous_level: 1,
                new_level: 2,
                levels_gained: 1,
                occurred_at: Utc::now(),
            })
            .await
            .unwrap();
        handler
            .handle(&LeveledUp {
                previous_level: 2,
                new_level: 5,
                levels_gained: 3,
                occurred_at: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(
            announcements.drain(),
            vec![
                "Level up! You are now level 2".to_string(),
                "Level up! 3 levels at once, you are now level 5".to_string(),
            ]
        );
        assert!(announcements.drain().is_empty());
    }

    #[tokio::test]
    async fn test_daily_bonus_announcement() {
        let announcements = Announcements::new();
        let handler = AnnouncementEventHandler::new(announcements.clone());

        handler
            .handle(&DailyBonusGranted {
                day: chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                streak: 4,
                bonus_xp: 25,
                occurred_at: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(
            announcements.drain(),
            vec!["Daily bonus: +25 XP (4-day streak)".to_string()]
        );
    }
}
