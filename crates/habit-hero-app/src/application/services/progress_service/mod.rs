mod daily_bonus;
mod habits;
mod records;
mod session_state;
mod todos;


pub use session_state::SessionState;

use chrono::Utc;
use log::{error, info, warn};
use serde::Serialize;
use std::sync::Arc;

use habit_hero_domain::events::progress_events::{LeveledUp, XpGained};
use habit_hero_domain::events::{DomainEvent, EventBus};
use habit_hero_domain::habit::HabitBoard;
use habit_hero_domain::profile::{ProfileUpdate, UserDataRepository, UserProfile};
use habit_hero_domain::progression::{StreakMultiplier, XpLedger};
use habit_hero_domain::rewards::RewardEvent;
use habit_hero_domain::shared::date::format_day;
use habit_hero_domain::shared::{DomainError, HabitId};

use crate::application::dtos::{ActionOutcomeDto, ProgressStatusDto, XpAwardDto};

/// Runs user actions against the session's profile.
///
/// Every action updates the in-memory profile first, then writes the changed
/// fields to the store, then publishes its events. A failed write is reported
/// through `persisted: false` and the local state is kept.
pub struct ProgressService {
    repo: Arc<dyn UserDataRepository>,
    event_bus: Arc<dyn EventBus>,
    session: Arc<SessionState>,
}

/// Everything an action produced before it is committed
struct Change<T> {
    result: T,
    award: Option<XpAwardDto>,
    update: ProfileUpdate,
    events: Vec<Box<dyn DomainEvent>>,
}

impl<T> Change<T> {
    fn new(result: T) -> Self {
        Self {
            result,
            award: None,
            update: ProfileUpdate::default(),
            events: Vec::new(),
        }
    }
}

impl ProgressService {
    pub fn new(
        repo: Arc<dyn UserDataRepository>,
        event_bus: Arc<dyn EventBus>,
        session: Arc<SessionState>,
    ) -> Self {
        Self {
            repo,
            event_bus,
            session,
        }
    }

    /// Fetch the user record and make it the session's state
    pub async fn load(&self) -> Result<ProgressStatusDto, DomainError> {
        let profile = self.repo.load().await?.normalized();

        info!(
            "[progress] loaded profile xp={} level={} habits={} prs={} todos={}",
            profile.xp,
            profile.level,
            profile.habits.len(),
            profile.prs.len(),
            profile.todos.len()
        );

        let status = Self::status_of(&profile);
        self.session.replace(profile).await;
        Ok(status)
    }

    pub async fn status(&self) -> Result<ProgressStatusDto, DomainError> {
        self.session
            .with_profile(|profile| Ok(Self::status_of(profile)))
            .await
    }

    /// Status as if `ids` were selected. The session's habits are left as they are.
    pub async fn preview(&self, ids: &[HabitId]) -> Result<ProgressStatusDto, DomainError> {
        self.session
            .with_profile(|profile| {
                for id in ids {
                    profile.habit(id)?;
                }
                let mut habits = profile.habits.clone();
                for habit in habits.iter_mut() {
                    habit.set_selected(ids.contains(habit.id()));
                }

                let mut status = Self::status_of(profile);
                status.selection = HabitBoard::selected_summary(&habits);
                status.preview_xp = HabitBoard::preview_xp(&habits);
                Ok(status)
            })
            .await
    }

    fn status_of(profile: &UserProfile) -> ProgressStatusDto {
        let state = profile.xp_state();
        let multiplier = StreakMultiplier::from_habits(&profile.habits);

        ProgressStatusDto {
            xp: state.xp(),
            level: state.level(),
            threshold: state.threshold(),
            xp_to_next_level: state.xp_to_next_level(),
            progress: state.progress(),
            multiplier: multiplier.as_f64(),
            active_streaks: HabitBoard::active_streaks(&profile.habits).len(),
            daily_streak: profile.daily_streak,
            last_login_date: profile.last_login_date.map(format_day),
            selection: HabitBoard::selected_summary(&profile.habits),
            preview_xp: HabitBoard::preview_xp(&profile.habits),
            habits: profile.habits.clone(),
            prs: profile.prs.clone(),
            todos: profile.todos.clone(),
        }
    }

    /// Credit `event` to the profile and record the XP fields in `change`
    fn apply_reward<T>(
        profile: &mut UserProfile,
        event: RewardEvent,
        multiplier: StreakMultiplier,
        change: &mut Change<T>,
    ) {
        let before = profile.xp_state();
        let outcome = XpLedger::award(before, &event, multiplier);
        profile.set_xp_state(outcome.state);

        let applied_multiplier = if event.uses_streak_multiplier() {
            multiplier
        } else {
            StreakMultiplier::BASE
        };

        info!(
            "[progress] {} awarded {} xp (raw {}, x{}), now level {} with {} xp",
            event.source(),
            outcome.effective_amount,
            event.base_amount(),
            applied_multiplier,
            outcome.state.level(),
            outcome.state.xp()
        );

        let now = Utc::now();
        change.events.push(Box::new(XpGained {
            source: event.source().to_string(),
            raw_amount: event.base_amount(),
            effective_amount: outcome.effective_amount,
            xp: outcome.state.xp(),
            level: outcome.state.level(),
            occurred_at: now,
        }));
        if outcome.leveled_up {
            change.events.push(Box::new(LeveledUp {
                previous_level: before.level(),
                new_level: outcome.state.level(),
                levels_gained: outcome.levels_gained,
                occurred_at: now,
            }));
        }

        change.award = Some(XpAwardDto::from_outcome(
            event.source(),
            event.base_amount(),
            applied_multiplier.as_f64(),
            &outcome,
        ));

        let progress = ProfileUpdate::progress(outcome.state);
        change.update.xp = progress.xp;
        change.update.level = progress.level;
    }

    /// Persist and publish what an action changed. Called after the session
    /// lock is released.
    async fn commit<T: Serialize>(&self, change: Change<T>) -> ActionOutcomeDto<T> {
        let persisted = self.persist(&change.update).await;

        for event in change.events {
            let name = event.event_type_name();
            if let Err(e) = self.event_bus.publish(event).await {
                warn!("[progress] failed to publish {}: {}", name, e);
            }
        }

        ActionOutcomeDto {
            result: change.result,
            award: change.award,
            persisted,
        }
    }

    async fn persist(&self, update: &ProfileUpdate) -> bool {
        if update.is_empty() {
            return true;
        }

        match self.repo.save(update).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "[progress] failed to save progress, keeping local state: {}",
                    e.format_with_code()
                );
                false
            }
        }
    }
}
