mod repository;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::daily_bonus::DailyLoginState;
use crate::habit::{Habit, HabitBoard};
use crate::progression::XpState;
use crate::record::PersonalRecord;
use crate::shared::date::lenient_optional_day;
use crate::shared::{DomainError, HabitId, RecordId, TodoId};
use crate::todo::ToDo;

pub use repository::UserDataRepository;

/// Full user record as kept by the user-data store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient_count")]
    pub xp: u32,
    #[serde(default = "first_level", deserialize_with = "lenient_level")]
    pub level: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub habits: Vec<Habit>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prs: Vec<PersonalRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub todos: Vec<ToDo>,
    #[serde(default, with = "lenient_optional_day")]
    pub last_login_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub daily_streak: u32,
}

fn first_level() -> u32 {
    1
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A counter as the store may hand it back: negative, fractional or too large
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCount {
    Integer(i64),
    Float(f64),
}

impl StoredCount {
    /// Clamp into `0..=u32::MAX`, dropping any fraction
    fn clamped(self) -> u32 {
        match self {
            StoredCount::Integer(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
            StoredCount::Float(n) => n as u32,
        }
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StoredCount>::deserialize(deserializer)?.map_or(0, StoredCount::clamped))
}

fn lenient_level<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StoredCount>::deserialize(deserializer)?.map_or(1, StoredCount::clamped))
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            habits: Vec::new(),
            prs: Vec::new(),
            todos: Vec::new(),
            last_login_date: None,
            daily_streak: 0,
        }
    }
}

impl UserProfile {
    /// Clean a freshly loaded profile: clear transient selections and bring
    /// xp/level back inside the level invariant.
    pub fn normalized(mut self) -> Self {
        HabitBoard::reset_selections(&mut self.habits);
        self.set_xp_state(XpState::restore(self.xp, self.level));
        self
    }

    pub fn xp_state(&self) -> XpState {
        XpState::restore(self.xp, self.level)
    }

    pub fn set_xp_state(&mut self, state: XpState) {
        self.xp = state.xp();
        self.level = state.level();
    }

    pub fn login_state(&self) -> DailyLoginState {
        DailyLoginState {
            last_login_date: self.last_login_date,
            streak: self.daily_streak,
        }
    }

    pub fn set_login_state(&mut self, state: DailyLoginState) {
        self.last_login_date = state.last_login_date;
        self.daily_streak = state.streak;
    }

    pub fn record_mut(&mut self, id: &RecordId) -> Result<&mut PersonalRecord, DomainError> {
        self.prs
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| DomainError::RecordNotFound(id.to_string()))
    }

    pub fn todo_mut(&mut self, id: &TodoId) -> Result<&mut ToDo, DomainError> {
        self.todos
            .iter_mut()
            .find(|todo| todo.id() == id)
            .ok_or_else(|| DomainError::TodoNotFound(id.to_string()))
    }

    pub fn habit(&self, id: &HabitId) -> Result<&Habit, DomainError> {
        self.habits
            .iter()
            .find(|habit| habit.id() == id)
            .ok_or_else(|| DomainError::HabitNotFound(id.to_string()))
    }

    /// Merge a partial update the way the store does
    pub fn merge(&mut self, update: &ProfileUpdate) {
        if let Some(xp) = update.xp {
            self.xp = xp;
        }
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(habits) = &update.habits {
            self.habits = habits.clone();
        }
        if let Some(prs) = &update.prs {
            self.prs = prs.clone();
        }
        if let Some(todos) = &update.todos {
            self.todos = todos.clone();
        }
        if let Some(date) = update.last_login_date {
            self.last_login_date = Some(date);
        }
        if let Some(streak) = update.daily_streak {
            self.daily_streak = streak;
        }
    }
}

/// Partial user record; only present fields are sent and merged server-side
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habits: Option<Vec<Habit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prs: Option<Vec<PersonalRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<ToDo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_streak: Option<u32>,
}

impl ProfileUpdate {
    pub fn progress(state: XpState) -> Self {
        Self {
            xp: Some(state.xp()),
            level: Some(state.level()),
            ..Self::default()
        }
    }

    pub fn with_habits(mut self, habits: &[Habit]) -> Self {
        self.habits = Some(habits.to_vec());
        self
    }

    pub fn with_records(mut self, prs: &[PersonalRecord]) -> Self {
        self.prs = Some(prs.to_vec());
        self
    }

    pub fn with_todos(mut self, todos: &[ToDo]) -> Self {
        self.todos = Some(todos.to_vec());
        self
    }

    pub fn with_login(mut self, state: DailyLoginState) -> Self {
        self.last_login_date = state.last_login_date;
        self.daily_streak = Some(state.streak);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_record_uses_defaults() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, UserProfile::default());

        let profile: UserProfile =
            serde_json::from_str(r#"{ "xp": null, "level": null, "habits": null }"#).unwrap();
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 1);
        assert!(profile.habits.is_empty());
    }

    #[test]
    fn test_full_store_record() {
        let json = r#"{
            "xp": 40,
            "level": 3,
            "habits": [{ "id": 1, "name": "Read", "xp": 10, "streak": 2,
                         "lastCompletedDate": "2024-01-01", "selected": true }],
            "prs": [{ "id": 2, "name": "Squat", "current": 100, "unit": "kg" }],
            "todos": [{ "id": 3, "text": "Plan week", "completed": true }],
            "lastLoginDate": "2024-01-02",
            "dailyStreak": 4
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        let profile = profile.normalized();

        assert_eq!(profile.xp_state().level(), 3);
        assert_eq!(profile.habits.len(), 1);
        assert!(!profile.habits[0].is_selected());
        assert_eq!(profile.prs[0].unit(), "kg");
        assert!(profile.todos[0].is_completed());
        assert_eq!(profile.login_state().streak, 4);
        assert!(profile.last_login_date.is_some());
    }

    #[test]
    fn test_out_of_range_counters_are_clamped() {
        let profile: UserProfile =
            serde_json::from_str(r#"{ "xp": -5, "level": 2.0, "dailyStreak": 3.7 }"#).unwrap();
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.daily_streak, 3);

        let profile: UserProfile =
            serde_json::from_str(r#"{ "xp": 12.0, "level": -1, "dailyStreak": 1e20 }"#).unwrap();
        assert_eq!(profile.xp, 12);
        assert_eq!(profile.daily_streak, u32::MAX);
        assert_eq!(profile.normalized().xp_state(), XpState::restore(12, 1));

        let profile: UserProfile =
            serde_json::from_str(r#"{ "xp": 4294967295, "level": 4294967295 }"#).unwrap();
        let state = profile.normalized().xp_state();
        assert_eq!(state.level(), crate::progression::MAX_LEVEL);
        assert!(state.xp() < state.threshold());
    }

    #[test]
    fn test_malformed_last_login_loads_as_absent() {
        let profile: UserProfile =
            serde_json::from_str(r#"{ "lastLoginDate": "sometime" }"#).unwrap();
        assert!(profile.last_login_date.is_none());
    }

    #[test]
    fn test_normalized_repairs_out_of_range_xp() {
        let profile = UserProfile {
            xp: 150,
            level: 0,
            ..UserProfile::default()
        }
        .normalized();

        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 50);
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let update = ProfileUpdate::progress(XpState::new(5, 2).unwrap());
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "xp": 5, "level": 2 }));

        let login = DailyLoginState {
            last_login_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            streak: 4,
        };
        let json = serde_json::to_value(ProfileUpdate::default().with_login(login)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "lastLoginDate": "2024-01-02", "dailyStreak": 4 })
        );
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_merge_applies_only_present_fields() {
        let mut profile = UserProfile {
            xp: 10,
            daily_streak: 2,
            ..UserProfile::default()
        };
        profile.merge(&ProfileUpdate {
            xp: Some(20),
            ..ProfileUpdate::default()
        });

        assert_eq!(profile.xp, 20);
        assert_eq!(profile.daily_streak, 2);
    }

    #[test]
    fn test_lookups_report_missing_ids() {
        let mut profile = UserProfile::default();
        assert!(matches!(
            profile.record_mut(&RecordId::from_string("x")),
            Err(DomainError::RecordNotFound(_))
        ));
        assert!(matches!(
            profile.todo_mut(&TodoId::from_string("x")),
            Err(DomainError::TodoNotFound(_))
        ));
        assert!(matches!(
            profile.habit(&HabitId::from_string("x")),
            Err(DomainError::HabitNotFound(_))
        ));
    }
}
