use serde::{Deserialize, Serialize};

use crate::rewards::{RewardEvent, RECORD_BEAT_XP};
use crate::shared::{DomainError, RecordId};

/// Unit a new record uses when none is given
pub const DEFAULT_RECORD_UNIT: &str = "reps";

/// A user-tracked best performance in an arbitrary unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    id: RecordId,
    name: String,
    current: f64,
    #[serde(default = "default_unit")]
    unit: String,
}

fn default_unit() -> String {
    DEFAULT_RECORD_UNIT.to_string()
}

/// Answer to a "beat" attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BeatOutcome {
    Accepted { previous: f64, current: f64, xp: u32 },
    /// The candidate did not exceed the record; nothing changed and no XP is due
    Rejected { current: f64, candidate: f64 },
}

impl BeatOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BeatOutcome::Accepted { .. })
    }

    pub fn reward_event(&self) -> Option<RewardEvent> {
        match self {
            BeatOutcome::Accepted { .. } => Some(RewardEvent::RecordBeaten),
            BeatOutcome::Rejected { .. } => None,
        }
    }
}

impl PersonalRecord {
    pub fn new(name: String, value: f64, unit: Option<String>) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Record name cannot be empty".to_string(),
            ));
        }

        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::Validation(format!(
                "Record value must be a non-negative number, got {}",
                value
            )));
        }

        let unit = unit
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(default_unit);

        Ok(Self {
            id: RecordId::new(),
            name: name.trim().to_string(),
            current: value,
            unit,
        })
    }

    pub fn restore(id: RecordId, name: String, current: f64, unit: String) -> Self {
        Self {
            id,
            name,
            current,
            unit,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Matching a record leaves it unchanged
    pub fn tie(&self) -> RewardEvent {
        RewardEvent::RecordTied
    }

    /// Replace the record if `candidate` is strictly higher
    pub fn beat(&mut self, candidate: f64) -> BeatOutcome {
        if !candidate.is_finite() || candidate <= self.current {
            return BeatOutcome::Rejected {
                current: self.current,
                candidate,
            };
        }

        let previous = self.current;
        self.current = candidate;

        BeatOutcome::Accepted {
            previous,
            current: candidate,
            xp: RECORD_BEAT_XP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench_press() -> PersonalRecord {
        PersonalRecord::new("Bench press".to_string(), 80.0, Some("kg".to_string())).unwrap()
    }

    #[test]
    fn test_create_record_defaults_unit() {
        let record = PersonalRecord::new("Push-ups".to_string(), 30.0, None).unwrap();
        assert_eq!(record.unit(), "reps");

        let record = PersonalRecord::new("Push-ups".to_string(), 30.0, Some("  ".to_string())).unwrap();
        assert_eq!(record.unit(), "reps");
    }

    #[test]
    fn test_create_record_rejects_invalid_input() {
        assert!(PersonalRecord::new("".to_string(), 1.0, None).is_err());
        assert!(PersonalRecord::new("Run".to_string(), -1.0, None).is_err());
        assert!(PersonalRecord::new("Run".to_string(), f64::NAN, None).is_err());
    }

    #[test]
    fn test_beat_with_higher_value() {
        let mut record = bench_press();
        let outcome = record.beat(85.0);

        assert_eq!(
            outcome,
            BeatOutcome::Accepted {
                previous: 80.0,
                current: 85.0,
                xp: 50
            }
        );
        assert_eq!(record.current(), 85.0);
        assert_eq!(outcome.reward_event(), Some(RewardEvent::RecordBeaten));
    }

    #[test]
    fn test_beat_with_equal_or_lower_value_is_rejected() {
        let mut record = bench_press();

        for candidate in [80.0, 79.5, f64::NAN] {
            let outcome = record.beat(candidate);
            assert!(!outcome.is_accepted());
            assert!(outcome.reward_event().is_none());
            assert_eq!(record.current(), 80.0);
        }
    }

    #[test]
    fn test_tie_keeps_record() {
        let record = bench_press();
        assert_eq!(record.tie(), RewardEvent::RecordTied);
        assert_eq!(record.current(), 80.0);
    }

    #[test]
    fn test_deserialize_stored_record() {
        let json = r#"{ "id": 1700000000000, "name": "Plank", "current": 90, "unit": "sec" }"#;
        let record: PersonalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.current(), 90.0);
        assert_eq!(record.unit(), "sec");
    }
}
