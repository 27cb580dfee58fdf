use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::RecordId;

macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Fired whenever XP is credited, including zero-effect awards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpGained {
    pub source: String,
    pub raw_amount: u32,
    pub effective_amount: u32,
    pub xp: u32,
    pub level: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(XpGained);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeveledUp {
    pub previous_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(LeveledUp);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBonusGranted {
    pub day: NaiveDate,
    pub streak: u32,
    pub bonus_xp: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(DailyBonusGranted);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecordBeaten {
    pub record_id: RecordId,
    pub name: String,
    pub previous: f64,
    pub current: f64,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(PersonalRecordBeaten);
