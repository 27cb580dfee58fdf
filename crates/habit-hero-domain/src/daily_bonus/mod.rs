mod domain_service;
mod value_objects;

pub use domain_service::{
    DailyBonusCalculator, BASE_BONUS_XP, MAX_BONUS_XP, STREAK_BONUS_PER_DAY,
};
pub use value_objects::{DailyBonus, DailyLoginState};
