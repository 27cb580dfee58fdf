use chrono::NaiveDate;
use log::{debug, warn};

use super::value_objects::DailyBonus;
use crate::shared::date::{parse_day, parse_day_lenient};
use crate::shared::DomainError;

/// XP granted for any rewarded login
pub const BASE_BONUS_XP: u32 = 10;

/// Extra XP per consecutive day beyond the first
pub const STREAK_BONUS_PER_DAY: u32 = 5;

/// Total bonus cap (reached from a 9-day streak)
pub const MAX_BONUS_XP: u32 = 50;

/// Daily login bonus rules
/// Pure domain logic; the caller applies `bonus_xp` and persists the new streak
pub struct DailyBonusCalculator;

impl DailyBonusCalculator {
    pub fn evaluate(
        last_login_date: Option<NaiveDate>,
        current_date: NaiveDate,
        current_streak: u32,
    ) -> DailyBonus {
        let (new_streak, show_bonus) = match last_login_date {
            None => (1, true),
            Some(last) => match (current_date - last).num_days() {
                1 => (current_streak.saturating_add(1), true),
                0 => (current_streak, false),
                diff => {
                    if diff < 0 {
                        warn!(
                            "[daily_bonus] last login {} is after today {}, resetting streak",
                            last, current_date
                        );
                    }
                    (1, true)
                }
            },
        };

        let bonus_xp = Self::bonus_for_streak(new_streak);

        debug!(
            "[daily_bonus] last={:?} today={} streak={} -> new_streak={} bonus={} show={}",
            last_login_date, current_date, current_streak, new_streak, bonus_xp, show_bonus
        );

        DailyBonus {
            new_streak,
            bonus_xp,
            show_bonus,
        }
    }

    /// String boundary: a malformed last login counts as no previous login,
    /// a malformed current date is rejected.
    pub fn evaluate_str(
        last_login_date: Option<&str>,
        current_date: &str,
        current_streak: u32,
    ) -> Result<DailyBonus, DomainError> {
        let today = parse_day(current_date)?;
        let last = parse_day_lenient(last_login_date);
        Ok(Self::evaluate(last, today, current_streak))
    }

    /// `10 + min((streak - 1) * 5, 40)`
    pub fn bonus_for_streak(streak: u32) -> u32 {
        let streak_bonus = streak
            .saturating_sub(1)
            .saturating_mul(STREAK_BONUS_PER_DAY)
            .min(MAX_BONUS_XP - BASE_BONUS_XP);
        BASE_BONUS_XP + streak_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn test_first_login() {
        let bonus = DailyBonusCalculator::evaluate(None, day("2024-01-01"), 0);
        assert_eq!(bonus.new_streak, 1);
        assert_eq!(bonus.bonus_xp, 10);
        assert!(bonus.show_bonus);
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let bonus = DailyBonusCalculator::evaluate_str(Some("2024-01-01"), "2024-01-02", 3).unwrap();
        assert_eq!(bonus.new_streak, 4);
        assert_eq!(bonus.bonus_xp, 25);
        assert!(bonus.show_bonus);
    }

    #[test]
    fn test_same_day_keeps_streak_without_bonus() {
        let bonus = DailyBonusCalculator::evaluate_str(Some("2024-01-01"), "2024-01-01", 3).unwrap();
        assert_eq!(bonus.new_streak, 3);
        assert!(!bonus.show_bonus);
    }

    #[test]
    fn test_gap_resets_streak() {
        let bonus = DailyBonusCalculator::evaluate_str(Some("2024-01-01"), "2024-01-10", 5).unwrap();
        assert_eq!(bonus.new_streak, 1);
        assert_eq!(bonus.bonus_xp, 10);
        assert!(bonus.show_bonus);
    }

    #[test]
    fn test_future_last_login_resets_streak() {
        let bonus = DailyBonusCalculator::evaluate(Some(day("2024-01-05")), day("2024-01-04"), 7);
        assert_eq!(bonus.new_streak, 1);
        assert!(bonus.show_bonus);
    }

    #[test]
    fn test_month_and_year_boundaries_are_consecutive() {
        let bonus = DailyBonusCalculator::evaluate(Some(day("2023-12-31")), day("2024-01-01"), 1);
        assert_eq!(bonus.new_streak, 2);

        let bonus = DailyBonusCalculator::evaluate(Some(day("2024-02-28")), day("2024-02-29"), 2);
        assert_eq!(bonus.new_streak, 3);
    }

    #[test]
    fn test_bonus_is_capped_at_fifty() {
        assert_eq!(DailyBonusCalculator::bonus_for_streak(1), 10);
        assert_eq!(DailyBonusCalculator::bonus_for_streak(9), 50);
        assert_eq!(DailyBonusCalculator::bonus_for_streak(10), 50);
        assert_eq!(DailyBonusCalculator::bonus_for_streak(u32::MAX), 50);
    }

    #[test]
    fn test_malformed_last_login_is_treated_as_absent() {
        let bonus = DailyBonusCalculator::evaluate_str(Some("not-a-date"), "2024-01-02", 8).unwrap();
        assert_eq!(bonus.new_streak, 1);
        assert!(bonus.show_bonus);
    }

    #[test]
    fn test_malformed_current_date_is_rejected() {
        let result = DailyBonusCalculator::evaluate_str(Some("2024-01-01"), "02.01.2024", 1);
        match result {
            Err(DomainError::InvalidInput(msg)) => assert!(msg.contains("02.01.2024")),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_next_state_records_today() {
        let today = day("2024-03-04");
        let bonus = DailyBonusCalculator::evaluate(None, today, 0);
        let state = bonus.next_state(today);
        assert_eq!(state.last_login_date, Some(today));
        assert_eq!(state.streak, 1);
    }
}
