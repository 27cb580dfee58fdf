use habit_hero_domain::daily_bonus::DailyBonusCalculator;
use habit_hero_domain::progression::{MultiplierMode, StreakMultiplier, XpLedger, XpState};
use habit_hero_domain::shared::DomainError;

use crate::application::dtos::{
    DailyBonusRequestDto, DailyBonusResponseDto, XpLedgerRequestDto, XpLedgerResponseDto,
};

/// The two pure computations, exposed with their JSON shapes
pub struct CalculatorQueryService;

impl CalculatorQueryService {
    pub fn apply_xp(request: &XpLedgerRequestDto) -> Result<XpLedgerResponseDto, DomainError> {
        let state = XpState::new(request.xp, request.level)?;
        let mode = if request.bypass_multiplier {
            MultiplierMode::Bypass
        } else {
            MultiplierMode::Apply(StreakMultiplier::from_habits(&request.habits))
        };

        let outcome = XpLedger::apply_delta(state, request.raw_amount, mode);

        Ok(XpLedgerResponseDto {
            xp: outcome.state.xp(),
            level: outcome.state.level(),
            leveled_up: outcome.leveled_up,
            effective_amount: outcome.effective_amount,
            levels_gained: outcome.levels_gained,
        })
    }

    pub fn daily_bonus(
        request: &DailyBonusRequestDto,
    ) -> Result<DailyBonusResponseDto, DomainError> {
        let bonus = DailyBonusCalculator::evaluate_str(
            request.last_login_date.as_deref(),
            &request.current_date,
            request.current_streak,
        )?;

        Ok(DailyBonusResponseDto {
            new_streak: bonus.new_streak,
            bonus_xp: bonus.bonus_xp,
            show_bonus: bonus.show_bonus,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xp_request(json: &str) -> XpLedgerRequestDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_apply_xp_levels_up() {
        let response = CalculatorQueryService::apply_xp(&xp_request(
            r#"{ "xp": 95, "level": 1, "habits": [], "rawAmount": 10, "bypassMultiplier": false }"#,
        ))
        .unwrap();

        assert_eq!(
            response,
            XpLedgerResponseDto {
                xp: 5,
                level: 2,
                leveled_up: true,
                effective_amount: 10,
                levels_gained: 1,
            }
        );
    }

    #[test]
    fn test_apply_xp_uses_habit_streaks() {
        let request = xp_request(
            r#"{
                "xp": 0, "level": 1, "rawAmount": 10,
                "habits": [
                    { "id": "a", "name": "Read", "xp": 10, "streak": 3 },
                    { "id": "b", "name": "Run", "xp": 10, "streak": 2 },
                    { "id": "c", "name": "Cook", "xp": 10, "streak": 1 }
                ]
            }"#,
        );
        let response = CalculatorQueryService::apply_xp(&request).unwrap();
        assert_eq!(response.effective_amount, 12);
        assert_eq!(response.xp, 12);

        let bypass = XpLedgerRequestDto {
            bypass_multiplier: true,
            ..request
        };
        assert_eq!(
            CalculatorQueryService::apply_xp(&bypass).unwrap().effective_amount,
            10
        );
    }

    #[test]
    fn test_apply_xp_rejects_level_zero() {
        let request = xp_request(r#"{ "level": 0, "rawAmount": 5 }"#);
        let result = CalculatorQueryService::apply_xp(&request);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_apply_xp_rejects_level_above_max() {
        let request = xp_request(r#"{ "level": 4294967295, "rawAmount": 4294967295 }"#);
        let result = CalculatorQueryService::apply_xp(&request);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_daily_bonus_shapes() {
        let request: DailyBonusRequestDto = serde_json::from_str(
            r#"{ "lastLoginDate": "2024-01-01", "currentDate": "2024-01-02", "currentStreak": 3 }"#,
        )
        .unwrap();
        let response = CalculatorQueryService::daily_bonus(&request).unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "newStreak": 4, "bonusXp": 25, "showBonus": true })
        );
    }

    #[test]
    fn test_daily_bonus_rejects_malformed_current_date() {
        let request = DailyBonusRequestDto {
            last_login_date: None,
            current_date: "tomorrow".to_string(),
            current_streak: 0,
        };
        assert!(matches!(
            CalculatorQueryService::daily_bonus(&request),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
