use chrono::{NaiveDate, Utc};
use log::info;

use habit_hero_domain::daily_bonus::{DailyBonus, DailyBonusCalculator};
use habit_hero_domain::events::progress_events::DailyBonusGranted;
use habit_hero_domain::progression::StreakMultiplier;
use habit_hero_domain::rewards::RewardEvent;
use habit_hero_domain::shared::DomainError;

use super::{Change, ProgressService};
use crate::application::dtos::ActionOutcomeDto;

impl ProgressService {
    /// Grant the login bonus for `today`. A second claim on the same day
    /// changes nothing.
    pub async fn claim_daily_bonus(
        &self,
        today: NaiveDate,
    ) -> Result<ActionOutcomeDto<DailyBonus>, DomainError> {
        let change = self
            .session
            .with_profile(|profile| {
                let login = profile.login_state();
                let bonus =
                    DailyBonusCalculator::evaluate(login.last_login_date, today, login.streak);
                let mut change = Change::new(bonus);

                if !bonus.show_bonus {
                    info!("[daily_bonus] already claimed for {}", today);
                    return Ok(change);
                }

                let reward = RewardEvent::DailyLogin {
                    bonus_xp: bonus.bonus_xp,
                };
                Self::apply_reward(profile, reward, StreakMultiplier::BASE, &mut change);

                let next = bonus.next_state(today);
                profile.set_login_state(next);
                change.update = change.update.with_login(next);

                change.events.push(Box::new(DailyBonusGranted {
                    day: today,
                    streak: bonus.new_streak,
                    bonus_xp: bonus.bonus_xp,
                    occurred_at: Utc::now(),
                }));

                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }
}
