use chrono::Utc;
use log::info;

use habit_hero_domain::events::progress_events::PersonalRecordBeaten;
use habit_hero_domain::progression::StreakMultiplier;
use habit_hero_domain::record::{BeatOutcome, PersonalRecord};
use habit_hero_domain::shared::{DomainError, RecordId};

use super::{Change, ProgressService};
use crate::application::dtos::{ActionOutcomeDto, BeatRecordResultDto};

impl ProgressService {
    pub async fn add_record(
        &self,
        name: String,
        value: f64,
        unit: Option<String>,
    ) -> Result<ActionOutcomeDto<PersonalRecord>, DomainError> {
        let record = PersonalRecord::new(name, value, unit)?;

        let change = self
            .session
            .with_profile(|profile| {
                profile.prs.push(record.clone());
                let mut change = Change::new(record);
                change.update = change.update.with_records(&profile.prs);
                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }

    /// Matching a record earns XP and leaves the record as it is
    pub async fn tie_record(
        &self,
        id: &RecordId,
    ) -> Result<ActionOutcomeDto<PersonalRecord>, DomainError> {
        let change = self
            .session
            .with_profile(|profile| {
                let record = profile.record_mut(id)?;
                let reward = record.tie();
                let mut change = Change::new(record.clone());

                Self::apply_reward(profile, reward, StreakMultiplier::BASE, &mut change);
                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }

    /// Raise a record to `candidate`; anything not strictly higher is rejected
    /// without changes
    pub async fn beat_record(
        &self,
        id: &RecordId,
        candidate: f64,
    ) -> Result<ActionOutcomeDto<BeatRecordResultDto>, DomainError> {
        let change = self
            .session
            .with_profile(|profile| {
                let record = profile.record_mut(id)?;
                let outcome = record.beat(candidate);
                let record = record.clone();

                let mut change = Change::new(BeatRecordResultDto {
                    record: record.clone(),
                    outcome,
                });

                let (BeatOutcome::Accepted { previous, current, .. }, Some(reward)) =
                    (outcome, outcome.reward_event())
                else {
                    info!(
                        "[records] {} not beaten: {} <= {}",
                        record.name(),
                        candidate,
                        record.current()
                    );
                    return Ok(change);
                };

                Self::apply_reward(profile, reward, StreakMultiplier::BASE, &mut change);
                change.update = change.update.with_records(&profile.prs);
                change.events.push(Box::new(PersonalRecordBeaten {
                    record_id: record.id().clone(),
                    name: record.name().to_string(),
                    previous,
                    current,
                    occurred_at: Utc::now(),
                }));

                Ok(change)
            })
            .await?;

        Ok(self.commit(change).await)
    }
}
