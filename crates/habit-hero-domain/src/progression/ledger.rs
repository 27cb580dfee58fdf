use log::{debug, warn};

use super::multiplier::StreakMultiplier;
use super::value_objects::{LedgerOutcome, MultiplierMode, XpState};
use crate::rewards::RewardEvent;

/// Applies XP deltas to an experience state
pub struct XpLedger;

impl XpLedger {
    /// Apply a raw XP amount to `state`.
    ///
    /// Negative amounts are clamped to zero. A single large award can clear
    /// several levels; overflow XP carries into each next level until
    /// `MAX_LEVEL`.
    pub fn apply_delta(state: XpState, raw_amount: i64, mode: MultiplierMode) -> LedgerOutcome {
        let raw = if raw_amount < 0 {
            warn!("[ledger] negative xp amount={} clamped to 0", raw_amount);
            0
        } else {
            u32::try_from(raw_amount).unwrap_or(u32::MAX)
        };

        let effective_amount = match mode {
            MultiplierMode::Apply(multiplier) => multiplier.apply(raw),
            MultiplierMode::Bypass => raw,
        };

        let total = u64::from(state.xp()) + u64::from(effective_amount);
        let (new_state, levels_gained) = XpState::carry(total, state.level());

        debug!(
            "[ledger] applied raw={} effective={} xp={} level={} levels_gained={}",
            raw,
            effective_amount,
            new_state.xp(),
            new_state.level(),
            levels_gained
        );

        LedgerOutcome {
            state: new_state,
            leveled_up: levels_gained > 0,
            levels_gained,
            effective_amount,
        }
    }

    /// Apply a reward event; only habit submissions go through the multiplier
    pub fn award(
        state: XpState,
        event: &RewardEvent,
        multiplier: StreakMultiplier,
    ) -> LedgerOutcome {
        let mode = if event.uses_streak_multiplier() {
            MultiplierMode::Apply(multiplier)
        } else {
            MultiplierMode::Bypass
        };
        Self::apply_delta(state, i64::from(event.base_amount()), mode)
    }
}
