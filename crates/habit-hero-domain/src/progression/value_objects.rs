use serde::Serialize;

use super::level_table::{LevelTable, MAX_LEVEL};
use super::multiplier::StreakMultiplier;
use crate::shared::DomainError;

/// Experience state of a user.
///
/// Holds `0 <= xp < threshold(level)` and `1 <= level <= MAX_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XpState {
    xp: u32,
    level: u32,
}

impl XpState {
    /// Validated constructor for a state that must already satisfy the invariant
    pub fn new(xp: u32, level: u32) -> Result<Self, DomainError> {
        if level < 1 {
            return Err(DomainError::InvalidInput(format!(
                "Level must be at least 1, got {}",
                level
            )));
        }
        if level > MAX_LEVEL {
            return Err(DomainError::InvalidInput(format!(
                "Level must be at most {}, got {}",
                MAX_LEVEL, level
            )));
        }

        let threshold = LevelTable::threshold(level);
        if xp >= threshold {
            return Err(DomainError::InvalidInput(format!(
                "XP {} exceeds the threshold {} of level {}",
                xp, threshold, level
            )));
        }

        Ok(Self { xp, level })
    }

    /// Restore state from persistence.
    ///
    /// Stored values come from an external store, so a level of 0 becomes 1,
    /// a level above `MAX_LEVEL` becomes `MAX_LEVEL` and any surplus XP is
    /// rolled into further levels.
    pub fn restore(xp: u32, level: u32) -> Self {
        let (state, _) = Self::carry(u64::from(xp), level.clamp(1, MAX_LEVEL));
        state
    }

    /// Roll `xp` over level thresholds starting at `level`.
    ///
    /// Returns the resulting state and the number of levels cleared. At
    /// `MAX_LEVEL` the surplus is dropped and xp stays one short of the
    /// threshold.
    pub(crate) fn carry(mut xp: u64, mut level: u32) -> (Self, u32) {
        let mut levels_gained = 0u32;
        let mut xp_needed = u64::from(LevelTable::threshold(level));

        while level < MAX_LEVEL && xp >= xp_needed {
            xp -= xp_needed;
            level += 1;
            levels_gained += 1;
            xp_needed = u64::from(LevelTable::threshold(level));
        }

        // threshold(MAX_LEVEL) <= u32::MAX, so the cap fits in u32
        let xp = xp.min(xp_needed - 1) as u32;
        (Self { xp, level }, levels_gained)
    }

    pub fn initial() -> Self {
        Self { xp: 0, level: 1 }
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// XP required to clear the current level
    pub fn threshold(&self) -> u32 {
        LevelTable::threshold(self.level)
    }

    pub fn xp_to_next_level(&self) -> u32 {
        self.threshold() - self.xp
    }

    /// Progress within the current level (0.0 - 1.0)
    pub fn progress(&self) -> f64 {
        f64::from(self.xp) / f64::from(self.threshold())
    }
}

impl Default for XpState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Whether an award passes through the streak multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierMode {
    Apply(StreakMultiplier),
    Bypass,
}

/// Result of applying an XP delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerOutcome {
    pub state: XpState,
    pub leveled_up: bool,
    pub levels_gained: u32,
    pub effective_amount: u32,
}
