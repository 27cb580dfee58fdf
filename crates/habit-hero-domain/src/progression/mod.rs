mod ledger;
mod level_table;
mod multiplier;
mod value_objects;


pub use ledger::XpLedger;
pub use level_table::{LevelTable, BASE_THRESHOLD, MAX_LEVEL, THRESHOLD_STEP};
pub use multiplier::{StreakMultiplier, ACTIVE_STREAK_MIN};
pub use value_objects::{LedgerOutcome, MultiplierMode, XpState};
