/// XP needed to clear level 1
pub const BASE_THRESHOLD: u32 = 100;

/// Extra XP needed for every level above 1
pub const THRESHOLD_STEP: u32 = 10;

/// Highest reachable level; XP stops accumulating once it is reached
pub const MAX_LEVEL: u32 = 100_000;

/// Maps a level to the XP required to advance from it.
pub struct LevelTable;

impl LevelTable {
    /// `100 + (level - 1) * 10`. Levels below 1 are a caller bug; they are
    /// treated as level 1 in release builds.
    pub fn threshold(level: u32) -> u32 {
        debug_assert!(level >= 1, "level must be at least 1, got {}", level);
        BASE_THRESHOLD.saturating_add(level.saturating_sub(1).saturating_mul(THRESHOLD_STEP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_levels() {
        assert_eq!(LevelTable::threshold(1), 100);
        assert_eq!(LevelTable::threshold(2), 110);
        assert_eq!(LevelTable::threshold(10), 190);
    }

    #[test]
    fn test_threshold_fits_at_max_level() {
        assert_eq!(LevelTable::threshold(MAX_LEVEL), 100 + (MAX_LEVEL - 1) * 10);
        assert_eq!(LevelTable::threshold(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_threshold_matches_formula_up_to_100() {
        for level in 1..=100u32 {
            assert_eq!(LevelTable::threshold(level), 100 + (level - 1) * 10);
            if level > 1 {
                assert!(LevelTable::threshold(level) > LevelTable::threshold(level - 1));
            }
        }
    }
}
