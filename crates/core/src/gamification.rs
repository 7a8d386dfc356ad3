//! XP → level mapping.

use serde::{Deserialize, Serialize};

/// XP needed to climb one level.
pub const XP_PER_LEVEL: u64 = 500;

/// Level for a given XP total: `floor(xp / 500) + 1`.
#[must_use]
pub fn level_for_xp(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}

/// Where a user sits inside their current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u64,
    pub xp_into_level: u64,
    pub xp_to_next_level: u64,
}

impl LevelProgress {
    #[must_use]
    pub fn for_xp(xp: u64) -> Self {
        let xp_into_level = xp % XP_PER_LEVEL;
        Self {
            level: level_for_xp(xp),
            xp_into_level,
            xp_to_next_level: XP_PER_LEVEL - xp_into_level,
        }
    }

    /// Percentage of the current level already earned.
    #[must_use]
    pub fn percent(&self) -> u8 {
        // xp_into_level < 500, so the result is < 100.
        u8::try_from(self.xp_into_level * 100 / XP_PER_LEVEL).unwrap_or(100)
    }
}
