//! Score, line, and level bookkeeping

/// Points per lock by number of rows cleared, before the level multiplier
pub const SCORE_PER_LINE: [u64; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row descended with a soft drop
pub const SOFT_DROP_POINTS: u64 = 1;
/// Points per row descended with a hard drop
pub const HARD_DROP_POINTS: u64 = 2;

/// Scoring calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starting at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
        }
    }

    /// Record a lock that cleared `cleared` rows and return points awarded
    ///
    /// The award uses the level in effect before these lines count.
    /// More than four rows in one lock earns the four-row award.
    pub fn add_clear(&mut self, cleared: u32) -> u64 {
        if cleared == 0 {
            return 0;
        }
        let index = (cleared as usize).min(SCORE_PER_LINE.len() - 1);
        let award = SCORE_PER_LINE[index] * self.level as u64;
        self.points += award;
        self.lines += cleared;

        // Level follows cumulative lines and never goes down
        let level = self.lines / LINES_PER_LEVEL + 1;
        if level > self.level {
            tracing::debug!(new_level = level, lines = self.lines, "level up");
            self.level = level;
        }
        award
    }

    /// Add score for soft drop (1 point per cell)
    pub fn add_soft_drop(&mut self, cells: u32) {
        self.points += cells as u64 * SOFT_DROP_POINTS;
    }

    /// Add score for hard drop (2 points per cell)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * HARD_DROP_POINTS;
    }
}
