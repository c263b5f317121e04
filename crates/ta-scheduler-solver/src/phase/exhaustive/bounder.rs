//! Score bounders for branch-and-bound pruning.

use std::fmt::Debug;

use ta_scheduler_core::HardMediumSoftScore;
use ta_scheduler_scoring::ScoreDirector;

/// Computes an optimistic bound: no completion of the current partial
/// timetable may score above it.
pub trait ScoreBounder: Send + Debug {
    /// Bound after `remaining` more slots are decided; `None` disables
    /// pruning at this node.
    fn optimistic_bound<D: ScoreDirector + ?Sized>(
        &self,
        score_director: &mut D,
        remaining: usize,
    ) -> Option<HardMediumSoftScore>;
}

/// Current score plus the most each rule can still recover.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScoreBounder;

impl RuleScoreBounder {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreBounder for RuleScoreBounder {
    fn optimistic_bound<D: ScoreDirector + ?Sized>(
        &self,
        score_director: &mut D,
        remaining: usize,
    ) -> Option<HardMediumSoftScore> {
        Some(score_director.optimistic_bound(remaining))
    }
}

/// Never prunes; every node of the tree is visited.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScoreBounder;

impl ScoreBounder for NoScoreBounder {
    fn optimistic_bound<D: ScoreDirector + ?Sized>(
        &self,
        _score_director: &mut D,
        _remaining: usize,
    ) -> Option<HardMediumSoftScore> {
        None
    }
}
