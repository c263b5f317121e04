//! Solver statistics collection and reporting.
//!
//! Tracks move counts, step counts, timing and the score progression of a
//! single solve.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use ta_scheduler_core::HardMediumSoftScore;

/// Statistics for a single solver phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStatistics {
    /// Index of this phase (0-based).
    pub phase_index: usize,
    /// Type name of the phase (e.g., "ConstructionHeuristic", "LocalSearch").
    pub phase_type: String,
    pub duration: Duration,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    pub starting_score: Option<HardMediumSoftScore>,
    pub ending_score: Option<HardMediumSoftScore>,
}

impl PhaseStatistics {
    pub fn new(phase_index: usize, phase_type: impl Into<String>) -> Self {
        Self {
            phase_index,
            phase_type: phase_type.into(),
            duration: Duration::ZERO,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            starting_score: None,
            ending_score: None,
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Record of a new best score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreImprovement {
    /// Time since solving started when the improvement occurred.
    pub time_offset: Duration,
    pub step_count: u64,
    pub score: HardMediumSoftScore,
}

/// Complete statistics for a solver run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    pub total_duration: Duration,
    pub total_step_count: u64,
    pub total_moves_evaluated: u64,
    pub total_moves_accepted: u64,
    /// Branch-and-bound nodes visited.
    pub nodes_explored: u64,
    pub phase_statistics: Vec<PhaseStatistics>,
    pub score_history: Vec<ScoreImprovement>,
}

impl SolverStatistics {
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_moves_evaluated == 0 {
            0.0
        } else {
            self.total_moves_accepted as f64 / self.total_moves_evaluated as f64
        }
    }

    pub fn phase_count(&self) -> usize {
        self.phase_statistics.len()
    }

    /// Returns the best score achieved (last in history, or None).
    pub fn best_score(&self) -> Option<&HardMediumSoftScore> {
        self.score_history.last().map(|s| &s.score)
    }

    pub fn improvement_count(&self) -> usize {
        self.score_history.len()
    }
}

/// Thread-safe collector for solver statistics.
///
/// Record during solving, then call `snapshot()` or `into_statistics()`.
#[derive(Debug)]
pub struct StatisticsCollector {
    start_time: Instant,
    moves_evaluated: AtomicU64,
    moves_accepted: AtomicU64,
    step_count: AtomicU64,
    nodes_explored: AtomicU64,
    phases: Mutex<Vec<PhaseStatistics>>,
    score_history: Mutex<Vec<ScoreImprovement>>,
}

impl StatisticsCollector {
    /// Creates a collector; the start time is recorded now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            moves_evaluated: AtomicU64::new(0),
            moves_accepted: AtomicU64::new(0),
            step_count: AtomicU64::new(0),
            nodes_explored: AtomicU64::new(0),
            phases: Mutex::new(Vec::new()),
            score_history: Mutex::new(Vec::new()),
        }
    }

    /// Records a move evaluation, and its acceptance when `accepted`.
    pub fn record_move(&self, accepted: bool) {
        self.moves_evaluated.fetch_add(1, Ordering::Relaxed);
        if accepted {
            self.moves_accepted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_step(&self) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_node(&self) {
        self.nodes_explored.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a new best score.
    pub fn record_improvement(&self, score: HardMediumSoftScore) {
        let improvement = ScoreImprovement {
            time_offset: self.start_time.elapsed(),
            step_count: self.step_count.load(Ordering::Relaxed),
            score,
        };
        self.score_history.lock().push(improvement);
    }

    /// Starts a new phase and returns its index.
    pub fn start_phase(&self, phase_type: impl Into<String>) -> usize {
        let mut phases = self.phases.lock();
        let index = phases.len();
        phases.push(PhaseStatistics::new(index, phase_type));
        index
    }

    /// Stores the final counters of a phase started with `start_phase`.
    pub fn end_phase(&self, phase_index: usize, ended: PhaseStatistics) {
        if let Some(phase) = self.phases.lock().get_mut(phase_index) {
            *phase = PhaseStatistics {
                phase_index,
                ..ended
            };
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn current_step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    pub fn current_moves_evaluated(&self) -> u64 {
        self.moves_evaluated.load(Ordering::Relaxed)
    }

    pub fn current_moves_accepted(&self) -> u64 {
        self.moves_accepted.load(Ordering::Relaxed)
    }

    pub fn current_nodes_explored(&self) -> u64 {
        self.nodes_explored.load(Ordering::Relaxed)
    }

    /// Takes a snapshot of current statistics without consuming the collector.
    pub fn snapshot(&self) -> SolverStatistics {
        SolverStatistics {
            total_duration: self.start_time.elapsed(),
            total_step_count: self.current_step_count(),
            total_moves_evaluated: self.current_moves_evaluated(),
            total_moves_accepted: self.current_moves_accepted(),
            nodes_explored: self.current_nodes_explored(),
            phase_statistics: self.phases.lock().clone(),
            score_history: self.score_history.lock().clone(),
        }
    }

    pub fn into_statistics(self) -> SolverStatistics {
        SolverStatistics {
            total_duration: self.start_time.elapsed(),
            total_step_count: self.step_count.into_inner(),
            total_moves_evaluated: self.moves_evaluated.into_inner(),
            total_moves_accepted: self.moves_accepted.into_inner(),
            nodes_explored: self.nodes_explored.into_inner(),
            phase_statistics: self.phases.into_inner(),
            score_history: self.score_history.into_inner(),
        }
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_statistics_acceptance_rate() {
        let mut stats = PhaseStatistics::new(0, "LocalSearch");
        assert_eq!(stats.acceptance_rate(), 0.0);
        stats.moves_evaluated = 100;
        stats.moves_accepted = 25;
        assert!((stats.acceptance_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_collector_record_move() {
        let collector = StatisticsCollector::new();
        collector.record_move(true);
        collector.record_move(false);
        collector.record_move(true);

        assert_eq!(collector.current_moves_evaluated(), 3);
        assert_eq!(collector.current_moves_accepted(), 2);
    }

    #[test]
    fn test_collector_record_improvement() {
        let collector = StatisticsCollector::new();
        collector.record_step();
        collector.record_improvement(HardMediumSoftScore::of(-2, 0, 0));
        collector.record_step();
        collector.record_improvement(HardMediumSoftScore::of(0, -1, 3));

        let stats = collector.into_statistics();
        assert_eq!(stats.improvement_count(), 2);
        assert_eq!(stats.score_history[1].step_count, 2);
        assert_eq!(stats.best_score(), Some(&HardMediumSoftScore::of(0, -1, 3)));
    }

    #[test]
    fn test_collector_phases() {
        let collector = StatisticsCollector::new();
        let first = collector.start_phase("ConstructionHeuristic");
        let second = collector.start_phase("LocalSearch");
        assert_eq!((first, second), (0, 1));

        collector.end_phase(
            second,
            PhaseStatistics {
                step_count: 40,
                moves_evaluated: 100,
                moves_accepted: 40,
                ..PhaseStatistics::new(99, "LocalSearch")
            },
        );

        let stats = collector.snapshot();
        assert_eq!(stats.phase_count(), 2);
        assert_eq!(stats.phase_statistics[1].phase_index, 1);
        assert_eq!(stats.phase_statistics[1].step_count, 40);
        assert_eq!(stats.phase_statistics[0].step_count, 0);
    }
}
