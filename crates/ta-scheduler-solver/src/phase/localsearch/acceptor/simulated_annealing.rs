//! Simulated annealing acceptor.

use rand::rngs::StdRng;
use rand::Rng;

use ta_scheduler_core::HardMediumSoftScore;

use super::Acceptor;
use crate::heuristic::AssignmentMove;

/// Weight of one hard point when flattening a score difference.
const HARD_WEIGHT: f64 = 10_000.0;
/// Weight of one medium point when flattening a score difference.
const MEDIUM_WEIGHT: f64 = 100.0;

/// Simulated annealing: improving moves always pass, worsening moves pass
/// with probability `exp(delta / T)`.
///
/// `delta` flattens the three score levels into one number (hard weighs
/// 10 000, medium 100, soft 1). The temperature cools geometrically after
/// every step.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    cooling_rate: f64,
}

impl SimulatedAnnealingAcceptor {
    pub const DEFAULT_STARTING_TEMPERATURE: f64 = 20.0;
    pub const DEFAULT_COOLING_RATE: f64 = 0.999;

    /// # Arguments
    /// * `starting_temperature` - Initial temperature (higher = more exploration)
    /// * `cooling_rate` - Multiplicative decay per step (e.g., 0.999)
    pub fn new(starting_temperature: f64, cooling_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            cooling_rate,
        }
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }

    fn flatten(diff: HardMediumSoftScore) -> f64 {
        diff.hard() as f64 * HARD_WEIGHT + diff.medium() as f64 * MEDIUM_WEIGHT + diff.soft() as f64
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_STARTING_TEMPERATURE,
            Self::DEFAULT_COOLING_RATE,
        )
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
        _mv: &AssignmentMove,
        rng: &mut StdRng,
    ) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        if self.current_temperature <= f64::EPSILON {
            return false;
        }
        let delta = Self::flatten(*move_score - *last_step_score);
        let probability = (delta / self.current_temperature).exp();
        rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &HardMediumSoftScore) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &HardMediumSoftScore, _step_move: &AssignmentMove) {
        self.current_temperature *= self.cooling_rate;
    }
}
