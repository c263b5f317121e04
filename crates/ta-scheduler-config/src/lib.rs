//! Configuration system for the TA scheduler.
//!
//! Load solver configuration from TOML or YAML to choose the search
//! strategy, rule set, termination and acceptor without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use ta_scheduler_config::{SolverConfig, Strategy};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     strategy = "local_search"
//!     rule_set = "tabriz"
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     unimproved_seconds_spent_limit = 5
//!
//!     [local_search.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, Strategy::LocalSearch);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.rule_set, "tabriz");
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use ta_scheduler_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ta_scheduler_core::ConstraintParameters;
use thiserror::Error;


/// Time limit applied when no termination bound is configured at all.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Late acceptance history length used when none is configured.
pub const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Search strategy.
    #[serde(default)]
    pub strategy: Strategy,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Key into the rule-set registry.
    #[serde(default = "default_rule_set")]
    pub rule_set: String,

    /// Score director implementation.
    #[serde(default)]
    pub score_director: ScoreDirectorType,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Construction heuristic used to seed both strategies.
    #[serde(default)]
    pub construction: ConstructionHeuristicType,

    /// Local search settings, used by [`Strategy::LocalSearch`].
    #[serde(default)]
    pub local_search: LocalSearchConfig,

    /// Branch-and-bound settings, used by [`Strategy::Exact`].
    #[serde(default)]
    pub exhaustive: ExhaustiveSearchConfig,

    /// Overrides for the soft rule weights of every submitted timetable.
    #[serde(default)]
    pub weights: Option<WeightsConfig>,

    /// Refuse to solve when the feasibility pre-check reports warnings.
    #[serde(default)]
    pub treat_warnings_as_fatal: bool,

    /// Number of jobs the manager solves at the same time.
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,
}

fn default_rule_set() -> String {
    "default".to_string()
}

fn default_max_concurrent_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            random_seed: None,
            rule_set: default_rule_set(),
            score_director: ScoreDirectorType::default(),
            termination: None,
            construction: ConstructionHeuristicType::default(),
            local_search: LocalSearchConfig::default(),
            exhaustive: ExhaustiveSearchConfig::default(),
            weights: None,
            treat_warnings_as_fatal: false,
            max_concurrent_jobs: default_max_concurrent_jobs(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`SolverConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_jobs == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent_jobs must be at least 1".to_string(),
            ));
        }
        if self.rule_set.trim().is_empty() {
            return Err(ConfigError::Invalid("rule_set must not be empty".to_string()));
        }
        if self.local_search.accepted_count_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "accepted_count_limit must be at least 1".to_string(),
            ));
        }
        if let Some(acceptor) = &self.local_search.acceptor {
            acceptor.validate()?;
        }
        if let Some(weights) = &self.weights {
            weights.validate()?;
        }
        Ok(())
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the unimproved time limit in milliseconds.
    pub fn with_unimproved_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            unimproved_millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the step count limit.
    pub fn with_step_count_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the rule-set key.
    pub fn with_rule_set(mut self, rule_set: impl Into<String>) -> Self {
        self.rule_set = rule_set.into();
        self
    }

    /// Sets the score director implementation.
    pub fn with_score_director(mut self, score_director: ScoreDirectorType) -> Self {
        self.score_director = score_director;
        self
    }

    /// Sets the local search acceptor.
    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.local_search.acceptor = Some(acceptor);
        self
    }

    /// Sets the soft rule weight overrides.
    pub fn with_weights(mut self, weights: WeightsConfig) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Sets the number of concurrently solved jobs.
    pub fn with_max_concurrent_jobs(mut self, jobs: usize) -> Self {
        self.max_concurrent_jobs = jobs;
        self
    }

    /// Returns the effective wall-clock limit.
    ///
    /// Falls back to [`DEFAULT_TIME_LIMIT`] when no termination bound of any
    /// kind is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use ta_scheduler_config::{SolverConfig, DEFAULT_TIME_LIMIT};
    /// use std::time::Duration;
    ///
    /// assert_eq!(SolverConfig::new().time_limit(), Some(DEFAULT_TIME_LIMIT));
    ///
    /// let config = SolverConfig::new().with_step_count_limit(100);
    /// assert_eq!(config.time_limit(), None);
    ///
    /// let config = SolverConfig::new().with_termination_millis(1500);
    /// assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        match &self.termination {
            Some(t) if t.is_bounded() => t.time_limit(),
            _ => Some(DEFAULT_TIME_LIMIT),
        }
    }

    /// Returns the unimproved time limit, if configured.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.termination
            .as_ref()
            .and_then(|t| t.unimproved_time_limit())
    }

    /// Returns the step count limit, if configured.
    pub fn step_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.step_count_limit)
    }

    /// Applies the weight overrides, if any, to `parameters`.
    pub fn parameters(&self, parameters: ConstraintParameters) -> ConstraintParameters {
        match &self.weights {
            Some(weights) => weights.apply(parameters),
            None => parameters,
        }
    }
}

/// Search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Construction heuristic followed by local search.
    #[default]
    LocalSearch,

    /// Construction heuristic followed by branch and bound.
    Exact,
}

/// Score director implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirectorType {
    /// Re-scores only the keys a changed slot touches.
    #[default]
    Incremental,

    /// Recalculates the full score on every request.
    Simple,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds.
    pub millis_spent_limit: Option<u64>,

    /// Maximum seconds without improvement.
    pub unimproved_seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds without improvement, added to the seconds.
    pub unimproved_millis_spent_limit: Option<u64>,

    /// Maximum number of steps over all phases.
    pub step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        combine(self.seconds_spent_limit, self.millis_spent_limit)
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        combine(
            self.unimproved_seconds_spent_limit,
            self.unimproved_millis_spent_limit,
        )
    }

    /// Whether any bound is set.
    pub fn is_bounded(&self) -> bool {
        self.time_limit().is_some()
            || self.unimproved_time_limit().is_some()
            || self.step_count_limit.is_some()
    }
}

fn combine(seconds: Option<u64>, millis: Option<u64>) -> Option<Duration> {
    if seconds.is_none() && millis.is_none() {
        return None;
    }
    Some(Duration::from_secs(seconds.unwrap_or(0)) + Duration::from_millis(millis.unwrap_or(0)))
}

/// Construction heuristic types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// Take the first eligible TA in candidate order, without scoring.
    FirstFit,

    /// Take the best scoring TA for each slot.
    #[default]
    BestFit,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Acceptor configuration, late acceptance when absent.
    pub acceptor: Option<AcceptorConfig>,

    /// Maximum number of accepted moves to evaluate per step.
    pub accepted_count_limit: Option<usize>,
}

impl LocalSearchConfig {
    /// Configured acceptor or late acceptance with the default size.
    pub fn acceptor_or_default(&self) -> AcceptorConfig {
        self.acceptor
            .clone()
            .unwrap_or(AcceptorConfig::LateAcceptance(LateAcceptanceConfig::default()))
    }

    /// Configured limit, or 1 for every acceptor but tabu search, which
    /// needs a wider neighbourhood per step.
    pub fn accepted_count_limit_or_default(&self) -> usize {
        self.accepted_count_limit
            .unwrap_or(match self.acceptor_or_default() {
                AcceptorConfig::TabuSearch(_) => 1000,
                _ => 1,
            })
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (only accept non-worsening moves).
    HillClimbing,

    /// Tabu search acceptor.
    TabuSearch(TabuSearchConfig),

    /// Simulated annealing acceptor.
    SimulatedAnnealing(SimulatedAnnealingConfig),

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),
}

impl AcceptorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            AcceptorConfig::LateAcceptance(c) if c.late_acceptance_size == Some(0) => Err(
                ConfigError::Invalid("late_acceptance_size must be at least 1".to_string()),
            ),
            AcceptorConfig::TabuSearch(c) if c.slot_tabu_size == Some(0) => Err(
                ConfigError::Invalid("slot_tabu_size must be at least 1".to_string()),
            ),
            AcceptorConfig::SimulatedAnnealing(c) => {
                if c.starting_temperature.is_some_and(|t| t <= 0.0) {
                    return Err(ConfigError::Invalid(
                        "starting_temperature must be positive".to_string(),
                    ));
                }
                if c.cooling_rate.is_some_and(|r| r <= 0.0 || r > 1.0) {
                    return Err(ConfigError::Invalid(
                        "cooling_rate must be in (0, 1]".to_string(),
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Tabu search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TabuSearchConfig {
    /// Number of recent steps whose changed slots stay tabu.
    pub slot_tabu_size: Option<usize>,
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature, in soft score units.
    pub starting_temperature: Option<f64>,

    /// Geometric cooling factor applied after every step.
    pub cooling_rate: Option<f64>,
}

/// Late acceptance configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of late acceptance list.
    pub late_acceptance_size: Option<usize>,
}

/// Exhaustive search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExhaustiveSearchConfig {
    /// Maximum number of branch-and-bound nodes to expand.
    pub node_limit: Option<u64>,
}

/// Soft rule weight overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WeightsConfig {
    /// Reward per TA placed on a desired shift.
    pub desired_assignment_reward: Option<i64>,

    /// Penalty per TA placed on an undesired shift.
    pub undesired_assignment_penalty: Option<i64>,

    /// Penalty per staffed shift lacking a grad and undergrad mix.
    pub missing_grad_penalty: Option<i64>,
}

impl WeightsConfig {
    /// Replaces the overridden fields of `parameters`.
    pub fn apply(&self, parameters: ConstraintParameters) -> ConstraintParameters {
        ConstraintParameters {
            desired_assignment_reward: self
                .desired_assignment_reward
                .unwrap_or(parameters.desired_assignment_reward),
            undesired_assignment_penalty: self
                .undesired_assignment_penalty
                .unwrap_or(parameters.undesired_assignment_penalty),
            missing_grad_penalty: self
                .missing_grad_penalty
                .unwrap_or(parameters.missing_grad_penalty),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("desired_assignment_reward", self.desired_assignment_reward),
            ("undesired_assignment_penalty", self.undesired_assignment_penalty),
            ("missing_grad_penalty", self.missing_grad_penalty),
        ];
        for (name, value) in weights {
            if value.is_some_and(|v| v < 0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative")));
            }
        }
        Ok(())
    }
}
