use std::collections::BTreeMap;

use thiserror::Error;

use super::Rule;

/// Key of the rule set used when none is configured.
pub const DEFAULT_RULE_SET: &str = "default";

/// Lookup of a rule set name that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule set '{name}', expected one of: {}", known.join(", "))]
pub struct UnknownRuleSet {
    pub name: String,
    pub known: Vec<String>,
}

/// A named, ordered list of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Coverage, double-booking and unavailability (hard), quotas (medium),
    /// preferences (soft).
    pub fn standard() -> Self {
        Self::new(
            DEFAULT_RULE_SET,
            vec![
                Rule::ShiftCoverage,
                Rule::DuplicateAssignment,
                Rule::UnavailableShift,
                Rule::SemesterQuota,
                Rule::WeeklyOverAssignment,
                Rule::WeeklyUnderAssignment,
                Rule::UndesiredShift,
                Rule::DesiredShift,
            ],
        )
    }

    /// Standard rules with the semester quota made hard and exact.
    pub fn strict() -> Self {
        let rules = Self::standard()
            .rules
            .into_iter()
            .map(|rule| match rule {
                Rule::SemesterQuota => Rule::SemesterQuotaExact,
                other => other,
            })
            .collect();
        Self::new("strict", rules)
    }

    /// Standard rules plus a grad and undergrad mix on every staffed shift.
    pub fn tabriz() -> Self {
        Self::standard()
            .renamed("tabriz")
            .with_rule(Rule::GradStudentPresence)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    /// Appends `rule` unless it is already present.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        if !self.contains(rule) {
            self.rules.push(rule);
        }
        self
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Maps configuration keys to rule sets.
///
/// Adding an edition means registering another list.
///
/// # Examples
///
/// ```
/// use ta_scheduler_scoring::{Rule, RuleSet, RuleSetRegistry};
///
/// let mut registry = RuleSetRegistry::builtin();
/// registry.register(RuleSet::new("coverage-only", vec![Rule::ShiftCoverage]));
///
/// assert_eq!(registry.get("coverage-only").unwrap().len(), 1);
/// assert!(registry.get("default").unwrap().contains(Rule::DesiredShift));
/// assert!(registry.get("missing").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RuleSetRegistry {
    sets: BTreeMap<String, RuleSet>,
}

impl RuleSetRegistry {
    pub fn empty() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Registry holding `default`, `strict` and `tabriz`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(RuleSet::standard());
        registry.register(RuleSet::strict());
        registry.register(RuleSet::tabriz());
        registry
    }

    /// Adds or replaces the set stored under its own name.
    pub fn register(&mut self, set: RuleSet) {
        self.sets.insert(set.name().to_string(), set);
    }

    pub fn get(&self, name: &str) -> Result<&RuleSet, UnknownRuleSet> {
        self.sets.get(name).ok_or_else(|| UnknownRuleSet {
            name: name.to_string(),
            known: self.sets.keys().cloned().collect(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}

impl Default for RuleSetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
