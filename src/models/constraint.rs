//! Scheduling constraints.
//!
//! Hard constraints are per-subject forbidden slots. Soft preferences are
//! accepted from the request layer and carried through to the result but
//! do not contribute to the penalty.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Subject name → forbidden slot names.
///
/// A subject without an entry has no restriction. Never mutated while a
/// schedule is being computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintMap {
    forbidden: HashMap<String, HashSet<String>>,
}

impl ConstraintMap {
    /// Creates an empty constraint map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbids a slot for a subject.
    pub fn with_forbidden(mut self, subject: impl Into<String>, slot: impl Into<String>) -> Self {
        self.forbid(subject, slot);
        self
    }

    /// Forbids several slots for a subject.
    pub fn with_forbidden_slots<I, S>(mut self, subject: impl Into<String>, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.forbidden.entry(subject.into()).or_default();
        entry.extend(slots.into_iter().map(Into::into));
        self
    }

    /// Forbids a slot for a subject (in place).
    pub fn forbid(&mut self, subject: impl Into<String>, slot: impl Into<String>) {
        self.forbidden
            .entry(subject.into())
            .or_default()
            .insert(slot.into());
    }

    /// Forbidden slots of a subject, if any.
    pub fn forbidden_for(&self, subject: &str) -> Option<&HashSet<String>> {
        self.forbidden.get(subject)
    }

    /// Whether `slot` is forbidden for `subject`.
    pub fn is_forbidden(&self, subject: &str, slot: &str) -> bool {
        self.forbidden
            .get(subject)
            .is_some_and(|slots| slots.contains(slot))
    }

    /// Iterates over (subject, forbidden slots) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.forbidden.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether no subject is restricted.
    pub fn is_empty(&self) -> bool {
        self.forbidden.values().all(HashSet::is_empty)
    }
}

/// Soft scheduling preferences forwarded by the request layer.
///
/// Currently not scored: the penalty function has no terms for them.
/// They are echoed in the result so callers can see what was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftPreferences {
    /// Avoid back-to-back periods on the same day.
    #[serde(alias = "avoidConsecutive")]
    pub avoid_consecutive: bool,
    /// Spread subjects evenly across days.
    #[serde(alias = "balanceDays")]
    pub balance_days: bool,
    /// Prefer morning periods.
    #[serde(alias = "preferMorning")]
    pub prefer_morning: bool,
    /// Allow Saturday slots.
    #[serde(alias = "allowSaturday")]
    pub allow_saturday: bool,
}

impl SoftPreferences {
    /// Whether any preference flag is set.
    pub fn any(&self) -> bool {
        self.avoid_consecutive || self.balance_days || self.prefer_morning || self.allow_saturday
    }
}
