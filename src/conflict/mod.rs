//! Date-overlap conflict resolution.
//!
//! Prunes a subject list until no two surviving subjects have overlapping
//! date ranges, recording every drop.
//!
//! # Algorithm
//!
//! 1. Scan surviving subjects in input order for overlapping pairs
//!    `(i, j)`, `i < j`.
//! 2. Stop if there are none.
//! 3. Resolve the first pair: keep the subject that wins [`compare_claims`],
//!    drop the other and record a [`ConflictEntry`].
//! 4. Repeat.
//!
//! Each iteration removes one subject, so at most `n - 1` iterations run.
//! A non-empty input always keeps at least one subject.
//!
//! # Keep policy
//!
//! Sequential, later rules only break ties of earlier ones:
//! 1. Higher effective priority
//! 2. Retake over non-retake
//! 3. Earlier start date
//! 4. First of the pair

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::models::{ConflictEntry, Subject};

/// Outcome of conflict resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Surviving subjects, input order preserved.
    pub kept: Vec<Subject>,
    /// Drop records, in drop order.
    pub dropped: Vec<ConflictEntry>,
}

impl Resolution {
    /// Names of dropped subjects, in drop order.
    pub fn dropped_names(&self) -> Vec<String> {
        self.dropped.iter().map(|d| d.subject.clone()).collect()
    }
}

/// A subject with its effective priority computed once.
#[derive(Debug, Clone)]
struct Claim {
    subject: Subject,
    priority: i32,
}

impl Claim {
    fn new(subject: Subject) -> Self {
        let priority = subject.effective_priority();
        Self { subject, priority }
    }
}

/// Removes overlapping subjects under a deterministic priority policy.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::conflict::ConflictResolver;
/// use u_timetable::models::Subject;
///
/// let d = |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// let subjects = vec![
///     Subject::new("Math", d("2024-01-01"), d("2024-01-10")).with_priority(5),
///     Subject::new("Physics", d("2024-01-05"), d("2024-01-15")).with_priority(8),
/// ];
/// let resolution = ConflictResolver::new().resolve(subjects).unwrap();
/// assert_eq!(resolution.kept[0].name, "Physics");
/// assert_eq!(resolution.dropped[0].subject, "Math");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConflictResolver;

impl ConflictResolver {
    /// Creates a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolves all overlaps.
    ///
    /// # Errors
    /// `NoViableSchedule` if no subject survives.
    pub fn resolve(&self, subjects: Vec<Subject>) -> Result<Resolution> {
        let mut active: Vec<Claim> = subjects.into_iter().map(Claim::new).collect();
        let mut dropped = Vec::new();

        while let Some((i, j)) = first_conflict(&active) {
            let (keep, drop) = match compare_claims(&active[i], &active[j]) {
                Ordering::Less => (j, i),
                Ordering::Equal | Ordering::Greater => (i, j),
            };

            let entry = ConflictEntry::dropped_for(&active[drop].subject, &active[keep].subject);
            debug!(
                event = "conflict_drop",
                dropped = %entry.subject,
                kept = %entry.kept_with,
                reason = %entry.reason,
            );
            dropped.push(entry);
            active.remove(drop);
        }

        if active.is_empty() {
            return Err(TimetableError::NoViableSchedule {
                dropped: dropped.into_iter().map(|d| d.subject).collect(),
            });
        }

        Ok(Resolution {
            kept: active.into_iter().map(|c| c.subject).collect(),
            dropped,
        })
    }
}

/// All overlapping pairs `(i, j)` with `i < j`, in scan order.
pub fn conflicting_pairs(subjects: &[Subject]) -> Vec<(usize, usize)> {
    pairs(subjects.len())
        .filter(|&(i, j)| subjects[i].overlaps(&subjects[j]))
        .collect()
}

fn first_conflict(active: &[Claim]) -> Option<(usize, usize)> {
    pairs(active.len()).find(|&(i, j)| active[i].subject.overlaps(&active[j].subject))
}

fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Orders two claims; `Greater` means `a` should be kept over `b`.
///
/// `Equal` only when every rule ties; the caller keeps `a` then.
fn compare_claims(a: &Claim, b: &Claim) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.subject.is_retake.cmp(&b.subject.is_retake))
        // Earlier start wins, so compare reversed.
        .then_with(|| b.subject.start_date.cmp(&a.subject.start_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn subject(name: &str, start: &str, end: &str, priority: i32) -> Subject {
        Subject::new(name, date(start), date(end)).with_priority(priority)
    }

    fn names(subjects: &[Subject]) -> Vec<&str> {
        subjects.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_lower_priority_dropped() {
        let subjects = vec![
            subject("Math", "2024-01-01", "2024-01-10", 5),
            subject("Physics", "2024-01-05", "2024-01-15", 8),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();

        assert_eq!(names(&r.kept), vec!["Physics"]);
        assert_eq!(r.dropped.len(), 1);
        assert_eq!(r.dropped[0].subject, "Math");
        assert_eq!(r.dropped[0].kept_with, "Physics");
    }

    #[test]
    fn test_retake_wins_priority_tie_regardless_of_order() {
        // Retake starts later, still kept
        let subjects = vec![
            subject("Chem", "2024-01-01", "2024-01-10", 7),
            subject("Bio", "2024-01-05", "2024-01-15", 5).with_retake(true),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["Bio"]);

        // Retake first in input
        let subjects = vec![
            subject("Bio", "2024-01-05", "2024-01-15", 5).with_retake(true),
            subject("Chem", "2024-01-01", "2024-01-10", 7),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["Bio"]);
    }

    #[test]
    fn test_retake_bonus_can_change_outcome() {
        // 6 + 2 = 8 beats 7
        let subjects = vec![
            subject("Plain", "2024-01-01", "2024-01-10", 7),
            subject("Retake", "2024-01-02", "2024-01-10", 6).with_retake(true),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["Retake"]);
    }

    #[test]
    fn test_earlier_start_breaks_full_tie() {
        let subjects = vec![
            subject("Late", "2024-01-05", "2024-01-15", 5),
            subject("Early", "2024-01-01", "2024-01-10", 5),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["Early"]);
    }

    #[test]
    fn test_identical_claims_keep_first() {
        let subjects = vec![
            subject("First", "2024-01-01", "2024-01-10", 5),
            subject("Second", "2024-01-01", "2024-01-10", 5),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["First"]);
    }

    #[test]
    fn test_no_conflicts_keeps_everything_in_order() {
        let subjects = vec![
            subject("C", "2024-03-01", "2024-03-10", 1),
            subject("A", "2024-01-01", "2024-01-10", 9),
            subject("B", "2024-02-01", "2024-02-10", 5),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["C", "A", "B"]);
        assert!(r.dropped.is_empty());
    }

    #[test]
    fn test_identical_ranges_leave_one_survivor() {
        let subjects: Vec<Subject> = (0..5)
            .map(|i| subject(&format!("S{i}"), "2024-01-01", "2024-01-31", 5))
            .collect();
        let r = ConflictResolver::new().resolve(subjects).unwrap();

        assert_eq!(names(&r.kept), vec!["S0"]);
        assert_eq!(
            r.dropped_names(),
            vec!["S1", "S2", "S3", "S4"]
        );
        assert!(r.dropped.iter().all(|d| d.kept_with == "S0"));
    }

    #[test]
    fn test_single_subject_survives() {
        let r = ConflictResolver::new()
            .resolve(vec![subject("Solo", "2024-01-01", "2024-01-02", 5)])
            .unwrap();
        assert_eq!(names(&r.kept), vec!["Solo"]);
    }

    #[test]
    fn test_empty_input_is_not_viable() {
        let err = ConflictResolver::new().resolve(Vec::new()).unwrap_err();
        assert!(matches!(err, TimetableError::NoViableSchedule { dropped } if dropped.is_empty()));
    }

    #[test]
    fn test_chain_resolution_order() {
        // A-B overlap, B-C overlap, A-C disjoint.
        // First pair (A,B): B wins (priority). Then (B,C): B wins again.
        let subjects = vec![
            subject("A", "2024-01-01", "2024-01-10", 3),
            subject("B", "2024-01-08", "2024-01-20", 9),
            subject("C", "2024-01-18", "2024-01-30", 4),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["B"]);
        assert_eq!(r.dropped_names(), vec!["A", "C"]);
    }

    #[test]
    fn test_dropping_middle_can_save_neighbours() {
        // A-B overlap, B-C overlap, A-C disjoint; B loses to A then C is free.
        let subjects = vec![
            subject("A", "2024-01-01", "2024-01-10", 9),
            subject("B", "2024-01-08", "2024-01-20", 2),
            subject("C", "2024-01-18", "2024-01-30", 4),
        ];
        let r = ConflictResolver::new().resolve(subjects).unwrap();
        assert_eq!(names(&r.kept), vec!["A", "C"]);
        assert_eq!(r.dropped_names(), vec!["B"]);
    }

    #[test]
    fn test_survivors_never_overlap() {
        let subjects = vec![
            subject("A", "2024-01-01", "2024-02-01", 5),
            subject("B", "2024-01-15", "2024-01-20", 6),
            subject("C", "2024-01-25", "2024-03-01", 4).with_retake(true),
            subject("D", "2024-02-15", "2024-02-20", 7),
            subject("E", "2024-03-10", "2024-03-20", 1),
            subject("F", "2024-01-01", "2024-12-31", 3),
        ];
        let r = ConflictResolver::new().resolve(subjects.clone()).unwrap();
        assert!(conflicting_pairs(&r.kept).is_empty());
        assert_eq!(r.kept.len() + r.dropped.len(), subjects.len());
    }

    #[test]
    fn test_each_step_reduces_conflicts() {
        let subjects = vec![
            subject("A", "2024-01-01", "2024-02-01", 5),
            subject("B", "2024-01-15", "2024-01-20", 6),
            subject("C", "2024-01-25", "2024-03-01", 4),
            subject("D", "2024-02-15", "2024-02-20", 7),
        ];
        // Replay drops one at a time and check the pair count strictly falls.
        let r = ConflictResolver::new().resolve(subjects.clone()).unwrap();
        let mut working = subjects;
        let mut previous = conflicting_pairs(&working).len();
        for entry in &r.dropped {
            let before = working.len();
            working.retain(|s| s.name != entry.subject);
            assert_eq!(working.len(), before - 1);
            let now = conflicting_pairs(&working).len();
            assert!(now < previous);
            previous = now;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_conflicting_pairs_scan_order() {
        let subjects = vec![
            subject("A", "2024-01-01", "2024-01-31", 5),
            subject("B", "2024-01-10", "2024-01-12", 5),
            subject("C", "2024-01-11", "2024-01-20", 5),
        ];
        assert_eq!(conflicting_pairs(&subjects), vec![(0, 1), (0, 2), (1, 2)]);
    }
}
