//! The attendance-driven session ledger.
//!
//! Each enrollment carries a remaining-session balance. Marking a
//! student present for a course debits that balance exactly once per
//! distinct entry into the `Present` state for a given
//! `(subject, date, person)` key; re-marking the same key `Present` is
//! a no-op until the mark moves away from `Present` and back.
//!
//! [`apply_mark`] is pure over caller-supplied maps. The application
//! loads the relevant slice of the roster and mark set from storage,
//! applies the rule here, and persists whatever came back.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// What kind of entity an attendance sheet is attached to. Only course
/// sheets touch session balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Course,
    Teacher,
    Student,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded status for one person, one subject, one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Sick,
    Vacation,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Sick => "sick",
            Self::Vacation => "vacation",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "sick" => Ok(Self::Sick),
            "vacation" => Ok(Self::Vacation),
            other => Err(format!("unknown attendance status: {other}")),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique key for one attendance mark: at most one status per person
/// per date per subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkKey {
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub person_id: Uuid,
}

/// All known marks, keyed uniquely. Overwrites are last-write-wins.
pub type MarkSet = HashMap<MarkKey, AttendanceStatus>;

/// Remaining-session balances: person -> course -> sessions remaining.
pub type Roster = HashMap<Uuid, HashMap<Uuid, u32>>;

/// What to do when a mark arrives for a person with no enrollment for
/// the subject course. The source system silently recorded the mark and
/// skipped the debit; [`UnenrolledPolicy::Reject`] turns that into a
/// refusal instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnenrolledPolicy {
    /// Record the mark, skip the balance change.
    #[default]
    Record,
    /// Refuse the mark entirely.
    Reject,
}

/// Result of applying one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOutcome {
    /// Status previously recorded for the key, if any.
    pub prior: Option<AttendanceStatus>,
    /// Whether a session was debited from the person's balance.
    pub debited: bool,
}

/// Error raised only under [`UnenrolledPolicy::Reject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotEnrolled {
    pub person_id: Uuid,
    pub course_id: Uuid,
}

impl fmt::Display for NotEnrolled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "person {} has no enrollment for course {}",
            self.person_id, self.course_id
        )
    }
}

impl std::error::Error for NotEnrolled {}

/// Record `status` for `(subject_id, date, person_id)` and apply the
/// session-debit rule.
///
/// The debit fires iff all of:
/// - `kind` is [`SubjectKind::Course`],
/// - `status` is `Present`,
/// - the prior status for this exact key was not already `Present`,
/// - the person's remaining balance for the course is above zero.
///
/// In every other case the balance is left untouched; it never goes
/// below zero, and repeated `Present` marks for the same key debit at
/// most once until the mark is changed away from `Present` and back.
pub fn apply_mark(
    roster: &mut Roster,
    marks: &mut MarkSet,
    kind: SubjectKind,
    subject_id: Uuid,
    date: NaiveDate,
    person_id: Uuid,
    status: AttendanceStatus,
    policy: UnenrolledPolicy,
) -> Result<MarkOutcome, NotEnrolled> {
    let key = MarkKey {
        subject_id,
        date,
        person_id,
    };

    let balance = roster
        .get_mut(&person_id)
        .and_then(|courses| courses.get_mut(&subject_id));

    if kind == SubjectKind::Course && balance.is_none() && policy == UnenrolledPolicy::Reject {
        return Err(NotEnrolled {
            person_id,
            course_id: subject_id,
        });
    }

    let prior = marks.insert(key, status);

    let entering_present =
        status == AttendanceStatus::Present && prior != Some(AttendanceStatus::Present);

    let mut debited = false;
    if kind == SubjectKind::Course && entering_present {
        if let Some(remaining) = balance {
            if *remaining > 0 {
                *remaining -= 1;
                debited = true;
            }
        }
    }

    Ok(MarkOutcome { prior, debited })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    struct Fixture {
        roster: Roster,
        marks: MarkSet,
        course: Uuid,
        student: Uuid,
    }

    impl Fixture {
        fn new(sessions: u32) -> Self {
            let course = Uuid::new_v4();
            let student = Uuid::new_v4();
            let mut roster = Roster::new();
            roster.insert(student, HashMap::from([(course, sessions)]));
            Self {
                roster,
                marks: MarkSet::new(),
                course,
                student,
            }
        }

        fn mark(&mut self, day: &str, status: AttendanceStatus) -> MarkOutcome {
            apply_mark(
                &mut self.roster,
                &mut self.marks,
                SubjectKind::Course,
                self.course,
                date(day),
                self.student,
                status,
                UnenrolledPolicy::Record,
            )
            .unwrap()
        }

        fn balance(&self) -> u32 {
            self.roster[&self.student][&self.course]
        }
    }

    #[test]
    fn present_debits_one_session() {
        let mut fx = Fixture::new(12);
        let outcome = fx.mark("2024-01-10", AttendanceStatus::Present);
        assert_eq!(outcome, MarkOutcome { prior: None, debited: true });
        assert_eq!(fx.balance(), 11);
    }

    #[test]
    fn repeated_present_is_idempotent() {
        let mut fx = Fixture::new(12);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        let second = fx.mark("2024-01-10", AttendanceStatus::Present);
        assert_eq!(second.prior, Some(AttendanceStatus::Present));
        assert!(!second.debited);
        assert_eq!(fx.balance(), 11);
    }

    #[test]
    fn non_present_statuses_never_debit() {
        let mut fx = Fixture::new(12);
        for status in [
            AttendanceStatus::Absent,
            AttendanceStatus::Sick,
            AttendanceStatus::Vacation,
        ] {
            let outcome = fx.mark("2024-01-10", status);
            assert!(!outcome.debited, "{status}");
        }
        assert_eq!(fx.balance(), 12);
    }

    #[test]
    fn leaving_present_does_not_refund() {
        let mut fx = Fixture::new(12);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        fx.mark("2024-01-10", AttendanceStatus::Absent);
        assert_eq!(fx.balance(), 11);
    }

    #[test]
    fn re_entering_present_debits_again() {
        // Present -> Absent -> Present debits exactly twice.
        let mut fx = Fixture::new(12);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        fx.mark("2024-01-10", AttendanceStatus::Absent);
        let third = fx.mark("2024-01-10", AttendanceStatus::Present);
        assert!(third.debited);
        assert_eq!(fx.balance(), 10);
    }

    #[test]
    fn fresh_enrollment_scenario() {
        // Present(11) -> Present again(11) -> Absent(11) -> Present(10).
        let mut fx = Fixture::new(12);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        assert_eq!(fx.balance(), 11);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        assert_eq!(fx.balance(), 11);
        fx.mark("2024-01-10", AttendanceStatus::Absent);
        assert_eq!(fx.balance(), 11);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        assert_eq!(fx.balance(), 10);
    }

    #[test]
    fn balance_never_goes_below_zero() {
        let mut fx = Fixture::new(1);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        assert_eq!(fx.balance(), 0);

        // Flip in and out of Present repeatedly; the floor holds.
        for day in ["2024-01-11", "2024-01-12", "2024-01-13"] {
            let outcome = fx.mark(day, AttendanceStatus::Present);
            assert!(!outcome.debited);
            fx.mark(day, AttendanceStatus::Absent);
        }
        assert_eq!(fx.balance(), 0);
    }

    #[test]
    fn zero_balance_mark_is_recorded_without_error() {
        let mut fx = Fixture::new(0);
        let outcome = fx.mark("2024-01-10", AttendanceStatus::Present);
        assert!(!outcome.debited);
        assert_eq!(fx.balance(), 0);
        assert_eq!(
            fx.marks[&MarkKey {
                subject_id: fx.course,
                date: date("2024-01-10"),
                person_id: fx.student,
            }],
            AttendanceStatus::Present
        );
    }

    #[test]
    fn distinct_dates_debit_independently() {
        let mut fx = Fixture::new(12);
        fx.mark("2024-01-10", AttendanceStatus::Present);
        fx.mark("2024-01-17", AttendanceStatus::Present);
        assert_eq!(fx.balance(), 10);
    }

    #[test]
    fn teacher_and_student_sheets_never_touch_balances() {
        let mut fx = Fixture::new(12);
        for kind in [SubjectKind::Teacher, SubjectKind::Student] {
            let outcome = apply_mark(
                &mut fx.roster,
                &mut fx.marks,
                kind,
                fx.course,
                date("2024-01-10"),
                fx.student,
                AttendanceStatus::Present,
                UnenrolledPolicy::Record,
            )
            .unwrap();
            assert!(!outcome.debited, "{kind}");
        }
        assert_eq!(fx.balance(), 12);
    }

    #[test]
    fn unenrolled_record_policy_keeps_the_mark() {
        let mut roster = Roster::new();
        let mut marks = MarkSet::new();
        let course = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let outcome = apply_mark(
            &mut roster,
            &mut marks,
            SubjectKind::Course,
            course,
            date("2024-01-10"),
            stranger,
            AttendanceStatus::Present,
            UnenrolledPolicy::Record,
        )
        .unwrap();

        assert!(!outcome.debited);
        assert_eq!(marks.len(), 1);
        assert!(roster.is_empty());
    }

    #[test]
    fn unenrolled_reject_policy_refuses_and_records_nothing() {
        let mut roster = Roster::new();
        let mut marks = MarkSet::new();
        let course = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let err = apply_mark(
            &mut roster,
            &mut marks,
            SubjectKind::Course,
            course,
            date("2024-01-10"),
            stranger,
            AttendanceStatus::Present,
            UnenrolledPolicy::Reject,
        )
        .unwrap_err();

        assert_eq!(err.person_id, stranger);
        assert_eq!(err.course_id, course);
        assert!(marks.is_empty());
    }

    #[test]
    fn overwrite_is_last_write_wins() {
        let mut fx = Fixture::new(12);
        fx.mark("2024-01-10", AttendanceStatus::Sick);
        fx.mark("2024-01-10", AttendanceStatus::Vacation);
        assert_eq!(fx.marks.len(), 1);
        assert_eq!(
            fx.marks.values().next().copied(),
            Some(AttendanceStatus::Vacation)
        );
    }
}
