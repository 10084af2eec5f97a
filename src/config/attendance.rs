use std::env;

use robokademi_core::UnenrolledPolicy;

/// Policy knobs for the attendance session ledger.
#[derive(Clone, Debug)]
pub struct AttendanceConfig {
    /// What to do when a mark arrives for a student with no enrollment
    /// for the course: record it without a debit (the default) or
    /// reject it with 409.
    pub unenrolled: UnenrolledPolicy,
}

impl AttendanceConfig {
    pub fn from_env() -> Self {
        let unenrolled = match env::var("ATTENDANCE_UNENROLLED").as_deref() {
            Ok("reject") => UnenrolledPolicy::Reject,
            _ => UnenrolledPolicy::Record,
        };

        Self { unenrolled }
    }
}
