use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use chrono::{NaiveDate, Utc};
use robokademi_core::{
    AttendanceStatus, MarkKey, MarkSet, Roster, SubjectKind, UnenrolledPolicy, apply_mark,
};
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{AttendanceMark, CourseSheetRow, MarkAttendanceResponse, MarkAttendanceDto};

pub struct AttendanceService;

impl AttendanceService {
    /// Record one mark and apply the session-debit rule, all inside a
    /// single transaction so the mark and the balance stay consistent.
    #[instrument(skip(db))]
    pub async fn mark(
        db: &SqlitePool,
        dto: MarkAttendanceDto,
        policy: UnenrolledPolicy,
    ) -> Result<MarkAttendanceResponse, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let prior_status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM attendance_marks WHERE subject_id = ? AND date = ? AND person_id = ?",
        )
        .bind(dto.subject_id)
        .bind(dto.date)
        .bind(dto.person_id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to fetch prior mark")
        .map_err(AppError::database)?;

        let balance: Option<i64> = if dto.subject_kind == SubjectKind::Course {
            sqlx::query_scalar(
                "SELECT sessions_remaining FROM enrollments WHERE student_id = ? AND course_id = ?",
            )
            .bind(dto.person_id)
            .bind(dto.subject_id)
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to fetch enrollment balance")
            .map_err(AppError::database)?
        } else {
            None
        };

        // Feed the slice of state the ledger needs and let it decide.
        let mut roster = Roster::new();
        if let Some(balance) = balance {
            roster.insert(
                dto.person_id,
                HashMap::from([(dto.subject_id, balance.max(0) as u32)]),
            );
        }
        let mut marks = MarkSet::new();
        let key = MarkKey {
            subject_id: dto.subject_id,
            date: dto.date,
            person_id: dto.person_id,
        };
        if let Some(ref prior) = prior_status {
            let prior = AttendanceStatus::from_str(prior)
                .map_err(|e| AppError::internal(anyhow!(e)))?;
            marks.insert(key, prior);
        }

        let outcome = apply_mark(
            &mut roster,
            &mut marks,
            dto.subject_kind,
            dto.subject_id,
            dto.date,
            dto.person_id,
            dto.status,
            policy,
        )
        .map_err(|e| AppError::conflict(e.to_string()))?;

        let marked_at = Utc::now();
        sqlx::query(
            "INSERT INTO attendance_marks (subject_kind, subject_id, date, person_id, status, marked_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(subject_id, date, person_id)
             DO UPDATE SET status = excluded.status, subject_kind = excluded.subject_kind, marked_at = excluded.marked_at",
        )
        .bind(dto.subject_kind.as_str())
        .bind(dto.subject_id)
        .bind(dto.date)
        .bind(dto.person_id)
        .bind(dto.status.as_str())
        .bind(marked_at)
        .execute(&mut *tx)
        .await
        .context("Failed to record attendance mark")
        .map_err(AppError::database)?;

        let sessions_remaining = roster
            .get(&dto.person_id)
            .and_then(|courses| courses.get(&dto.subject_id))
            .map(|v| *v as i64);

        if outcome.debited {
            if let Some(remaining) = sessions_remaining {
                sqlx::query(
                    "UPDATE enrollments SET sessions_remaining = ? WHERE student_id = ? AND course_id = ?",
                )
                .bind(remaining)
                .bind(dto.person_id)
                .bind(dto.subject_id)
                .execute(&mut *tx)
                .await
                .context("Failed to update session balance")
                .map_err(AppError::database)?;
            }
        }

        tx.commit().await.map_err(AppError::database)?;

        Ok(MarkAttendanceResponse {
            mark: AttendanceMark {
                subject_kind: dto.subject_kind.as_str().to_string(),
                subject_id: dto.subject_id,
                date: dto.date,
                person_id: dto.person_id,
                status: dto.status.as_str().to_string(),
                marked_at,
            },
            prior_status,
            session_debited: outcome.debited,
            sessions_remaining,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_marks(
        db: &SqlitePool,
        subject_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceMark>, AppError> {
        let marks = if let Some(date) = date {
            sqlx::query_as::<_, AttendanceMark>(
                "SELECT subject_kind, subject_id, date, person_id, status, marked_at
                 FROM attendance_marks WHERE subject_id = ? AND date = ?
                 ORDER BY marked_at",
            )
            .bind(subject_id)
            .bind(date)
            .fetch_all(db)
            .await
        } else {
            sqlx::query_as::<_, AttendanceMark>(
                "SELECT subject_kind, subject_id, date, person_id, status, marked_at
                 FROM attendance_marks WHERE subject_id = ?
                 ORDER BY date, marked_at",
            )
            .bind(subject_id)
            .fetch_all(db)
            .await
        }
        .context("Failed to fetch attendance marks")
        .map_err(AppError::database)?;

        Ok(marks)
    }

    /// A course's sheet for one date: every enrolled student with their
    /// balance and that day's status, marked or not.
    #[instrument(skip(db))]
    pub async fn course_sheet(
        db: &SqlitePool,
        course_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<CourseSheetRow>, AppError> {
        let rows = sqlx::query_as::<_, CourseSheetRow>(
            "SELECT s.id AS person_id, s.first_name, s.last_name, e.sessions_remaining, m.status
             FROM enrollments e
             JOIN students s ON s.id = e.student_id
             LEFT JOIN attendance_marks m
               ON m.subject_id = e.course_id AND m.person_id = s.id AND m.date = ?
             WHERE e.course_id = ?
             ORDER BY s.last_name, s.first_name",
        )
        .bind(date)
        .bind(course_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch course sheet")
        .map_err(AppError::database)?;

        Ok(rows)
    }
}
