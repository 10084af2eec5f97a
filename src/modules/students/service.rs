use anyhow::{Context, anyhow};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    CreateStudentDto, EnrollStudentDto, EnrollmentWithCourse, Student, StudentFilterParams,
    UpdateStudentDto,
};

const STUDENT_COLUMNS: &str = "id, first_name, last_name, email, phone, guardian_name, school_id, \
     total_sessions, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(
        db: &SqlitePool,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO students (id, first_name, last_name, email, phone, guardian_name, school_id, total_sessions, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.guardian_name)
        .bind(dto.school_id)
        .bind(dto.total_sessions)
        .bind(now)
        .bind(now)
        .execute(db)
        .await
        .context("Failed to create student")
        .map_err(AppError::database)?;

        Self::get_student_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &SqlitePool,
        params: &StudentFilterParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let mut sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE 1=1");
        let mut count_sql = String::from("SELECT COUNT(*) FROM students WHERE 1=1");

        if params.search.is_some() {
            let clause =
                " AND (first_name LIKE ? OR last_name LIKE ? OR guardian_name LIKE ?)";
            sql.push_str(clause);
            count_sql.push_str(clause);
        }
        if params.school_id.is_some() {
            sql.push_str(" AND school_id = ?");
            count_sql.push_str(" AND school_id = ?");
        }
        sql.push_str(" ORDER BY last_name, first_name LIMIT ? OFFSET ?");

        let pattern = params.search.as_ref().map(|s| format!("%{}%", s));

        let mut query = sqlx::query_as::<_, Student>(&sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(ref pattern) = pattern {
            query = query.bind(pattern).bind(pattern).bind(pattern);
            count_query = count_query.bind(pattern).bind(pattern).bind(pattern);
        }
        if let Some(school_id) = params.school_id {
            query = query.bind(school_id);
            count_query = count_query.bind(school_id);
        }
        query = query
            .bind(params.pagination.limit())
            .bind(params.pagination.offset());

        let students = query
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;
        let total = count_query
            .fetch_one(db)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)?;

        Ok((students, total))
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &SqlitePool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &SqlitePool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student_by_id(db, id).await?;

        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let email = dto.email.or(existing.email);
        let phone = dto.phone.or(existing.phone);
        let guardian_name = dto.guardian_name.or(existing.guardian_name);
        let school_id = dto.school_id.or(existing.school_id);
        let total_sessions = dto.total_sessions.or(existing.total_sessions);

        sqlx::query(
            "UPDATE students SET first_name = ?, last_name = ?, email = ?, phone = ?, guardian_name = ?, school_id = ?, total_sessions = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&phone)
        .bind(&guardian_name)
        .bind(school_id)
        .bind(total_sessions)
        .bind(Utc::now())
        .bind(id)
        .execute(db)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?;

        Self::get_student_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &SqlitePool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        Ok(())
    }

    /// Enroll the student in a course. The session balance starts from
    /// the explicit override, else the student's own total-session
    /// setting, else the course's default session count.
    #[instrument(skip(db))]
    pub async fn enroll(
        db: &SqlitePool,
        student_id: Uuid,
        dto: EnrollStudentDto,
    ) -> Result<EnrollmentWithCourse, AppError> {
        let student = Self::get_student_by_id(db, student_id).await?;

        let course_default: Option<i64> =
            sqlx::query_scalar("SELECT default_sessions FROM courses WHERE id = ?")
                .bind(dto.course_id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;
        let Some(course_default) = course_default else {
            return Err(AppError::not_found(anyhow!("Course not found")));
        };

        let sessions = dto
            .sessions
            .or(student.total_sessions)
            .unwrap_or(course_default);

        sqlx::query(
            "INSERT INTO enrollments (student_id, course_id, sessions_remaining, enrolled_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(student_id)
        .bind(dto.course_id)
        .bind(sessions)
        .bind(Utc::now())
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("Student is already enrolled in this course");
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        let enrollment = sqlx::query_as::<_, EnrollmentWithCourse>(
            "SELECT e.course_id, c.name AS course_name, e.sessions_remaining, e.enrolled_at
             FROM enrollments e JOIN courses c ON c.id = e.course_id
             WHERE e.student_id = ? AND e.course_id = ?",
        )
        .bind(student_id)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .context("Failed to fetch enrollment")
        .map_err(AppError::database)?;

        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn unenroll(
        db: &SqlitePool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM enrollments WHERE student_id = ? AND course_id = ?")
                .bind(student_id)
                .bind(course_id)
                .execute(db)
                .await
                .context("Failed to delete enrollment")
                .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Enrollment not found")));
        }

        Ok(())
    }

    /// The student's per-course session balances.
    #[instrument(skip(db))]
    pub async fn get_enrollments(
        db: &SqlitePool,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentWithCourse>, AppError> {
        Self::get_student_by_id(db, student_id).await?;

        let enrollments = sqlx::query_as::<_, EnrollmentWithCourse>(
            "SELECT e.course_id, c.name AS course_name, e.sessions_remaining, e.enrolled_at
             FROM enrollments e JOIN courses c ON c.id = e.course_id
             WHERE e.student_id = ?
             ORDER BY c.name",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch enrollments")
        .map_err(AppError::database)?;

        Ok(enrollments)
    }
}
