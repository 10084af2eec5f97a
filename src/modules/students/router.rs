use crate::modules::students::controller::{
    create_student, delete_student, enroll_student, get_student, get_student_enrollments,
    get_students, unenroll_student, update_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route(
            "/{id}/enrollments",
            post(enroll_student).get(get_student_enrollments),
        )
        .route("/{id}/enrollments/{course_id}", delete(unenroll_student))
}
