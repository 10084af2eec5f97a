use crate::modules::attendance::controller::{get_course_sheet, get_marks, mark_attendance};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/marks", put(mark_attendance).get(get_marks))
        .route("/courses/{course_id}/sheet/{date}", get(get_course_sheet))
}
