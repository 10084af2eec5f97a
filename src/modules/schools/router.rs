use crate::modules::schools::controller::{
    create_school, delete_school, get_school, get_schools, update_school,
};
use crate::state::AppState;
use axum::{Router, routing::{get, post}};

pub fn init_schools_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_school).get(get_schools))
        .route(
            "/{id}",
            get(get_school).put(update_school).delete(delete_school),
        )
}
