use crate::modules::gafan::controller::{
    create_program, delete_program, get_program, get_programs, update_program,
};
use crate::state::AppState;
use axum::{Router, routing::{get, post}};

pub fn init_gafan_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_program).get(get_programs))
        .route(
            "/{id}",
            get(get_program).put(update_program).delete(delete_program),
        )
}
