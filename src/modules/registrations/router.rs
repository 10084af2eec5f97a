use crate::modules::registrations::controller::{
    create_registration, delete_registration, get_registration, get_registrations,
    update_registration,
};
use crate::state::AppState;
use axum::{Router, routing::{get, post}};

pub fn init_registrations_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_registration).get(get_registrations))
        .route(
            "/{id}",
            get(get_registration)
                .put(update_registration)
                .delete(delete_registration),
        )
}
