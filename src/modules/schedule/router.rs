use crate::modules::schedule::controller::{
    create_event, delete_event, get_event, get_events, update_event,
};
use crate::state::AppState;
use axum::{Router, routing::{get, post}};

pub fn init_schedule_router() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(get_events))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}
