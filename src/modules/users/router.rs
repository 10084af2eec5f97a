use crate::modules::users::controller::{
    create_user, delete_user, get_permission_catalog, get_role_defaults, get_user, get_users,
    update_user, update_user_permissions,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(get_users))
        // Static segments before the {id} matcher.
        .route("/permissions", get(get_permission_catalog))
        .route("/permissions/defaults/{role}", get(get_role_defaults))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/{id}/permissions", put(update_user_permissions))
}
