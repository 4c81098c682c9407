use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user::{get_me, login_user, register_user};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user));

    let protected = Router::new()
        .route("/users/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    open.merge(protected)
}
