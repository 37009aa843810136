use axum::Router;
use axum_helpers::server::health_router;
use domain_registration::handlers;

use crate::state::AppState;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    handlers::api_router(state.registration_service())
}

/// Routes served from the site root: the registration form plus
/// `/health` and `/ready`.
pub fn site(state: &AppState) -> Router {
    handlers::form_router(state.registration_service())
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone()))
}

/// Creates a router with the /ready endpoint that checks the database.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
