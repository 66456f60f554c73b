use super::health::health_check;
use super::state::AppState;
use crate::api::{applicants, seeds};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete router.
///
/// Routes are mounted under `base_path` (for example `/api`); an empty
/// `base_path` mounts them at the root.
pub fn build_router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        .route("/seeds", get(seeds::list_seeds).post(seeds::replace_seeds))
        .route("/seeds/init", post(seeds::init_seeds))
        .route("/apply", post(applicants::apply))
        .route(
            "/applicants",
            get(applicants::list_applicants).delete(applicants::clear_applicants),
        )
        .route("/applicants/export", get(applicants::export_applicants))
        .route("/health", get(health_check))
        .with_state(state);

    let router = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(base_path, api)
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
