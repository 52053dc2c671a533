pub mod admin;
pub mod auth;
pub mod bookings;
pub mod finance;
pub mod health;
pub mod inquiries;
pub mod leads;
pub mod vehicles;

mod form;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the complete API router with all routes.
///
/// Uploaded images are served statically under `/uploads`.
pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(vehicles::router())
        .merge(bookings::router())
        .merge(leads::router())
        .merge(inquiries::router())
        .merge(finance::router())
        .merge(admin::router())
        .nest_service("/uploads", uploads)
        .with_state(state)
}
