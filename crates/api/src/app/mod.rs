//! Router assembly and shared handler state.

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use deskbook_auth::TokenService;
use deskbook_directory::Directory;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full application router.
///
/// `/health` and `/api/login` are public; everything else sits behind the
/// bearer-token middleware.
pub fn build_app(directory: Arc<Directory>, tokens: TokenService) -> Router {
    let auth_state = crate::middleware::AuthState {
        tokens: tokens.clone(),
        directory: directory.clone(),
    };
    let services = Arc::new(AppServices { directory, tokens });

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        crate::middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/login", post(routes::session::login))
        .merge(protected)
        .layer(Extension(services))
}
