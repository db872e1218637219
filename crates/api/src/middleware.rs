use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use deskbook_auth::TokenService;
use deskbook_directory::Directory;

use crate::app::errors::json_error;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenService,
    pub directory: Arc<Directory>,
}

/// Verify the bearer token and attach the account it names. A missing or
/// invalid token and a token whose account no longer exists all produce the
/// same 401 response.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let username = {
        let Some(token) = extract_bearer(req.headers()) else {
            return unauthorized();
        };
        match state.tokens.verify(token) {
            Ok(username) => username,
            Err(_) => return unauthorized(),
        }
    };

    let user = match state.directory.user_for_token(&username).await {
        Ok(user) => user,
        Err(_) => return unauthorized(),
    };

    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}

fn unauthorized() -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        "invalid authentication credentials",
    )
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
