//! Login, current-user, and logout handlers.

use std::sync::Arc;

use axum::{Extension, Json, response::IntoResponse, response::Response};
use serde_json::json;

use crate::app::dto::{LoginRequest, account_json};
use crate::app::errors::error_response;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

use deskbook_core::DirectoryError;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    let user = match services
        .directory
        .authenticate(&body.username, &body.password)
        .await
    {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    let access_token = match services.tokens.issue(&user.username) {
        Ok(token) => token,
        Err(e) => {
            return error_response(DirectoryError::internal(format!(
                "token issuance failed: {e}"
            )));
        }
    };

    Json(json!({
        "access_token": access_token,
        "type": "account",
        "user": account_json(&user),
    }))
    .into_response()
}

pub async fn current_user(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Response {
    Json(account_json(&user)).into_response()
}

/// Tokens are stateless; logout is an acknowledgement, not a revocation.
pub async fn logout(Extension(CurrentUser(_user)): Extension<CurrentUser>) -> Response {
    Json(json!({"message": "Logged out successfully"})).into_response()
}
