//! Admin handlers. Role enforcement lives in the use-case layer; these map
//! requests and responses only.

use std::sync::Arc;

use axum::{Extension, Json, extract::Path, response::IntoResponse, response::Response};
use serde_json::json;

use deskbook_directory::NewUser;

use crate::app::dto::{CreateUserRequest, GrantRequest, client_json, grant_json, user_json};
use crate::app::errors::error_response;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Json(body): Json<CreateUserRequest>,
) -> Response {
    let new = NewUser {
        username: body.username,
        password: body.password,
        email: body.email,
        role: body.role,
    };

    match services.directory.create_user(&actor, new).await {
        Ok(user) => Json(user_json(&user)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> Response {
    match services.directory.list_users(&actor).await {
        Ok(users) => Json(users.iter().map(user_json).collect::<Vec<_>>()).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_clients(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> Response {
    match services.directory.list_all_clients(&actor).await {
        Ok(clients) => Json(clients.iter().map(client_json).collect::<Vec<_>>()).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn grant(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Json(body): Json<GrantRequest>,
) -> Response {
    match services
        .directory
        .grant(&actor, body.user_id, body.client_id, body.level)
        .await
    {
        Ok(()) => Json(json!({"message": "Permission granted"})).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn client_grants(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(client_id): Path<i64>,
) -> Response {
    match services.directory.list_grants(&actor, client_id).await {
        Ok(grants) => Json(grants.iter().map(grant_json).collect::<Vec<_>>()).into_response(),
        Err(e) => error_response(e),
    }
}
