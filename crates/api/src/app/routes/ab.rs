//! Address-book handlers: the peer listing and upsert/update/delete flow.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query},
    response::IntoResponse,
    response::Response,
};
use serde_json::json;

use deskbook_directory::Page;

use crate::app::dto::{PeerUpsertRequest, PeersQuery, peer_json};
use crate::app::errors::error_response;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

/// The service exposes exactly one synthetic address book.
pub async fn list_address_books() -> Response {
    Json(json!([{
        "guid": "default",
        "name": "My address book",
        "share_rule": 0,
    }]))
    .into_response()
}

pub async fn peers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PeersQuery>,
) -> Response {
    let page = Page {
        number: query.current,
        size: query.page_size,
    };

    match services.directory.list_peers(&user, page).await {
        Ok(page) => Json(json!({
            "total": page.total,
            "data": page.clients.iter().map(peer_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn add(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(_ab_guid): Path<String>,
    Json(body): Json<PeerUpsertRequest>,
) -> Response {
    match services.directory.add_peer(&user, &body.id, body.fields).await {
        Ok(()) => success(),
        Err(e) => error_response(e),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(_ab_guid): Path<String>,
    Json(body): Json<PeerUpsertRequest>,
) -> Response {
    match services
        .directory
        .update_peer(&user, &body.id, body.fields)
        .await
    {
        Ok(()) => success(),
        Err(e) => error_response(e),
    }
}

pub async fn delete(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((_ab_guid, client_id)): Path<(String, String)>,
) -> Response {
    match services.directory.delete_peer(&user, &client_id).await {
        Ok(()) => success(),
        Err(e) => error_response(e),
    }
}

fn success() -> Response {
    Json(json!({"message": "Success"})).into_response()
}
