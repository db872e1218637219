use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub mod ab;
pub mod admin;
pub mod session;
pub mod system;

/// Every route that requires a bearer token.
pub fn protected_router() -> Router {
    Router::new()
        .route("/api/currentUser", get(session::current_user))
        .route("/api/logout", post(session::logout))
        .route("/api/ab/list", get(ab::list_address_books))
        .route("/api/ab/peers", post(ab::peers))
        .route("/api/ab/peer/add/:ab_guid", post(ab::add))
        .route("/api/ab/peer/update/:ab_guid", put(ab::update))
        .route("/api/ab/peer/delete/:ab_guid/:client_id", delete(ab::delete))
        .route("/api/admin/users", post(admin::create_user).get(admin::list_users))
        .route("/api/admin/clients", get(admin::list_clients))
        .route("/api/admin/permissions/grant", post(admin::grant))
        .route("/api/admin/permissions/:client_id", get(admin::client_grants))
}
