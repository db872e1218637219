use std::sync::Arc;

use chrono::Duration;

use deskbook_auth::TokenService;
use deskbook_directory::Directory;
use deskbook_store::DirectoryDb;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    deskbook_observability::init("deskbook-api");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:deskbook.db?mode=rwc".to_string());
    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let ttl_days: i64 = std::env::var("TOKEN_TTL_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(7);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let db = DirectoryDb::open(&database_url).await?;
    let directory = Arc::new(Directory::new(db));

    // Optional bootstrap: seed the first admin account from the environment.
    match std::env::var("ADMIN_PASSWORD") {
        Ok(password) => {
            let username =
                std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
            directory.ensure_admin(&username, &password).await?;
        }
        Err(_) => tracing::info!("ADMIN_PASSWORD not set; skipping admin bootstrap"),
    }

    let tokens = TokenService::new(jwt_secret.as_bytes(), Duration::days(ttl_days));
    let app = deskbook_api::app::build_app(directory, tokens);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
