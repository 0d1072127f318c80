use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use chrono::Duration;
use dotenvy::dotenv;

use token_sessions::{SessionManager, session_store_from_env};
use token_sessions_axum::{
    AUTH_ROUTE_PREFIX, authenticate_401, authenticate_redirect, session_router,
};

mod handlers;
mod server;

use handlers::{Profile, index, login, protected, whoami};
use server::{init_tracing, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("demo_login");
    dotenv().ok();

    let secret = std::env::var("SESSION_SECRET")?;
    let access_timeout = env_seconds("ACCESS_TIMEOUT_SECONDS", 300)?;
    let refresh_timeout = env_seconds("REFRESH_TIMEOUT_SECONDS", 600)?;

    let store = session_store_from_env::<Profile>().await?;
    let manager = Arc::new(SessionManager::new(
        secret.into_bytes(),
        access_timeout,
        refresh_timeout,
        store,
    ));

    // Browser-facing pages bounce to the refresh endpoint when the access
    // token is missing or stale
    let pages = Router::new().route("/protected", get(protected)).layer(
        middleware::from_fn_with_state(manager.clone(), authenticate_redirect::<Profile>),
    );

    // API routes answer 401 and leave re-authentication to the caller
    let api = Router::new().route("/api/whoami", get(whoami)).layer(
        middleware::from_fn_with_state(manager.clone(), authenticate_401::<Profile>),
    );

    // Login lives under the auth prefix next to the library's refresh and
    // logout routes
    let auth = Router::new()
        .route("/login", post(login))
        .with_state(manager.clone())
        .merge(session_router(manager.clone()));

    let app = Router::new()
        .route("/", get(index))
        .merge(pages)
        .merge(api)
        .with_state(manager)
        .nest(AUTH_ROUTE_PREFIX.as_str(), auth);

    let http_server = spawn_http_server(3001, app);
    http_server.await?;
    Ok(())
}

fn env_seconds(key: &str, default: i64) -> Result<Duration, Box<dyn std::error::Error>> {
    match std::env::var(key) {
        Ok(value) => Ok(Duration::seconds(value.parse()?)),
        Err(_) => Ok(Duration::seconds(default)),
    }
}
