use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Extension, Form, Json,
    extract::{ConnectInfo, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::DateTime;
use http::{HeaderMap, StatusCode, header::USER_AGENT};
use serde::{Deserialize, Serialize};

use token_sessions::{Device, SessionManager};
use token_sessions_axum::{AUTH_ROUTE_PREFIX, AuthClaims};

/// Identity carried by the demo's sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Profile {
    #[serde(rename = "Name")]
    pub(crate) name: String,
}

pub(crate) type Manager = Arc<SessionManager<Profile>>;

pub(crate) async fn index(user: Option<AuthClaims<Profile>>) -> Html<String> {
    match user {
        Some(user) => Html(format!(
            "<h1>Hey {}!</h1>\
             <p><a href=\"/protected\">protected page</a> | \
             <a href=\"{}/logout\">logout</a></p>",
            user.claims.name,
            AUTH_ROUTE_PREFIX.as_str()
        )),
        None => Html(format!(
            "<h1>Welcome!</h1>\
             <form action=\"{}/login\" method=\"post\">\
             <input name=\"name\" value=\"Jhon Doe\">\
             <button type=\"submit\">Login</button>\
             </form>",
            AUTH_ROUTE_PREFIX.as_str()
        )),
    }
}

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    name: String,
}

pub(crate) async fn login(
    State(manager): State<Manager>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let device = Device::new(addr.to_string(), user_agent(&headers));
    let claims = Profile { name: form.name };

    let mut cookies = HeaderMap::new();
    match manager.start(&headers, device, claims, &mut cookies).await {
        Ok(()) => (cookies, Redirect::to("/")).into_response(),
        Err(err) => {
            tracing::error!("Login failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, cookies, "login failed").into_response()
        }
    }
}

pub(crate) async fn protected(user: AuthClaims<Profile>) -> Html<String> {
    let expires_at = DateTime::from_timestamp(user.exp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();
    Html(format!(
        "<h1>Protected</h1>\
         <p>Signed in as {} (access token expires at {expires_at}).</p>\
         <p><a href=\"/\">home</a></p>",
        user.claims.name
    ))
}

pub(crate) async fn whoami(Extension(user): Extension<AuthClaims<Profile>>) -> Json<Profile> {
    Json(user.claims)
}

fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
