use axum::{
    extract::{rejection::FormRejection, Query, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use qs_core::{ErrorResp, LoginForm, ShareError};
use serde::Deserialize;

use crate::{pages, state::AppState};

pub const AUTH_COOKIE: &str = "auth_token";
const COOKIE_MAX_AGE_SECS: i64 = 3600;
const LOGIN_FAILED: &str = "Incorrect password, please try again";

pub fn router() -> Router<AppState> {
    Router::new().route("/login", get(login_page).post(login))
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoginQuery {
    error: Option<String>,
}

/// The token a request carries: the `auth_token` cookie, else `?token=`.
/// A non-empty cookie wins even when it is wrong.
pub fn presented_token(jar: &CookieJar, query: Option<&str>) -> Option<String> {
    jar.get(AUTH_COOKIE)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
        .or(query.filter(|q| !q.is_empty()))
        .map(str::to_string)
}

pub fn authorize(state: &AppState, token: Option<&str>) -> Result<(), ShareError> {
    let Some(password) = state.password.as_deref() else {
        return Ok(());
    };
    match token {
        Some(t) if t.as_bytes() == password.as_bytes() => Ok(()),
        _ => Err(ShareError::Unauthorized),
    }
}

/// Gate for every route except `/login`. API paths get a JSON 401, pages
/// get the login form.
pub async fn require_auth(State(state): State<AppState>, jar: CookieJar, req: Request, next: Next) -> Response {
    let query = Query::<TokenQuery>::try_from_uri(req.uri())
        .map(|Query(q)| q)
        .unwrap_or_default();
    let token = presented_token(&jar, query.token.as_deref());

    if authorize(&state, token.as_deref()).is_ok() {
        return next.run(req).await;
    }

    tracing::debug!(path = %req.uri().path(), "rejected unauthenticated request");
    if req.uri().path().starts_with("/api/") {
        (StatusCode::UNAUTHORIZED, Json(ErrorResp::new("unauthorized"))).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Html(pages::login_page(None))).into_response()
    }
}

async fn login_page(State(state): State<AppState>, Query(q): Query<LoginQuery>) -> Response {
    if state.password.is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }
    Html(pages::login_page(q.error.as_deref())).into_response()
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let Some(password) = state.password.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let submitted = form.ok().and_then(|Form(f)| f.password);

    if submitted.as_deref().map(str::as_bytes) != Some(password.as_bytes()) {
        tracing::warn!("failed login attempt");
        let location = format!("/login?error={}", urlencoding::encode(LOGIN_FAILED));
        return (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();
    }

    let cookie = Cookie::build((AUTH_COOKIE, password.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(COOKIE_MAX_AGE_SECS))
        .build();

    tracing::info!("login succeeded");
    let location = format!("/?token={}", urlencoding::encode(password));
    (StatusCode::FOUND, jar.add(cookie), [(header::LOCATION, location)]).into_response()
}
