use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::models::{LoginForm, LoginResponse, SignupRequest, UserView};
use crate::gateway::extract::{FormBody, ValidatedJson};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult, ok};

/// Register a new user
///
/// POST /signup
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered", body = ApiResponse<UserView>),
        (status = 409, description = "Username already registered"),
        (status = 422, description = "Invalid username or password")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<UserView> {
    let user = state.user_auth.signup(&req.username, &req.password).await?;
    ok(user)
}

/// Login user
///
/// POST /login (OAuth2 password flow, form encoded). The body is the bare
/// token response, not the `ApiResponse` envelope.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Incorrect username or password"),
        (status = 422, description = "Malformed login form")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    match state.user_auth.login(&form.username, &form.password).await {
        Ok(resp) => Ok((StatusCode::OK, Json(resp))),
        Err(super::AuthError::Unauthorized(reason)) => {
            tracing::warn!("Login failed: {}", reason);
            Err(ApiError::unauthorized("Incorrect username or password"))
        }
        Err(e) => Err(e.into()),
    }
}
