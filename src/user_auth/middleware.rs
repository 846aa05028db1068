use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::gateway::{state::AppState, types::ApiError};

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(ApiError::missing_auth)?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid token format"))?;

    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or_else(|| ApiError::unauthorized("Invalid token format"))?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(ApiError::unauthorized("Invalid token format"));
    }
    Ok(token)
}

/// Guard for every protected route.
///
/// Resolves the bearer token to an [`AuthenticatedUser`] and inserts it into
/// the request extensions; handlers take it as `Extension<AuthenticatedUser>`.
/// Nothing behind this layer runs for a request that fails here.
///
/// [`AuthenticatedUser`]: super::models::AuthenticatedUser
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned copy: the request is not held borrowed across the await below
    let token = match extract_bearer(request.headers()) {
        Ok(token) => token.to_owned(),
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), "Rejected request without bearer token");
            return Err(e);
        }
    };

    let user = state.user_auth.resolve(&token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use crate::gateway::types::error_codes;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(extract_bearer(&headers("bearer tok")).unwrap(), "tok");
    }

    #[test]
    fn test_missing_header() {
        let err = extract_bearer(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, error_codes::MISSING_AUTH);
    }

    #[test]
    fn test_wrong_scheme_or_empty_token() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer   ", "tokenonly"] {
            let err = extract_bearer(&headers(value)).unwrap_err();
            assert_eq!(err.code, error_codes::AUTH_FAILED, "{}", value);
        }
    }
}
