//! Health check handler

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};

/// Health check response data
#[derive(serde::Serialize, serde::Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    /// Build version
    #[schema(example = "0.1.0+abc1234")]
    pub version: String,
}

/// Minimum gap between two real database pings
const CHECK_INTERVAL_MS: i64 = 5000;

/// Result of the last database ping, reused for `CHECK_INTERVAL_MS`.
#[derive(Debug)]
pub struct HealthCache {
    checked_at_ms: AtomicI64,
    healthy: AtomicBool,
}

impl Default for HealthCache {
    fn default() -> Self {
        Self {
            checked_at_ms: AtomicI64::new(i64::MIN),
            healthy: AtomicBool::new(true),
        }
    }
}

impl HealthCache {
    /// Last recorded result, if it is still fresh at `now_ms`
    pub fn fresh(&self, now_ms: i64) -> Option<bool> {
        let checked_at = self.checked_at_ms.load(Ordering::Acquire);
        if now_ms.saturating_sub(checked_at) < CHECK_INTERVAL_MS {
            Some(self.healthy.load(Ordering::Acquire))
        } else {
            None
        }
    }

    pub fn record(&self, now_ms: i64, healthy: bool) {
        self.healthy.store(healthy, Ordering::Release);
        self.checked_at_ms.store(now_ms, Ordering::Release);
    }
}

/// Health check endpoint
///
/// Pings PostgreSQL when the service runs on it (at most once per
/// `CHECK_INTERVAL_MS`); the in-memory backend is always healthy. Internal
/// details never appear in the response.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let now_ms = Utc::now().timestamp_millis();

    let healthy = match state.pg_db {
        Some(ref db) => match state.health.fresh(now_ms) {
            Some(cached) => cached,
            None => {
                let ok = match db.health_check().await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!("[HEALTH] PostgreSQL ping failed: {}", e);
                        false
                    }
                };
                state.health.record(now_ms, ok);
                ok
            }
        },
        None => true,
    };

    if healthy {
        (
            StatusCode::OK,
            Json(ApiResponse::success(HealthResponse {
                timestamp_ms: now_ms,
                version: crate::version(),
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                code: error_codes::SERVICE_UNAVAILABLE,
                msg: "unavailable".to_string(),
                data: None,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_starts_empty() {
        let cache = HealthCache::default();
        assert_eq!(cache.fresh(0), None);
        assert_eq!(cache.fresh(Utc::now().timestamp_millis()), None);
    }

    #[test]
    fn test_failure_is_remembered_within_interval() {
        let cache = HealthCache::default();
        cache.record(10_000, false);
        assert_eq!(cache.fresh(10_000), Some(false));
        assert_eq!(cache.fresh(10_000 + CHECK_INTERVAL_MS - 1), Some(false));
        assert_eq!(cache.fresh(10_000 + CHECK_INTERVAL_MS), None);

        cache.record(20_000, true);
        assert_eq!(cache.fresh(20_001), Some(true));
    }

    #[test]
    fn test_caches_are_independent() {
        let a = HealthCache::default();
        let b = HealthCache::default();
        a.record(1_000, false);
        assert_eq!(b.fresh(1_000), None);
    }
}
