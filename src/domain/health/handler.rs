use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::HealthStatus;
use crate::error::AppError;
use crate::AppState;

/// 헬스체크 API
///
/// 서버 상태, 버전, 가동 시간, 의존성 상태를 반환합니다.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "헬스체크 성공", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health.check(&state.ai_service).await)
}

/// Prometheus 메트릭 노출
///
/// 레코더가 설치되지 않은 경우 404를 반환합니다.
pub async fn metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::NotFound("메트릭이 비활성화되어 있습니다.".to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response())
}
