use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("잘못된 요청 형식입니다: {0}")]
    JsonParseFailed(String),

    #[error("잘못된 쿼리 파라미터입니다: {0}")]
    QueryParseFailed(String),

    #[error("{0}")]
    NotFound(String),

    #[error("요청 처리 시간이 초과되었습니다.")]
    RequestTimeout,

    #[error("AI 서비스 인증에 실패했습니다.")]
    OpenAiAuthError,

    #[error("AI 서비스 요청 한도를 초과했습니다.")]
    OpenAiRateLimitError,

    #[error("AI 서비스가 일시적으로 응답하지 않습니다.")]
    OpenAiTemporaryError,

    #[error("AI 서비스 에러: {0}")]
    OpenAiError(String),

    #[error("내부 에러: {0}")]
    Internal(String),
}

impl AppError {
    /// 에러 코드 반환
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::QueryParseFailed(_) => "COMMON400",
            AppError::NotFound(_) => "COMMON404",
            AppError::RequestTimeout => "COMMON408",
            AppError::OpenAiAuthError => "AI_001",
            AppError::OpenAiRateLimitError => "AI_002",
            AppError::OpenAiTemporaryError => "AI_003",
            AppError::OpenAiError(_) => "AI_004",
            AppError::Internal(_) => "COMMON500",
        }
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::QueryParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::OpenAiAuthError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::OpenAiRateLimitError => StatusCode::TOO_MANY_REQUESTS,
            AppError::OpenAiTemporaryError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::OpenAiError(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에 노출할 메시지
    ///
    /// 업스트림/내부 에러의 상세 내용은 로그에만 남깁니다.
    pub fn client_message(&self) -> String {
        match self {
            AppError::OpenAiError(_) => "AI 응답을 생성하지 못했습니다.".to_string(),
            AppError::Internal(_) => "서버 에러, 관리자에게 문의 바랍니다.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "Request failed");
        } else {
            tracing::warn!(code, error = %self, "Request rejected");
        }

        let body = ErrorResponse::new(code, self.client_message());
        (status, Json(body)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

/// QueryRejection을 AppError로 변환
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::QueryParseFailed(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
