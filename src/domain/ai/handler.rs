use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use validator::Validate;

use super::dto::{AiAnswer, PromptQuery, ReviewRequest, ReviewResult};
use crate::error::AppError;
use crate::response::{BaseResponse, ErrorResponse};
use crate::AppState;

/// 코드 리뷰
///
/// 전달받은 코드를 AI가 리뷰하고 문제점, 수정안, 개선점을 Markdown으로 반환합니다.
#[utoipa::path(
    post,
    path = "/ai/get-review",
    tag = "AI",
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "리뷰 생성 성공", body = BaseResponse<ReviewResult>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 429, description = "AI 요청 한도 초과", body = ErrorResponse),
        (status = 502, description = "AI 응답 실패", body = ErrorResponse),
        (status = 503, description = "AI 서비스 일시 장애", body = ErrorResponse)
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    request: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ReviewResult>>, AppError> {
    let Json(request) = request?;

    tracing::info!(code_length = request.code.len(), "Review request received");

    request.validate()?;

    let result = state.ai_service.review_code(&request.code).await?;

    tracing::info!(
        review_length = result.review.len(),
        "Review generated successfully"
    );

    Ok(Json(BaseResponse::success(result)))
}

/// AI 응답
///
/// 쿼리 파라미터 `prompt`에 대한 AI 응답을 반환합니다.
#[utoipa::path(
    get,
    path = "/ai/get-ai-response",
    tag = "AI",
    params(PromptQuery),
    responses(
        (status = 200, description = "응답 생성 성공", body = BaseResponse<AiAnswer>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 429, description = "AI 요청 한도 초과", body = ErrorResponse),
        (status = 502, description = "AI 응답 실패", body = ErrorResponse),
        (status = 503, description = "AI 서비스 일시 장애", body = ErrorResponse)
    )
)]
pub async fn get_response(
    State(state): State<AppState>,
    query: Result<Query<PromptQuery>, QueryRejection>,
) -> Result<Json<BaseResponse<AiAnswer>>, AppError> {
    let Query(query) = query?;

    tracing::info!(prompt_length = query.prompt.len(), "AI response request received");

    query.validate()?;

    let answer = state.ai_service.answer_prompt(&query.prompt).await?;

    tracing::info!(
        response_length = answer.response.len(),
        "AI response generated successfully"
    );

    Ok(Json(BaseResponse::success(answer)))
}
