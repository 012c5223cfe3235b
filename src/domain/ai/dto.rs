use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// 공백만 있는 입력 거부
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("공백만으로 이루어진 값은 허용되지 않습니다".into());
        return Err(error);
    }
    Ok(())
}

/// 코드 리뷰 요청 DTO
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// 리뷰할 소스 코드 (1 ~ 20000자)
    #[validate(
        length(min = 1, max = 20000, message = "코드는 1자 이상 20000자 이하여야 합니다"),
        custom = "validate_not_blank"
    )]
    #[schema(example = "function sum(a, b) { return a + b }")]
    pub code: String,
}

/// 코드 리뷰 결과
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// AI가 작성한 리뷰 (Markdown)
    #[schema(example = "❌ Issues: 입력값 검증이 없습니다...")]
    pub review: String,
}

/// AI 응답 요청 쿼리
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PromptQuery {
    /// 질문 내용 (1 ~ 4000자)
    #[validate(
        length(min = 1, max = 4000, message = "프롬프트는 1자 이상 4000자 이하여야 합니다"),
        custom = "validate_not_blank"
    )]
    pub prompt: String,
}

/// AI 응답 결과
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiAnswer {
    /// 요청한 프롬프트
    #[schema(example = "Rust에서 Arc와 Rc의 차이는?")]
    pub prompt: String,

    /// AI 응답
    pub response: String,
}
