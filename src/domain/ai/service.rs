use super::{
    client::{build_system_message, build_user_message, AiClient},
    dto::{AiAnswer, ReviewResult},
    prompt::{review_user_prompt, ASSISTANT_SYSTEM_PROMPT, REVIEW_SYSTEM_PROMPT},
    retry::{with_retry, RetryPolicy},
};
use crate::error::AppError;

/// AI 서비스
///
/// 프롬프트를 구성하고 재시도 정책을 적용해 AI 클라이언트를 호출합니다.
#[derive(Clone)]
pub struct AiService {
    client: AiClient,
    retry_policy: RetryPolicy,
}

impl AiService {
    pub fn new(client: AiClient) -> Self {
        Self::with_retry_policy(client, RetryPolicy::default())
    }

    pub fn with_retry_policy(client: AiClient, retry_policy: RetryPolicy) -> Self {
        Self {
            client,
            retry_policy,
        }
    }

    /// 코드 리뷰 생성
    pub async fn review_code(&self, code: &str) -> Result<ReviewResult, AppError> {
        let review = self
            .complete(REVIEW_SYSTEM_PROMPT, &review_user_prompt(code))
            .await?;

        Ok(ReviewResult { review })
    }

    /// 일반 프롬프트 응답 생성
    pub async fn answer_prompt(&self, prompt: &str) -> Result<AiAnswer, AppError> {
        let response = self.complete(ASSISTANT_SYSTEM_PROMPT, prompt).await?;

        Ok(AiAnswer {
            prompt: prompt.to_string(),
            response,
        })
    }

    /// 헬스체크용 호출 (재시도 없음)
    pub async fn health_check(&self) -> Result<String, AppError> {
        self.client.health_check().await
    }

    /// 업스트림 API 연결 확인 (모델 목록 조회, 토큰 소모 없음)
    pub async fn check_connectivity(&self) -> Result<(), AppError> {
        self.client.check_connectivity().await
    }

    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String, AppError> {
        let messages = vec![
            build_system_message(system_prompt)?,
            build_user_message(user_content)?,
        ];

        let content = with_retry(&self.retry_policy, || {
            let messages = messages.clone();
            async move { self.client.complete(messages).await }
        })
        .await?;

        if content.trim().is_empty() {
            return Err(AppError::OpenAiError("empty completion".to_string()));
        }

        Ok(content)
    }
}
