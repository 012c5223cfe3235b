use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use backoff::ExponentialBackoffBuilder;

use crate::config::AppConfig;
use crate::error::AppError;

/// OpenAI 호출 타임아웃 (초)
const OPENAI_TIMEOUT_SECS: u64 = 25;

/// 헬스체크 호출 타임아웃 (초)
const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// OpenAI 에러를 세분화된 AppError로 변환
fn classify_openai_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("");
            let message = api_err.message.to_lowercase();

            if err_type == "invalid_request_error" && message.contains("api key") {
                AppError::OpenAiAuthError
            } else if err_type == "authentication_error" {
                AppError::OpenAiAuthError
            } else if err_type == "rate_limit_error" || message.contains("rate limit") {
                AppError::OpenAiRateLimitError
            } else if err_type == "server_error" || message.contains("server error") {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(api_err.message.clone())
            }
        }
        OpenAIError::Reqwest(req_err) => {
            let status = req_err.status().map(|s| s.as_u16());
            if req_err.is_timeout() || req_err.is_connect() {
                AppError::OpenAiTemporaryError
            } else if status == Some(401) {
                AppError::OpenAiAuthError
            } else if status == Some(429) {
                AppError::OpenAiRateLimitError
            } else if status.map(|s| (500..600).contains(&s)).unwrap_or(false) {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(req_err.to_string())
            }
        }
        _ => AppError::OpenAiError(error.to_string()),
    }
}

/// AI 클라이언트 인터페이스
///
/// OpenAI API 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// 채팅 완성 요청
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, AppError>;

    /// API 연결 상태 확인 (모델 목록 조회)
    async fn check_connectivity(&self) -> Result<(), AppError>;

    /// 헬스체크용 최소 텍스트 생성
    async fn health_check(&self) -> Result<String, AppError>;
}

/// Arc로 래핑된 AiClient (Clone 지원)
pub type AiClient = Arc<dyn AiClientTrait>;

/// OpenAI API 클라이언트 구현체
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, api_base: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        // 재시도는 retry 모듈에서 일괄 처리하므로 내장 백오프는 끈다
        let no_backoff = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(config).with_backoff(no_backoff),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.openai_api_key,
            &config.openai_api_base,
            &config.openai_model,
        )
    }
}

#[async_trait::async_trait]
impl AiClientTrait for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let response = tokio::time::timeout(
            Duration::from_secs(OPENAI_TIMEOUT_SECS),
            self.client.chat().create(request),
        )
        .await
        .map_err(|_| AppError::OpenAiTemporaryError)?
        .map_err(classify_openai_error)?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "OpenAI usage"
            );
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        tokio::time::timeout(
            Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS),
            self.client.models().list(),
        )
        .await
        .map_err(|_| AppError::OpenAiTemporaryError)?
        .map_err(classify_openai_error)?;
        Ok(())
    }

    async fn health_check(&self) -> Result<String, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(vec![build_system_message("Respond with exactly 'ok'")?])
            .max_tokens(5_u16)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let response = tokio::time::timeout(
            Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS),
            self.client.chat().create(request),
        )
        .await
        .map_err(|_| AppError::OpenAiTemporaryError)?
        .map_err(classify_openai_error)?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

/// 메시지 빌더 헬퍼 함수
pub(crate) fn build_system_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}

pub(crate) fn build_user_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}
