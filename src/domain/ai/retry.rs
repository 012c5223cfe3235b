use backoff::{future::retry, ExponentialBackoff};
use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// 재시도 정책
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub max_elapsed_time: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(10),
            max_elapsed_time: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// 지수 백오프 설정 생성
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_interval,
            current_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: Some(self.max_elapsed_time),
            multiplier: self.multiplier,
            ..Default::default()
        }
    }
}

/// 재시도 가능한 에러인지 판단
///
/// Rate limit, timeout, 서버 에러(5xx) 등 일시적 오류는 재시도
/// 인증 오류, 요청 형식 오류 등 영구적 오류는 즉시 실패
fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::OpenAiRateLimitError | AppError::OpenAiTemporaryError => true,
        AppError::OpenAiError(msg) => {
            let msg_lower = msg.to_lowercase();
            msg_lower.contains("rate limit")
                || msg_lower.contains("timeout")
                || msg_lower.contains("timed out")
                || msg_lower.contains("429")
                || msg_lower.contains("502")
                || msg_lower.contains("503")
                || msg_lower.contains("504")
                || msg_lower.contains("connection")
                || msg_lower.contains("network")
        }
        _ => false,
    }
}

/// 재시도 로직을 적용한 비동기 작업 실행
///
/// 일시적 오류 시 지수 백오프로 재시도하고,
/// 영구적 오류 시 즉시 실패를 반환합니다.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T, AppError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    retry(policy.backoff(), || async {
        match operation().await {
            Ok(result) => Ok(result),
            Err(e) if is_retryable_error(&e) => {
                tracing::warn!(error = %e, "Retryable error, will retry...");
                Err(backoff::Error::transient(e))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Permanent error, not retrying");
                Err(backoff::Error::permanent(e))
            }
        }
    })
    .await
}
