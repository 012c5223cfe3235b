use serde::Serialize;
use utoipa::ToSchema;

/// 전체 헬스 상태 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// 서버 상태 (healthy/degraded/unhealthy)
    pub status: HealthState,
    /// 서버 버전
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// 서버 가동 시간 (초)
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    /// 의존성 체크 결과
    pub checks: HealthChecks,
}

/// 서버 상태
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// 정상 상태
    Healthy,
    /// 응답 지연 (2초 이상)
    Degraded,
    /// 장애 상태
    Unhealthy,
}

/// 의존성 체크 결과 모음
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    /// OpenAI API 상태
    pub openai_api: CheckResult,
}

/// 개별 체크 결과
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// 체크 성공 여부
    #[schema(example = true)]
    pub status: bool,
    /// 응답 지연 시간 (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 150)]
    pub latency_ms: Option<u64>,
    /// 에러 메시지 (실패 시)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn success(latency_ms: u64) -> Self {
        Self {
            status: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn failure(latency_ms: u64, error: String) -> Self {
        Self {
            status: false,
            latency_ms: Some(latency_ms),
            error: Some(error),
        }
    }

    /// 제한 시간 안에 응답이 없던 경우
    pub fn timeout(latency_ms: u64) -> Self {
        Self {
            status: false,
            latency_ms: Some(latency_ms),
            error: Some("Timeout".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_state_should_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&HealthState::Healthy).unwrap(), "\"healthy\"");
        assert_eq!(serde_json::to_string(&HealthState::Degraded).unwrap(), "\"degraded\"");
        assert_eq!(serde_json::to_string(&HealthState::Unhealthy).unwrap(), "\"unhealthy\"");
    }

    #[test]
    fn health_status_should_serialize_with_camel_case() {
        let status = HealthStatus {
            status: HealthState::Healthy,
            version: "0.1.0",
            uptime_secs: 3600,
            checks: HealthChecks {
                openai_api: CheckResult::success(150),
            },
        };

        let json = serde_json::to_string(&status).unwrap();

        assert!(json.contains("\"uptimeSecs\""));
        assert!(json.contains("\"openaiApi\""));
        assert!(json.contains("\"latencyMs\""));
    }

    #[test]
    fn check_result_should_skip_none_fields_in_serialization() {
        let json = serde_json::to_string(&CheckResult::success(100)).unwrap();

        assert!(!json.contains("error"));
    }
}
