use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::time::timeout;

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};
use crate::domain::ai::AiService;

/// 헬스체크 타임아웃 (5초)
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Degraded 상태 임계값 (2초)
const DEGRADED_THRESHOLD: Duration = Duration::from_secs(2);

/// 캐시 유효 시간 (30초)
const CACHE_DURATION: Duration = Duration::from_secs(30);

struct CachedCheck {
    result: CheckResult,
    cached_at: Instant,
}

/// 서버 가동 시간과 OpenAI 헬스체크 결과 캐시를 관리합니다.
#[derive(Clone)]
pub struct HealthMonitor {
    started_at: Instant,
    cache: Arc<RwLock<Option<CachedCheck>>>,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// 전체 헬스 체크 수행 (캐싱 적용)
    pub async fn check(&self, ai_service: &AiService) -> HealthStatus {
        let openai_check = self.check_openai_cached(ai_service).await;

        HealthStatus {
            status: determine_health_state(&openai_check),
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: self.uptime_secs(),
            checks: HealthChecks {
                openai_api: openai_check,
            },
        }
    }

    async fn check_openai_cached(&self, ai_service: &AiService) -> CheckResult {
        {
            let cached = self.cache.read().await;
            if let Some(result) = fresh_result(&cached) {
                tracing::debug!("Using cached health check result");
                return result;
            }
        }

        // 갱신은 쓰기 락을 잡은 요청 하나만 수행하고, 대기하던 요청은 갱신된 캐시를 사용
        let mut cache = self.cache.write().await;
        if let Some(result) = fresh_result(&cache) {
            return result;
        }

        tracing::debug!("Performing fresh health check");
        let result = check_openai_fresh(ai_service).await;

        *cache = Some(CachedCheck {
            result: result.clone(),
            cached_at: Instant::now(),
        });

        result
    }
}

fn fresh_result(cached: &Option<CachedCheck>) -> Option<CheckResult> {
    cached
        .as_ref()
        .filter(|c| c.cached_at.elapsed() < CACHE_DURATION)
        .map(|c| c.result.clone())
}

/// OpenAI 상태에 따른 전체 상태 결정
fn determine_health_state(check: &CheckResult) -> HealthState {
    if !check.status {
        return HealthState::Unhealthy;
    }

    match check.latency_ms {
        Some(latency) if latency >= DEGRADED_THRESHOLD.as_millis() as u64 => {
            HealthState::Degraded
        }
        _ => HealthState::Healthy,
    }
}

async fn check_openai_fresh(ai_service: &AiService) -> CheckResult {
    let start = Instant::now();
    let result = timeout(HEALTH_CHECK_TIMEOUT, ai_service.health_check()).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(_)) => {
            tracing::info!(latency_ms, "OpenAI health check passed");
            CheckResult::success(latency_ms)
        }
        Ok(Err(e)) => {
            tracing::warn!(latency_ms, error = %e, "OpenAI health check failed");
            CheckResult::failure(latency_ms, e.to_string())
        }
        Err(_) => {
            tracing::warn!("OpenAI health check timed out");
            CheckResult::timeout(latency_ms)
        }
    }
}
