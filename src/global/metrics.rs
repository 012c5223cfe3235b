//! Prometheus 메트릭 레코더

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// HTTP 요청 시간 히스토그램 버킷 (초). AI 호출은 수 초 단위라 상단을 넓게 잡는다.
const REQUEST_DURATION_BUCKETS: &[f64] = &[0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0];

/// 전역 레코더를 설치하고 `/metrics` 렌더링용 핸들을 반환합니다.
///
/// 프로세스당 한 번만 호출할 수 있습니다.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            REQUEST_DURATION_BUCKETS,
        )?
        .install_recorder()
}
