//! 로깅 초기화 모듈
//!
//! 구조화된 JSON 로그(기본) 또는 사람이 읽기 쉬운 pretty 로그를 stdout으로 출력합니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// `RUST_LOG`가 없을 때 사용하는 기본 필터
pub const DEFAULT_FILTER: &str = "info,review_server=debug";

/// 로깅 시스템을 초기화합니다.
///
/// 로그 레벨은 `RUST_LOG` 환경 변수로 조정합니다.
/// 이미 전역 subscriber가 설정되어 있으면 아무 것도 하지 않습니다.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(false),
            )
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
    };

    if let Err(err) = result {
        eprintln!("Failed to initialize tracing: {}", err);
    }
}
