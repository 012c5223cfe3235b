pub mod config;
pub mod domain;
pub mod error;
pub mod global;
pub mod response;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::Uri, middleware, routing::get, BoxError, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::AppConfig;
use domain::ai::{routes::MOUNT_PREFIX, AiService, OpenAiClient, RetryPolicy};
use domain::health::HealthMonitor;
use error::AppError;

pub use domain::ai::{AiClient, AiClientTrait};

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::ai::handler::get_review,
        domain::ai::handler::get_response,
        domain::health::handler::health_check,
    ),
    components(schemas(response::ErrorResponse)),
    tags(
        (name = "AI", description = "AI 코드 리뷰 API"),
        (name = "Health", description = "헬스체크 API")
    )
)]
pub struct ApiDoc;

/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub ai_service: AiService,
    pub health: HealthMonitor,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(ai_service: AiService) -> Self {
        Self {
            ai_service,
            health: HealthMonitor::new(),
            metrics: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let client: AiClient = Arc::new(OpenAiClient::from_config(config));
        Self::new(AiService::new(client))
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// 라우터 생성
///
/// AI 라우트는 `/ai` 아래에 마운트됩니다.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::health_check))
        .route("/metrics", get(domain::health::metrics))
        .nest(MOUNT_PREFIX, domain::ai::routes::routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(global::middleware::request_tracing))
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("요청한 경로를 찾을 수 없습니다: {}", uri.path()))
}

/// 타임아웃 레이어 에러를 JSON 에러 응답으로 변환
async fn handle_timeout_error(error: BoxError) -> AppError {
    if error.is::<tower::timeout::error::Elapsed>() {
        AppError::RequestTimeout
    } else {
        AppError::Internal(error.to_string())
    }
}

/// 테스트용 라우터 생성 (Mock AI 클라이언트 주입)
///
/// 재시도 간격을 짧게 잡아 일시적 오류 테스트가 빠르게 끝나도록 합니다.
pub fn create_test_router_with_mock<C>(mock: C) -> Router
where
    C: AiClientTrait + 'static,
{
    let retry_policy = RetryPolicy {
        initial_interval: Duration::from_millis(1),
        max_interval: Duration::from_millis(5),
        max_elapsed_time: Duration::from_millis(100),
        multiplier: 2.0,
    };
    let client: AiClient = Arc::new(mock);
    let state = AppState::new(AiService::with_retry_policy(client, retry_policy));

    create_router(state, Duration::from_secs(10))
}
