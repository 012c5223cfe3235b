use review_server::{
    config::AppConfig, create_router, global, shutdown::shutdown_signal, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        e
    })?;

    // 2. 로깅 초기화
    global::logging::init_logging(config.log_format);

    // 3. 상태 및 라우터 설정
    let mut state = AppState::from_config(&config);
    match global::metrics::install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => tracing::warn!(error = %e, "Metrics recorder not installed"),
    }

    // 시작 시 업스트림 연결을 한 번 확인하되 실패해도 서버는 띄운다
    match state.ai_service.check_connectivity().await {
        Ok(()) => tracing::info!(api_base = %config.openai_api_base, "OpenAI API reachable"),
        Err(e) => tracing::warn!(
            api_base = %config.openai_api_base,
            error = %e,
            "OpenAI API connectivity check failed"
        ),
    }

    let app = create_router(state, config.request_timeout);

    // 4. 서버 실행
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        model = %config.openai_model,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
