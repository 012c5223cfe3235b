//! AI 라우트 테이블
//!
//! 두 엔드포인트를 핸들러에 연결합니다. 라우터는 요청을 가공하지 않고
//! 그대로 핸들러에 넘깁니다. 테이블은 시작 시 한 번 만들어지고 이후 바뀌지 않습니다.

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};

use super::handler;
use crate::AppState;

/// 라우터를 마운트하는 경로
pub const MOUNT_PREFIX: &str = "/ai";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
}

/// 라우트 테이블 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiRoute {
    /// `POST /get-review` → `get_review`
    Review,
    /// `GET /get-ai-response` → `get_response`
    AiResponse,
}

impl AiRoute {
    pub const ALL: [AiRoute; 2] = [AiRoute::Review, AiRoute::AiResponse];

    pub fn method(self) -> RouteMethod {
        match self {
            AiRoute::Review => RouteMethod::Post,
            AiRoute::AiResponse => RouteMethod::Get,
        }
    }

    /// 마운트 경로 기준 상대 경로
    pub fn path(self) -> &'static str {
        match self {
            AiRoute::Review => "/get-review",
            AiRoute::AiResponse => "/get-ai-response",
        }
    }

    pub fn handler_name(self) -> &'static str {
        match self {
            AiRoute::Review => "get_review",
            AiRoute::AiResponse => "get_response",
        }
    }

    fn method_router(self) -> MethodRouter<AppState> {
        match self {
            AiRoute::Review => post(handler::get_review),
            AiRoute::AiResponse => get(handler::get_response),
        }
    }
}

/// 라우트 테이블로부터 AI 라우터 생성
pub fn routes() -> Router<AppState> {
    AiRoute::ALL
        .into_iter()
        .fold(Router::new(), |router, route| {
            router.route(route.path(), route.method_router())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;
    use std::collections::HashSet;

    #[test]
    fn route_table_should_bind_expected_methods_and_paths() {
        let table: Vec<_> = AiRoute::ALL
            .iter()
            .map(|r| (r.method(), r.path(), r.handler_name()))
            .collect();

        assert_eq!(
            table,
            vec![
                (RouteMethod::Post, "/get-review", "get_review"),
                (RouteMethod::Get, "/get-ai-response", "get_response"),
            ]
        );
    }

    #[test]
    fn route_paths_should_never_be_absolute_urls() {
        for route in AiRoute::ALL {
            let uri: Uri = route.path().parse().unwrap();

            assert!(route.path().starts_with('/'), "{:?}", route);
            assert!(!route.path().contains("://"), "{:?}", route);
            assert!(uri.scheme().is_none(), "{:?}", route);
            assert!(uri.host().is_none(), "{:?}", route);
            assert!(uri.query().is_none(), "{:?}", route);
        }
    }

    #[test]
    fn route_paths_should_be_unique() {
        let paths: HashSet<_> = AiRoute::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(paths.len(), AiRoute::ALL.len());
    }

    #[test]
    fn mount_prefix_should_be_relative() {
        assert!(MOUNT_PREFIX.starts_with('/'));
        assert!(!MOUNT_PREFIX.ends_with('/'));
    }
}
