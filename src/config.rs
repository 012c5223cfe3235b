use std::env;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// 로그 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,

    // AI Service
    pub openai_api_key: String,
    /// 업스트림 API 기본 URL (라우트 경로가 아님)
    pub openai_api_base: String,
    pub openai_model: String,

    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// 임의의 키-값 소스에서 설정 로드
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let server_port = match get("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let openai_api_key = get("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let openai_api_base = get("OPENAI_API_BASE")
            .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let openai_model =
            get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

        let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            None => LogFormat::Json,
            Some(format) if format == "json" => LogFormat::Json,
            Some(format) if format == "pretty" => LogFormat::Pretty,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other)),
        };

        Ok(Self {
            server_host,
            server_port,
            openai_api_key,
            openai_api_base,
            openai_model,
            request_timeout: Duration::from_secs(request_timeout_secs),
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Invalid request timeout: {0}")]
    InvalidTimeout(String),
    #[error("Invalid log format (expected json or pretty): {0}")]
    InvalidLogFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_apply_defaults() {
        let config = AppConfig::from_source(source(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.openai_api_base, "https://api.openai.com/v1");
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn should_read_overrides() {
        let config = AppConfig::from_source(source(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "3000"),
            ("OPENAI_API_BASE", "http://localhost:11434/v1/"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("REQUEST_TIMEOUT_SECS", "15"),
            ("LOG_FORMAT", "Pretty"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.openai_api_base, "http://localhost:11434/v1");
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn should_fail_without_api_key() {
        let result = AppConfig::from_source(source(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));

        let result = AppConfig::from_source(source(&[("OPENAI_API_KEY", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn should_reject_invalid_port() {
        let result = AppConfig::from_source(source(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SERVER_PORT", "eighty"),
        ]));

        assert!(matches!(result, Err(ConfigError::InvalidPort(p)) if p == "eighty"));
    }

    #[test]
    fn should_reject_zero_timeout() {
        let result = AppConfig::from_source(source(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ]));

        assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn should_reject_unknown_log_format() {
        let result = AppConfig::from_source(source(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LOG_FORMAT", "xml"),
        ]));

        assert!(matches!(result, Err(ConfigError::InvalidLogFormat(_))));
    }
}
