//! 서버 실행 환경 설정 모듈
//!
//! 실행 환경, 바인딩 주소, 재시도 정책, CORS, Rate Limiting 설정을 관리합니다.

use std::env;
use std::time::Duration;

use log::error;

use crate::core::retry::RetryPolicy;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우 `Development`를 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            _ => Environment::Production,
        }
    }

    /// 기본 로그 필터
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Production => "info,actix_web=info",
            _ => "debug,actix_web=info",
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트. 기본값: 8000
    pub fn port() -> u16 {
        parse_or("PORT", env::var("PORT").ok(), 8000)
    }

    /// 서버가 바인딩할 호스트 주소. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// MBTI 결과 저장/조회 재시도 설정
pub struct RetryConfig;

impl RetryConfig {
    /// `MBTI_MAX_RETRIES` (기본 5), `RETRY_DELAY_MS` (기본 1000)
    pub fn mbti_policy() -> RetryPolicy {
        Self::policy_from(env::var("MBTI_MAX_RETRIES").ok(), env::var("RETRY_DELAY_MS").ok())
    }

    pub fn policy_from(max_retries: Option<String>, delay_ms: Option<String>) -> RetryPolicy {
        RetryPolicy::new(
            parse_or("MBTI_MAX_RETRIES", max_retries, 5),
            Duration::from_millis(parse_or("RETRY_DELAY_MS", delay_ms, 1000)),
        )
    }
}

/// 프론트엔드 허용 Origin
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://www.ilovesales.site",
    "https://ilovesales.site",
    "https://ilovesales-site.imweb.me",
];

/// CORS 설정
pub struct CorsConfig;

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분) 또는 기본 Origin 목록
    pub fn allowed_origins() -> Vec<String> {
        Self::origins_from(env::var("CORS_ALLOWED_ORIGINS").ok())
    }

    pub fn origins_from(raw: Option<String>) -> Vec<String> {
        let origins: Vec<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        if origins.is_empty() {
            DEFAULT_CORS_ORIGINS.iter().map(|origin| origin.to_string()).collect()
        } else {
            origins
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND` (기본 100), `RATE_LIMIT_BURST_SIZE` (기본 200)
    pub fn from_env() -> Self {
        Self {
            per_second: parse_or("RATE_LIMIT_PER_SECOND", env::var("RATE_LIMIT_PER_SECOND").ok(), 100),
            burst_size: parse_or("RATE_LIMIT_BURST_SIZE", env::var("RATE_LIMIT_BURST_SIZE").ok(), 200),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse::<T>().unwrap_or_else(|e| {
            error!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8000);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_retry_policy_defaults_and_overrides() {
        let policy = RetryConfig::policy_from(None, None);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(1));

        let policy = RetryConfig::policy_from(Some("3".to_string()), Some("0".to_string()));
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::ZERO);

        let policy = RetryConfig::policy_from(Some("many".to_string()), None);
        assert_eq!(policy.max_attempts, 5);
    }

    #[test]
    fn test_cors_origins() {
        assert_eq!(CorsConfig::origins_from(None).len(), DEFAULT_CORS_ORIGINS.len());
        assert_eq!(
            CorsConfig::origins_from(Some("http://localhost:3000/, ,https://a.site".to_string())),
            vec!["http://localhost:3000", "https://a.site"]
        );
    }
}
