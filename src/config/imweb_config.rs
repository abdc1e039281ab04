//! # 아임웹 API 설정
//!
//! 아임웹 v2 API 호출에 필요한 인증 정보와 접속 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # 필수
//! export IMWEB_API_KEY="your-api-key"
//! export IMWEB_SECRET_KEY="your-secret-key"
//!
//! # 선택
//! export IMWEB_AGENCY_CATEGORY="s2024..."        # 새 에이전시 상품에 붙일 카테고리
//! export IMWEB_BASE_URL="https://api.imweb.me/v2"
//! export IMWEB_TIMEOUT_SECS="30"
//! ```

use std::env;
use std::time::Duration;

use crate::errors::errors::{AppError, AppResult};

/// 아임웹 공개 API 루트
pub const DEFAULT_BASE_URL: &str = "https://api.imweb.me/v2";

/// 외부 호출 기본 타임아웃 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 아임웹 API 접속 설정
#[derive(Debug, Clone)]
pub struct ImwebConfig {
    pub api_key: String,
    pub secret_key: String,
    /// 새로 생성하는 에이전시 상품에 지정할 카테고리 코드
    pub agency_category: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ImwebConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - `IMWEB_API_KEY` 또는 `IMWEB_SECRET_KEY` 누락
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정을 구성합니다.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::InternalError(format!("{} must be set", key)))
        };

        let api_key = required("IMWEB_API_KEY")?;
        let secret_key = required("IMWEB_SECRET_KEY")?;

        let agency_category = lookup("IMWEB_AGENCY_CATEGORY").filter(|v| !v.trim().is_empty());

        let base_url = lookup("IMWEB_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = lookup("IMWEB_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            secret_key,
            agency_category,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 테스트나 로컬 목 서버용 설정
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_key: "test-key".to_string(),
            secret_key: "test-secret".to_string(),
            agency_category: None,
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = ImwebConfig::from_lookup(lookup_from(&[
            ("IMWEB_API_KEY", "key"),
            ("IMWEB_SECRET_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.agency_category.is_none());
    }

    #[test]
    fn test_missing_credentials_fail() {
        let result = ImwebConfig::from_lookup(lookup_from(&[("IMWEB_API_KEY", "key")]));
        match result {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("IMWEB_SECRET_KEY")),
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = ImwebConfig::from_lookup(lookup_from(&[
            ("IMWEB_API_KEY", "key"),
            ("IMWEB_SECRET_KEY", "secret"),
            ("IMWEB_AGENCY_CATEGORY", "s20241102"),
            ("IMWEB_BASE_URL", "http://127.0.0.1:9999/v2/"),
            ("IMWEB_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9999/v2");
        assert_eq!(config.agency_category.as_deref(), Some("s20241102"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
