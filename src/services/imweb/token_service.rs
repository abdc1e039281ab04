//! # 아임웹 액세스 토큰 관리
//!
//! 프로세스 전체에서 하나의 토큰을 캐시하고, 만료되었거나 무효화된 경우에만
//! 새로 발급받습니다.
//!
//! ## 상태 전이
//!
//! ```text
//!            issue 성공                     3000초 경과 / invalidate()
//!  ABSENT ───────────────▶ VALID ──────────────────────────────▶ ABSENT
//!    ▲                                                              │
//!    └────────────────────── 다음 get_token() ◀─────────────────────┘
//! ```
//!
//! - 발급 실패는 캐시에 아무것도 남기지 않습니다.
//! - 동시에 여러 요청이 빈 캐시를 보면 각자 발급을 요청합니다.
//!   발급은 멱등이므로 마지막 결과가 캐시에 남습니다.
//! - 락은 읽기/교체 순간에만 잡고 `await` 동안에는 잡지 않습니다.
//!
//! ## 발급 전송 계층
//!
//! 실제 `GET /auth` 호출은 [`TokenIssuer`] 트레이트 뒤에 있어서
//! 테스트에서는 호출 횟수를 세는 가짜 구현으로 바꿀 수 있습니다.
//!
//! ```rust,ignore
//! let issuer = Arc::new(ImwebAuthIssuer::new(http.clone(), &config));
//! let tokens = Arc::new(TokenService::new(issuer));
//!
//! let token = tokens.acquire().await?;   // 최대 3회 시도
//! tokens.invalidate();                   // 만료 코드 수신 시
//! ```

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::{info, warn};
use serde::Deserialize;

use crate::config::imweb_config::ImwebConfig;
use crate::core::retry::{retry, RetryPolicy};
use crate::errors::errors::{AppError, AppResult};

/// 토큰 재사용 시간 (50분)
pub const TOKEN_TTL_SECS: i64 = 3000;

/// 토큰 발급 전송 계층
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// 새 액세스 토큰을 발급받습니다.
    async fn issue_token(&self) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// `GET {base}/auth?key=&secret=` 발급기
pub struct ImwebAuthIssuer {
    http: reqwest::Client,
    auth_url: String,
    api_key: String,
    secret_key: String,
}

impl ImwebAuthIssuer {
    pub fn new(http: reqwest::Client, config: &ImwebConfig) -> Self {
        Self {
            http,
            auth_url: format!("{}/auth", config.base_url),
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
        }
    }
}

#[async_trait]
impl TokenIssuer for ImwebAuthIssuer {
    async fn issue_token(&self) -> AppResult<String> {
        let response = self
            .http
            .get(&self.auth_url)
            .query(&[("key", self.api_key.as_str()), ("secret", self.secret_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::AuthenticationError(format!("토큰 발급 요청 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::AuthenticationError(format!("토큰 응답 읽기 실패: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::AuthenticationError(format!(
                "토큰 발급 실패 (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: AuthResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::AuthenticationError(format!("토큰 응답 파싱 실패: {}", e)))?;

        parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError(format!("토큰 발급 실패: {}", body)))
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    issued_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && now - self.issued_at < ChronoDuration::seconds(TOKEN_TTL_SECS)
    }
}

/// 캐시된 액세스 토큰 관리 서비스
pub struct TokenService {
    issuer: Arc<dyn TokenIssuer>,
    cache: RwLock<Option<CachedToken>>,
    acquire_policy: RetryPolicy,
}

impl TokenService {
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            issuer,
            cache: RwLock::new(None),
            acquire_policy: RetryPolicy::token_acquisition(),
        }
    }

    /// 발급 재시도 정책을 바꿉니다.
    pub fn with_acquire_policy(mut self, policy: RetryPolicy) -> Self {
        self.acquire_policy = policy;
        self
    }

    /// 유효한 캐시 토큰을 반환하고, 없으면 한 번 발급을 시도합니다.
    pub async fn get_token(&self) -> AppResult<String> {
        if let Some(token) = self.cached_at(Utc::now()) {
            return Ok(token);
        }

        let value = self.issuer.issue_token().await?;
        self.store(CachedToken {
            value: value.clone(),
            issued_at: Utc::now(),
        });
        info!("아임웹 액세스 토큰 발급 완료");

        Ok(value)
    }

    /// 호출 지점에서 사용하는 토큰 확보 (3회, 1초 간격)
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 모든 시도 실패 (HTTP 401)
    pub async fn acquire(&self) -> AppResult<String> {
        retry(&self.acquire_policy, "액세스 토큰 발급", || self.get_token())
            .await
            .map_err(|e| match e {
                AppError::AuthenticationError(msg) => AppError::AuthenticationError(msg),
                other => AppError::AuthenticationError(format!("토큰 발급 실패: {}", other)),
            })
    }

    /// 캐시된 토큰을 무조건 비웁니다.
    pub fn invalidate(&self) {
        match self.cache.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        warn!("아임웹 액세스 토큰 무효화");
    }

    fn cached_at(&self, now: DateTime<Utc>) -> Option<String> {
        let guard = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        guard
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.value.clone())
    }

    fn store(&self, token: CachedToken) {
        match self.cache.write() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    #[cfg(test)]
    fn seed(&self, value: &str, issued_at: DateTime<Utc>) {
        self.store(CachedToken {
            value: value.to_string(),
            issued_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// 호출 횟수를 세는 가짜 발급기
    struct CountingIssuer {
        calls: AtomicUsize,
        fail_first: usize,
    }

    impl CountingIssuer {
        fn new(fail_first: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_first,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenIssuer for CountingIssuer {
        async fn issue_token(&self) -> AppResult<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.fail_first {
                Err(AppError::AuthenticationError("발급 실패".to_string()))
            } else {
                Ok(format!("token-{}", n))
            }
        }
    }

    #[tokio::test]
    async fn test_cached_token_is_reused() {
        let issuer = CountingIssuer::new(0);
        let service = TokenService::new(issuer.clone());

        let first = service.get_token().await.unwrap();
        let second = service.get_token().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(issuer.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_issue() {
        let issuer = CountingIssuer::new(0);
        let service = TokenService::new(issuer.clone());

        assert_eq!(service.get_token().await.unwrap(), "token-1");
        service.invalidate();
        assert_eq!(service.get_token().await.unwrap(), "token-2");
        assert_eq!(issuer.calls(), 2);
    }

    #[tokio::test]
    async fn test_stale_token_is_reissued() {
        let issuer = CountingIssuer::new(0);
        let service = TokenService::new(issuer.clone());

        service.seed("old", Utc::now() - ChronoDuration::seconds(TOKEN_TTL_SECS + 1));
        assert_eq!(service.get_token().await.unwrap(), "token-1");

        service.seed("fresh", Utc::now() - ChronoDuration::seconds(TOKEN_TTL_SECS - 60));
        assert_eq!(service.get_token().await.unwrap(), "fresh");
        assert_eq!(issuer.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let issuer = CountingIssuer::new(1);
        let service = TokenService::new(issuer.clone());

        assert!(matches!(service.get_token().await, Err(AppError::AuthenticationError(_))));
        assert_eq!(service.get_token().await.unwrap(), "token-2");
        assert_eq!(issuer.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_retries_then_succeeds() {
        let issuer = CountingIssuer::new(2);
        let service = TokenService::new(issuer.clone());
        let start = tokio::time::Instant::now();

        assert_eq!(service.acquire().await.unwrap(), "token-3");
        assert_eq!(issuer.calls(), 3);
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_gives_up_after_three_attempts() {
        let issuer = CountingIssuer::new(usize::MAX);
        let service = TokenService::new(issuer.clone());

        let err = service.acquire().await.unwrap_err();
        assert_eq!(issuer.calls(), 3);
        assert_eq!(err.status_code(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
