//! # 재시도 래퍼
//!
//! 실패할 수 있는 비동기 작업을 정해진 횟수만큼 고정 간격으로 다시 실행합니다.
//! 지수 백오프나 지터는 없습니다.
//!
//! ## 동작
//!
//! ```text
//! attempt 1 ──실패──▶ sleep(delay) ──▶ attempt 2 ──실패──▶ ... ──▶ attempt N ──실패──▶ Err(마지막 에러)
//!     │                                    │
//!    성공 ──▶ Ok                           성공 ──▶ Ok
//! ```
//!
//! 대기는 `tokio::time::sleep`으로 처리되어 다른 요청을 막지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::retry::{retry, RetryPolicy};
//!
//! let member = retry(&RetryPolicy::default(), "회원 검색", || async {
//!     client.search_members_by_email(email, 1).await
//! })
//! .await
//! .map_err(|e| e.into_retry_terminal("MBTI 결과 조회에 실패했습니다"))?;
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::{error, warn};

/// 재시도 횟수와 간격
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 최초 시도를 포함한 최대 실행 횟수
    pub max_attempts: u32,
    /// 실패 후 다음 시도까지의 대기 시간
    pub delay: Duration,
}

impl Default for RetryPolicy {
    /// 5회, 1초 간격
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// 토큰 발급용 정책 (3회, 1초 간격)
    pub fn token_acquisition() -> Self {
        Self::new(3, Duration::from_secs(1))
    }

    /// 대기 없이 바로 다시 시도하는 정책
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

/// 모든 에러에 대해 재시도합니다.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, label: &str, op: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_when(policy, label, |_| true, op).await
}

/// `should_retry`가 `true`를 돌려주는 에러에 대해서만 재시도합니다.
///
/// 그 외의 에러는 남은 횟수와 관계없이 즉시 반환됩니다.
pub async fn retry_when<T, E, P, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    should_retry: P,
    mut op: F,
) -> Result<T, E>
where
    E: Display,
    P: Fn(&E) -> bool,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !should_retry(&e) => return Err(e),
            Err(e) if attempt >= max_attempts => {
                error!("{} 최대 재시도 횟수 도달 ({}/{}): {}", label, attempt, max_attempts, e);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "{} 실패, {:?} 후 재시도... ({}/{}): {}",
                    label, policy.delay, attempt, max_attempts, e
                );
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::AppError;
    use actix_web::http::StatusCode;
    use tokio::time::Instant;

    fn assert_elapsed(start: Instant, secs: u64) {
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(secs), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(secs) + Duration::from_millis(100), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_n_failures_with_n_delays() {
        for failures in 0..5u32 {
            let mut calls = 0u32;
            let start = Instant::now();

            let result: Result<&str, AppError> = retry(&RetryPolicy::default(), "test", || {
                calls += 1;
                let current = calls;
                async move {
                    if current <= failures {
                        Err(AppError::UpstreamError("일시적 오류".to_string()))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

            assert_eq!(result.unwrap(), "ok");
            assert_eq!(calls, failures + 1);
            assert_elapsed(start, failures as u64);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_stops_at_max_attempts() {
        let mut calls = 0u32;
        let start = Instant::now();

        let result: Result<(), AppError> = retry(&RetryPolicy::default(), "test", || {
            calls += 1;
            async { Err(AppError::NotFound("MBTI 결과를 찾을 수 없습니다".to_string())) }
        })
        .await;

        assert_eq!(calls, 5);
        assert_elapsed(start, 4);

        let terminal = result.unwrap_err().into_retry_terminal("MBTI 결과 조회에 실패했습니다");
        assert_eq!(terminal.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_unexpected_error_maps_to_500() {
        let mut calls = 0u32;

        let result: Result<(), AppError> = retry(&RetryPolicy::new(3, Duration::from_secs(1)), "test", || {
            calls += 1;
            async { Err(AppError::TokenExpired("code -2".to_string())) }
        })
        .await;

        assert_eq!(calls, 3);
        let terminal = result.unwrap_err().into_retry_terminal("MBTI 결과 저장에 실패했습니다");
        assert_eq!(terminal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_when_stops_on_non_retryable_error() {
        let mut calls = 0u32;
        let start = Instant::now();

        let result: Result<(), AppError> = retry_when(
            &RetryPolicy::default(),
            "test",
            AppError::is_token_expired,
            || {
                calls += 1;
                let current = calls;
                async move {
                    if current == 1 {
                        Err(AppError::TokenExpired("code -2".to_string()))
                    } else {
                        Err(AppError::NotFound("상품 없음".to_string()))
                    }
                }
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(calls, 2);
        assert_elapsed(start, 1);
    }

    #[test]
    fn test_policy_never_allows_zero_attempts() {
        assert_eq!(RetryPolicy::immediate(0).max_attempts, 1);
        assert_eq!(RetryPolicy::token_acquisition().max_attempts, 3);
        assert_eq!(RetryPolicy::default().delay, Duration::from_secs(1));
    }
}
