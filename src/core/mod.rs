//! # Core Module
//!
//! 서비스 전반에서 공유하는 실행 정책을 제공합니다.
//!
//! ### [`retry`] - 재시도 래퍼
//! - **RetryPolicy**: 최대 시도 횟수와 고정 대기 시간
//! - **retry / retry_when**: 실패할 수 있는 비동기 작업을 감싸는 조합자
//!
//! | 사용처 | 정책 |
//! |--------|------|
//! | 토큰 발급 | 3회, 1초 |
//! | MBTI 결과 저장/조회 | 5회, 1초 (환경 변수로 조정) |
//! | 토큰 만료 후 재호출 | 2회, 대기 없음, `TokenExpired`만 |

pub mod retry;

pub use retry::*;
