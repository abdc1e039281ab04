//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `main`에서 한 번 생성되어 `web::Data`로 핸들러에 주입됩니다.
//!
//! ```text
//! TokenService ◀── ImwebClient ◀──┬── AgencyService
//!                                 └── MbtiService
//! ```
//!
//! # Modules
//!
//! - [`imweb`] - 토큰 관리, 아임웹 API 클라이언트
//! - [`agency`] - 에이전시 목록/상세/생성/수정
//! - [`mbti`] - MBTI 결과 저장/조회, 궁합 테이블

pub mod imweb;
pub mod agency;
pub mod mbti;
