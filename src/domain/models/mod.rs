//! 도메인 모델
//!
//! - [`imweb`] - 아임웹 API 응답 모델 (상품, 회원, 응답 봉투)
//! - [`agency`] - 상품에서 복원한 에이전시 레코드

pub mod imweb;
pub mod agency;

pub use imweb::*;
pub use agency::*;
