//! 요청/응답 DTO
//!
//! - [`agency`] - 에이전시 생성/수정 요청
//! - [`mbti`] - MBTI 결과 저장 요청과 응답
//! - [`response`] - 공통 `{code, message, data}` 응답 래퍼

pub mod agency;
pub mod mbti;
pub mod response;

pub use response::*;
