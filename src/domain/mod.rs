//! 도메인 계층
//!
//! 아임웹 응답 모델, 에이전시 레코드, 요청/응답 DTO를 담습니다.
//! 로컬 저장소가 없으므로 엔티티 계층은 두지 않습니다.

pub mod dto;
pub mod models;
