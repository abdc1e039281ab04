//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리 유틸리티
//! - [`image_url`] - 상품 이미지 URL 정규화

pub mod string_utils;
pub mod image_url;
