//! 에이전시 속성 코덱
//!
//! - [`code_tables`] - 라벨 ↔ 한 글자 코드 매핑 테이블
//! - [`brand_codec`] - 상품 `brand` 필드 인코딩/디코딩

pub mod code_tables;
pub mod brand_codec;

pub use brand_codec::{decode_brand, encode_brand, BrandFacets};
