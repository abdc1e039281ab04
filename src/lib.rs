//! ilovesales 에이전시 백엔드
//!
//! 아임웹(imweb) v2 API를 프록시하여 에이전시 목록과 회원 MBTI 결과를
//! 제공하는 서비스입니다. 자체 저장소는 없고, 에이전시는 아임웹 상품,
//! MBTI 결과는 아임웹 회원 정보에 저장됩니다.
//!
//! # Features
//!
//! - **토큰 수명 관리**: 아임웹 액세스 토큰을 메모리에 캐시하고 만료 시 재발급
//! - **브랜드 코덱**: 지역/MBTI/카테고리를 상품 `brand` 필드의 짧은 코드 문자열로 변환
//! - **재시도 래퍼**: 일시적인 실패를 고정 간격으로 재시도
//! - **아임웹 클라이언트**: 상품, 카테고리, 회원, 파일 업로드
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /agency/*, /mbti/*, /health
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 에이전시/MBTI 로직, 재시도, 브랜드 코덱
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  ImwebClient    │ ← TokenService + reqwest
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  api.imweb.me   │
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod codec;
pub mod domain;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
