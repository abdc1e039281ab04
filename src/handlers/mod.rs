//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 받아 서비스 계층으로 넘기고, 결과를 JSON 응답으로 바꾸는
//! 핸들러 함수들입니다. 서비스는 `web::Data`로 주입받습니다.
//!
//! ```text
//!   Client (ilovesales 프론트엔드)
//!          │ HTTP Request/Response
//!   Handlers (이 모듈)            ← Web Layer
//!          │
//!   Services                      ← 아임웹 프록시, 재시도, 코덱
//!          │
//!   아임웹 v2 API
//! ```
//!
//! 에러는 `AppError`로 반환하면 `ResponseError` 구현이
//! `{code, error}` 형태의 응답으로 바꿔 줍니다.
//!
//! - **`agency`**: `/agency/*` 에이전시, 카테고리, 토큰, MBTI 궁합
//! - **`mbti`**: `/mbti/result*` 회원 MBTI 결과 저장/조회

pub mod agency;
pub mod mbti;
