//! # MBTI 결과 응답 DTO
//!
//! 저장과 조회 모두 `{email, mbti, message}` 형태로 응답합니다.

use serde::Serialize;

/// MBTI 결과 저장 성공 메시지
pub const MSG_SAVED: &str = "MBTI 결과가 성공적으로 저장되었습니다";

/// MBTI 결과 조회 성공 메시지
pub const MSG_FOUND: &str = "MBTI 결과 조회 성공";

/// MBTI 결과 저장/조회 응답
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MbtiResultResponse {
    pub email: String,
    pub mbti: Option<String>,
    pub message: String,
}

impl MbtiResultResponse {
    pub fn saved(email: impl Into<String>, mbti: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            mbti: Some(mbti.into()),
            message: MSG_SAVED.to_string(),
        }
    }

    pub fn found(email: impl Into<String>, mbti: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            mbti: Some(mbti.into()),
            message: MSG_FOUND.to_string(),
        }
    }
}
