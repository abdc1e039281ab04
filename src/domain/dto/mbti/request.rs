//! # MBTI 결과 저장 요청 DTO

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::codec::code_tables::MBTI_TYPES;

/// MBTI 결과 저장 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MbtiResultRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(custom(function = "validate_mbti_code"))]
    pub result: String,
}

/// 16가지 MBTI 유형 중 하나인지 확인합니다.
///
/// ```rust,ignore
/// assert!(validate_mbti_code("ENFJ").is_ok());
/// assert!(validate_mbti_code("ABCD").is_err());
/// ```
pub fn validate_mbti_code(value: &str) -> Result<(), ValidationError> {
    if MBTI_TYPES.code_of(value).is_none() {
        return Err(ValidationError::new("invalid_mbti")
            .with_message("MBTI는 16가지 유형 중 하나의 4글자 코드여야 합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, result: &str) -> MbtiResultRequest {
        MbtiResultRequest {
            email: email.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("user@example.com", "INFP").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(request("not-an-email", "INFP").validate().is_err());
    }

    #[test]
    fn test_invalid_mbti() {
        assert!(request("user@example.com", "ABCD").validate().is_err());
        assert!(request("user@example.com", "infp").validate().is_err());
        assert!(request("user@example.com", "INF").validate().is_err());
    }
}
