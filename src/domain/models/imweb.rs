//! # 아임웹 API 응답 모델
//!
//! 아임웹 v2 API는 HTTP 상태와 별개로 본문의 `code` 필드로 결과를 알립니다.
//!
//! ```json
//! { "msg": "SUCCESS", "code": 200, "data": { "list": [ ... ] } }
//! ```
//!
//! | code | 의미 |
//! |------|------|
//! | 200 | 성공 |
//! | -2, 401 | 토큰 만료/무효 |
//! | 404 | 대상 없음 |
//! | 그 외 | 실패 |
//!
//! 필드 값의 형식이 상품마다 일정하지 않아 대부분 `#[serde(default)]`와
//! `serde_json::Value`로 받습니다.

use log::error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 성공 코드
pub const CODE_SUCCESS: i64 = 200;

/// 토큰 만료 코드
pub const CODE_TOKEN_EXPIRED: i64 = -2;

/// 목록 조회에서 관찰되는 인증 실패 코드
pub const CODE_UNAUTHORIZED: i64 = 401;

/// 대상 없음 코드
pub const CODE_NOT_FOUND: i64 = 404;

/// 아임웹 공통 응답 봉투
///
/// 알려진 필드 외의 값은 `extra`에 그대로 보존되어 원본 응답을 다시 직렬화할 수 있습니다.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImwebEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImwebEnvelope {
    pub fn is_token_expired(&self) -> bool {
        matches!(self.code, Some(CODE_TOKEN_EXPIRED) | Some(CODE_UNAUTHORIZED))
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Some(CODE_NOT_FOUND)
    }

    /// `code`가 없으면 HTTP 상태만으로 성공을 판단합니다.
    pub fn is_success(&self) -> bool {
        self.code.map_or(true, |code| code == CODE_SUCCESS)
    }

    /// `data.list` 배열
    ///
    /// 항목 단위로 파싱하며, 형식이 맞지 않는 항목은 로그만 남기고 건너뜁니다.
    pub fn list<T: DeserializeOwned>(&self) -> Vec<T> {
        let Some(items) = self.data.get("list").and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<T>(item.clone()) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    error!("목록 항목 {} 파싱 실패, 건너뜀: {} ({})", index, e, item);
                    None
                }
            })
            .collect()
    }
}

/// 아임웹 상품
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImwebProduct {
    #[serde(default)]
    pub no: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub simple_content: Option<String>,
    #[serde(default)]
    pub simple_content_plain: Option<String>,
    #[serde(default)]
    pub categories: Value,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: Value,
    #[serde(default)]
    pub prod_status: Option<String>,
}

/// 아임웹 회원
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImwebMember {
    #[serde(default)]
    pub member_code: String,
    #[serde(default)]
    pub email: Option<String>,
    /// MBTI 결과 저장에 사용하는 필드
    #[serde(default)]
    pub home_page: Option<String>,
}

impl ImwebMember {
    /// 이메일 완전 일치 여부 (ASCII 대소문자 무시)
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(email.trim()))
    }

    /// `home_page`에 저장된 4글자 결과
    pub fn mbti_result(&self) -> Option<&str> {
        self.home_page
            .as_deref()
            .map(str::trim)
            .filter(|value| value.chars().count() == 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_codes() {
        let expired: ImwebEnvelope = serde_json::from_value(json!({"code": -2, "msg": "Error Token"})).unwrap();
        assert!(expired.is_token_expired());
        assert!(!expired.is_success());

        let ok: ImwebEnvelope = serde_json::from_value(json!({"code": 200, "data": {"list": []}})).unwrap();
        assert!(ok.is_success());
        assert!(ok.list::<ImwebProduct>().is_empty());

        let no_code: ImwebEnvelope = serde_json::from_value(json!({"access_token": "abc"})).unwrap();
        assert!(no_code.is_success());
        assert_eq!(serde_json::to_value(&no_code).unwrap(), json!({"access_token": "abc"}));
    }

    #[test]
    fn test_product_tolerates_missing_fields() {
        let product: ImwebProduct = serde_json::from_value(json!({"no": 12, "name": "에이전시"})).unwrap();
        assert_eq!(product.no, json!(12));
        assert!(product.brand.is_none());
        assert!(product.image_url.is_null());
    }

    #[test]
    fn test_member_mbti_result_requires_four_chars() {
        let member = |home: Option<&str>| ImwebMember {
            member_code: "m1".to_string(),
            email: None,
            home_page: home.map(str::to_string),
        };

        assert_eq!(member(Some("INTJ")).mbti_result(), Some("INTJ"));
        assert_eq!(member(Some("https://blog")).mbti_result(), None);
        assert_eq!(member(None).mbti_result(), None);
    }

    #[test]
    fn test_list_skips_malformed_items() {
        let envelope: ImwebEnvelope = serde_json::from_value(json!({
            "code": 200,
            "data": {
                "list": [
                    {"no": 1, "brand": "[\"s\",\"1\",\"w\",[]]"},
                    {"no": 2, "brand": ["s", "1", "w", ["1"]]},
                    {"no": 3, "name": "정상"}
                ]
            }
        }))
        .unwrap();

        let products = envelope.list::<ImwebProduct>();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].no, json!(1));
        assert_eq!(products[1].no, json!(3));
    }

    #[test]
    fn test_member_email_match_is_exact() {
        let member = ImwebMember {
            member_code: "m1".to_string(),
            email: Some("User@Example.com".to_string()),
            home_page: None,
        };

        assert!(member.has_email("user@example.com"));
        assert!(!member.has_email("someone-else@example.com"));
        assert!(!member.has_email("user@example"));
        assert!(!ImwebMember::default().has_email("user@example.com"));
    }
}
