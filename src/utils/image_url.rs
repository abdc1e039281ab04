//! # 이미지 URL 유틸리티
//!
//! 아임웹 상품의 `image_url` 값은 `{"키": "경로"}` 형태의 맵이거나 문자열입니다.
//! 맵이면 첫 번째 값을 사용하고, 상대 경로는 CDN 주소를 붙여 절대 URL로 만듭니다.

use serde_json::Value;

/// 상대 경로 이미지에 붙이는 CDN 주소
pub const IMAGE_CDN_PREFIX: &str = "https://cdn-optimized.imweb.me/upload/";

/// 상품 생성 시 이미지가 없을 때 사용하는 기본 이미지
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://cdn.imweb.me/upload/S202411023d3941ab4335b/6b53a30e8b45a.png";

/// 상품의 `image_url` 값에서 대표 이미지 URL을 추출합니다.
///
/// # 예제
/// ```rust,ignore
/// use serde_json::json;
///
/// assert_eq!(
///     first_image_url(&json!({"1": "S2024/a.png"})),
///     Some("https://cdn-optimized.imweb.me/upload/S2024/a.png".to_string())
/// );
/// assert_eq!(first_image_url(&json!(null)), None);
/// ```
pub fn first_image_url(value: &Value) -> Option<String> {
    let raw = match value {
        Value::Object(map) => map.values().next()?.as_str()?,
        Value::String(s) => s.as_str(),
        _ => return None,
    };

    normalize_image_url(raw)
}

/// 절대 URL은 그대로, 상대 경로는 CDN 주소를 붙여 반환합니다.
pub fn normalize_image_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("{}{}", IMAGE_CDN_PREFIX, trimmed.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_takes_first_value() {
        let value = json!({"main": "https://cdn.imweb.me/a.png", "sub": "b.png"});
        assert_eq!(first_image_url(&value).as_deref(), Some("https://cdn.imweb.me/a.png"));
    }

    #[test]
    fn test_relative_path_gets_cdn_prefix() {
        assert_eq!(
            first_image_url(&json!("S2024/b.png")).as_deref(),
            Some("https://cdn-optimized.imweb.me/upload/S2024/b.png")
        );
        assert_eq!(
            normalize_image_url("/S2024/c.png").as_deref(),
            Some("https://cdn-optimized.imweb.me/upload/S2024/c.png")
        );
    }

    #[test]
    fn test_missing_or_empty_values() {
        assert_eq!(first_image_url(&json!(null)), None);
        assert_eq!(first_image_url(&json!({})), None);
        assert_eq!(first_image_url(&json!("")), None);
        assert_eq!(first_image_url(&json!([1, 2])), None);
    }
}
