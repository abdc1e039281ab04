//! # 에이전시 요청 DTO
//!
//! `brand`는 이미 인코딩된 문자열이나 라벨 형태의 속성 객체 둘 다 받습니다.
//!
//! ```json
//! { "name": "A", "content": "...", "simple_content": "...", "brand": "[\"s\",\"1\",\"w\",[\"1\"]]" }
//! { "name": "A", "content": "...", "simple_content": "...",
//!   "brand": { "location": "서울", "mbti": "ENFJ", "main_category": "웹개발", "sub_categories": ["프론트엔드"] } }
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::codec::brand_codec::BrandFacets;
use crate::errors::errors::{AppError, AppResult};
use crate::utils::string_utils::deserialize_optional_string;

/// `brand` 입력
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BrandInput {
    /// 이미 인코딩된 문자열
    Encoded(String),
    /// 라벨 형태의 속성
    Facets(BrandFacets),
}

impl BrandInput {
    /// 저장용 문자열로 변환합니다.
    pub fn into_encoded(self) -> AppResult<String> {
        match self {
            BrandInput::Encoded(raw) => Ok(raw),
            BrandInput::Facets(facets) => facets.encode(),
        }
    }
}

/// 에이전시 생성 요청
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgencyRequest {
    #[validate(length(min = 1, message = "에이전시 이름을 입력해주세요"))]
    pub name: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub simple_content: String,

    pub brand: BrandInput,
}

/// 에이전시 수정 요청
///
/// 모든 필드는 선택입니다. `location`, `mbti`, `main_category`가 모두 주어지면
/// `brand`를 새로 인코딩하고, 아니면 `brand` 값을 그대로 사용합니다.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAgencyRequest {
    #[serde(default)]
    pub no: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub simple_content: Option<String>,

    #[serde(default)]
    pub category: Option<Vec<Value>>,

    #[serde(default)]
    pub brand: Option<BrandInput>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub mbti: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub main_category: Option<String>,

    #[serde(default)]
    pub sub_categories: Option<Vec<String>>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image_url: Option<String>,

    /// base64로 인코딩된 이미지 (data URL 형식 허용)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image_filename: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image_content_type: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
}

/// 업로드할 이미지
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl UpdateAgencyRequest {
    /// 요청 속성으로 만든 `brand` 문자열
    pub fn encoded_brand(&self) -> AppResult<Option<String>> {
        if let (Some(location), Some(mbti), Some(main_category)) =
            (&self.location, &self.mbti, &self.main_category)
        {
            let facets = BrandFacets {
                location: location.clone(),
                mbti: mbti.clone(),
                main_category: main_category.clone(),
                sub_categories: self.sub_categories.clone().unwrap_or_default(),
            };
            return facets.encode().map(Some);
        }

        self.brand.clone().map(BrandInput::into_encoded).transpose()
    }

    /// `image` 필드를 디코딩합니다.
    ///
    /// `data:image/png;base64,...` 형식이면 content-type을 거기서 읽습니다.
    pub fn image_payload(&self) -> AppResult<Option<ImagePayload>> {
        let Some(raw) = self.image.as_deref() else {
            return Ok(None);
        };

        let (data_url_type, encoded) = match raw.split_once(";base64,") {
            Some((prefix, data)) => (prefix.strip_prefix("data:").map(str::to_string), data),
            None => (None, raw),
        };

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::ValidationError(format!("이미지 base64 디코딩 실패: {}", e)))?;

        let content_type = self
            .image_content_type
            .clone()
            .or(data_url_type)
            .unwrap_or_else(|| "image/png".to_string());

        let filename = self.image_filename.clone().unwrap_or_else(|| {
            let extension = content_type.rsplit('/').next().unwrap_or("png");
            format!("{}.{}", uuid::Uuid::new_v4(), extension)
        });

        Ok(Some(ImagePayload { bytes, filename, content_type }))
    }
}
