//! # 브랜드 코덱
//!
//! 아임웹 상품의 `brand` 필드 하나에 에이전시 속성 네 가지를 묶어 저장합니다.
//!
//! ## 저장 형식
//!
//! ```text
//! ["s", "1", "w", ["1", "2"]]
//!   │    │    │    └─ 서브 카테고리 코드 목록
//!   │    │    └────── 메인 카테고리 코드
//!   │    └─────────── MBTI 코드
//!   └──────────────── 지역 코드
//! ```
//!
//! ## 디코딩 정책
//!
//! 디코딩은 절대 실패하지 않습니다. 파싱 실패, 배열이 아닌 값, 길이 4 미만의
//! 배열은 모두 기본값 `("서울", "ENFJ", "", [])`으로 대체되고, 앞의 세 원소는
//! 필드별로 알 수 없는 코드일 때만 기본값을 사용합니다. 기본값이 적용되면
//! warn 레벨로 기록할 뿐 호출자에게 에러로 전달하지 않습니다.
//!
//! 서브 카테고리는 저장된 코드를 그대로 돌려주며, 라벨 변환은
//! [`BrandFacets::with_sub_category_labels`]로 호출자가 선택합니다.
//! 과거 데이터에는 라벨이 그대로 저장된 경우가 있어 두 형태를 모두 받아들입니다.
//!
//! ```rust,ignore
//! use crate::codec::brand_codec::{encode_brand, decode_brand};
//!
//! let raw = encode_brand("서울", "ENFJ", "웹개발", &["프론트엔드", "백엔드"])?;
//! assert_eq!(raw, r#"["s","1","w",["1","2"]]"#);
//!
//! let facets = decode_brand(Some(&raw)).with_sub_category_labels();
//! assert_eq!(facets.sub_categories, vec!["프론트엔드", "백엔드"]);
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::code_tables::{CATEGORIES, LOCATIONS, MBTI_TYPES, SUB_CATEGORIES};
use crate::errors::errors::{AppError, AppResult};

/// 지역 코드를 해석할 수 없을 때 사용하는 값
pub const DEFAULT_LOCATION: &str = "서울";

/// MBTI 코드를 해석할 수 없을 때 사용하는 값
pub const DEFAULT_MBTI: &str = "ENFJ";

/// `brand` 필드에서 복원한 에이전시 속성
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandFacets {
    pub location: String,
    pub mbti: String,
    pub main_category: String,
    #[serde(default)]
    pub sub_categories: Vec<String>,
}

impl Default for BrandFacets {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            mbti: DEFAULT_MBTI.to_string(),
            main_category: String::new(),
            sub_categories: Vec::new(),
        }
    }
}

impl BrandFacets {
    /// 서브 카테고리 항목을 사람이 읽을 수 있는 라벨로 바꿉니다.
    ///
    /// 코드면 라벨로 변환하고, 이미 라벨이면 그대로 두며,
    /// 어느 쪽도 아니면 원래 값을 유지합니다.
    pub fn with_sub_category_labels(mut self) -> Self {
        self.sub_categories = self
            .sub_categories
            .into_iter()
            .map(|entry| match SUB_CATEGORIES.label_of(&entry) {
                Some(label) => label.to_string(),
                None => entry,
            })
            .collect();
        self
    }

    /// 라벨 형태의 속성을 저장용 문자열로 인코딩합니다.
    ///
    /// 서브 카테고리에 이미 코드가 들어 있으면 그대로 사용합니다.
    pub fn encode(&self) -> AppResult<String> {
        let subs: Vec<&str> = self
            .sub_categories
            .iter()
            .map(|entry| match SUB_CATEGORIES.code_of(entry) {
                Some(code) => Ok(code),
                None if SUB_CATEGORIES.label_of(entry).is_some() => Ok(entry.as_str()),
                None => Err(AppError::UnknownCode {
                    table: SUB_CATEGORIES.name(),
                    value: entry.clone(),
                }),
            })
            .collect::<AppResult<_>>()?;

        pack(
            LOCATIONS.encode(&self.location)?,
            MBTI_TYPES.encode(&self.mbti)?,
            CATEGORIES.encode(&self.main_category)?,
            subs,
        )
    }
}

/// 네 가지 속성을 `brand` 문자열로 인코딩합니다.
///
/// 테이블에 없는 값이 하나라도 있으면 `UnknownCode` 에러를 반환합니다.
pub fn encode_brand<S: AsRef<str>>(
    location: &str,
    mbti: &str,
    category: &str,
    sub_categories: &[S],
) -> AppResult<String> {
    let subs = sub_categories
        .iter()
        .map(|label| SUB_CATEGORIES.encode(label.as_ref()))
        .collect::<AppResult<Vec<_>>>()?;

    pack(
        LOCATIONS.encode(location)?,
        MBTI_TYPES.encode(mbti)?,
        CATEGORIES.encode(category)?,
        subs,
    )
}

fn pack(location: &str, mbti: &str, category: &str, subs: Vec<&str>) -> AppResult<String> {
    serde_json::to_string(&(location, mbti, category, subs))
        .map_err(|e| AppError::InternalError(format!("brand 직렬화 실패: {}", e)))
}

/// `brand` 문자열을 속성으로 디코딩합니다. 실패하지 않습니다.
pub fn decode_brand(raw: Option<&str>) -> BrandFacets {
    let Some(raw) = raw else {
        warn!("brand 값이 없어 기본값을 사용합니다");
        return BrandFacets::default();
    };

    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) if items.len() >= 4 => items,
        Ok(_) => {
            warn!("brand 형식이 올바르지 않아 기본값을 사용합니다: {}", raw);
            return BrandFacets::default();
        }
        Err(e) => {
            warn!("brand 파싱 실패, 기본값을 사용합니다: {} ({})", raw, e);
            return BrandFacets::default();
        }
    };

    let location = lookup_or(&items[0], |c| LOCATIONS.label_of(c), DEFAULT_LOCATION, "location");
    let mbti = lookup_or(&items[1], |c| MBTI_TYPES.label_of(c), DEFAULT_MBTI, "mbti");
    let main_category = lookup_or(&items[2], |c| CATEGORIES.label_of(c), "", "main_category");

    BrandFacets {
        location,
        mbti,
        main_category,
        sub_categories: raw_codes(&items[3]),
    }
}

fn lookup_or(
    value: &Value,
    lookup: impl Fn(&str) -> Option<&'static str>,
    default: &str,
    field: &str,
) -> String {
    match value.as_str().and_then(lookup) {
        Some(label) => label.to_string(),
        None => {
            warn!("알 수 없는 {} 코드 {}, 기본값 '{}' 사용", field, value, default);
            default.to_string()
        }
    }
}

// 서브 카테고리 원소는 코드 문자열 그대로 둔다. 숫자로 저장된 과거 데이터만 문자열로 맞춘다.
fn raw_codes(value: &Value) -> Vec<String> {
    match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => {
            warn!("서브 카테고리 형식이 올바르지 않습니다: {}", value);
            Vec::new()
        }
    }
}
