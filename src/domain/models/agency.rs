//! # 에이전시 레코드
//!
//! 에이전시는 로컬에 저장되지 않습니다. 아임웹 상품을 조회할 때마다
//! `brand` 필드를 디코딩하고 나머지 필드를 옮겨 담아 새로 만듭니다.

use serde::Serialize;
use serde_json::Value;

use crate::codec::brand_codec::decode_brand;
use crate::domain::models::imweb::ImwebProduct;
use crate::utils::image_url::first_image_url;

/// 레코드 구성 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgencyView {
    /// 목록: `content`에 `simple_content_plain` 사용
    Summary,
    /// 상세: HTML `content`와 `simple_content` 포함
    Detail,
}

/// 프론트엔드에 내려주는 에이전시 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyRecord {
    pub no: Value,
    pub name: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_content: Option<String>,
    pub category: Value,
    pub brand: Option<String>,
    pub location: String,
    pub mbti: String,
    pub main_category: String,
    /// 사람이 읽을 수 있는 라벨
    pub sub_categories: Vec<String>,
    pub image_url: Option<String>,
    pub status: Option<String>,
}

impl AgencyRecord {
    pub fn from_product(product: ImwebProduct, view: AgencyView) -> Self {
        let facets = decode_brand(product.brand.as_deref()).with_sub_category_labels();

        let (content, simple_content) = match view {
            AgencyView::Summary => (product.simple_content_plain.unwrap_or_default(), None),
            AgencyView::Detail => (
                product.content.unwrap_or_default(),
                Some(product.simple_content.unwrap_or_default()),
            ),
        };

        let category = match product.categories {
            Value::Null => Value::Array(Vec::new()),
            other => other,
        };

        Self {
            no: product.no,
            name: product.name,
            content,
            simple_content,
            category,
            image_url: first_image_url(&product.image_url),
            brand: product.brand,
            location: facets.location,
            mbti: facets.mbti,
            main_category: facets.main_category,
            sub_categories: facets.sub_categories,
            status: product.prod_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_product() -> ImwebProduct {
        serde_json::from_value(json!({
            "no": 101,
            "name": "세일즈 에이전시",
            "content": "<p>상세</p>",
            "simple_content": "요약",
            "simple_content_plain": "요약 텍스트",
            "categories": ["s2024"],
            "brand": "[\"e\",\"a\",\"m\",[\"v\",\"PR\"]]",
            "image_url": {"1": "S2024/a.png"},
            "prod_status": "sale"
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_record() {
        let record = AgencyRecord::from_product(sample_product(), AgencyView::Summary);

        assert_eq!(record.content, "요약 텍스트");
        assert!(record.simple_content.is_none());
        assert_eq!(record.location, "그 외");
        assert_eq!(record.mbti, "INTJ");
        assert_eq!(record.main_category, "마케팅");
        assert_eq!(record.sub_categories, vec!["SNS마케팅", "PR"]);
        assert_eq!(record.image_url.as_deref(), Some("https://cdn-optimized.imweb.me/upload/S2024/a.png"));
        assert_eq!(record.status.as_deref(), Some("sale"));

        let body = serde_json::to_value(&record).unwrap();
        assert!(body.get("simple_content").is_none());
    }

    #[test]
    fn test_detail_record() {
        let record = AgencyRecord::from_product(sample_product(), AgencyView::Detail);
        assert_eq!(record.content, "<p>상세</p>");
        assert_eq!(record.simple_content.as_deref(), Some("요약"));
        assert_eq!(record.category, json!(["s2024"]));
    }

    #[test]
    fn test_product_without_brand_uses_defaults() {
        let product: ImwebProduct = serde_json::from_value(json!({"no": 1, "name": "빈 상품"})).unwrap();
        let record = AgencyRecord::from_product(product, AgencyView::Summary);

        assert_eq!(record.location, "서울");
        assert_eq!(record.mbti, "ENFJ");
        assert_eq!(record.main_category, "");
        assert!(record.sub_categories.is_empty());
        assert_eq!(record.category, json!([]));
        assert!(record.image_url.is_none());
    }
}
