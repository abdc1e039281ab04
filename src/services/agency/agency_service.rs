//! # 에이전시 서비스
//!
//! 에이전시 = 아임웹 상품입니다. 이 서비스는 상품을 에이전시 레코드로 바꾸거나
//! 에이전시 요청을 상품 payload로 바꿔 [`ImwebClient`]에 전달합니다.
//!
//! ```text
//! Handler ──▶ AgencyService ──▶ ImwebClient ──▶ api.imweb.me/v2
//!                  │
//!                  └── brand_codec (인코딩/디코딩)
//! ```

use std::sync::Arc;

use log::info;
use serde_json::{json, Map, Value};

use crate::domain::dto::agency::{CreateAgencyRequest, UpdateAgencyRequest};
use crate::domain::models::agency::{AgencyRecord, AgencyView};
use crate::errors::errors::AppResult;
use crate::services::imweb::ImwebClient;
use crate::utils::image_url::PLACEHOLDER_IMAGE_URL;
use crate::utils::string_utils::validate_required_string;

/// 목록 조회 페이지 크기
pub const LIST_PER_PAGE: u32 = 100;

/// 새 상품의 판매 상태
const DEFAULT_PROD_STATUS: &str = "sale";

/// 새 상품의 노출 상태
const DISPLAY_VISIBLE: &str = "VISIBLE";

pub struct AgencyService {
    client: Arc<ImwebClient>,
    agency_category: Option<String>,
}

impl AgencyService {
    pub fn new(client: Arc<ImwebClient>, agency_category: Option<String>) -> Self {
        Self { client, agency_category }
    }

    /// 첫 페이지(100개)의 에이전시 목록
    pub async fn list_agencies(&self) -> AppResult<Vec<AgencyRecord>> {
        let products = self.client.list_products(1, LIST_PER_PAGE).await?;

        let agencies: Vec<AgencyRecord> = products
            .into_iter()
            .map(|product| AgencyRecord::from_product(product, AgencyView::Summary))
            .collect();
        info!("최종 처리된 에이전시 수: {}", agencies.len());

        Ok(agencies)
    }

    /// 에이전시 상세
    pub async fn get_agency(&self, agency_id: &str) -> AppResult<AgencyRecord> {
        let product = self.client.get_product(agency_id).await?;
        Ok(AgencyRecord::from_product(product, AgencyView::Detail))
    }

    /// 에이전시 생성. 아임웹 응답을 그대로 반환합니다.
    pub async fn create_agency(&self, request: CreateAgencyRequest) -> AppResult<Value> {
        let payload = self.build_create_payload(request)?;
        info!("에이전시 생성 요청: {}", payload["name"]);

        self.client.create_product(&payload).await
    }

    /// 에이전시 수정. 이미지가 있으면 먼저 업로드합니다.
    pub async fn update_agency(&self, agency_id: &str, request: UpdateAgencyRequest) -> AppResult<Value> {
        let uploaded_url = match request.image_payload()? {
            Some(image) => {
                self.client
                    .upload_file(&image.bytes, &image.filename, &image.content_type)
                    .await?
            }
            None => None,
        };

        let payload = build_update_payload(&request, uploaded_url)?;
        info!("에이전시 {} 수정 필드: {:?}", agency_id, payload.as_object().map(|m| m.keys().collect::<Vec<_>>()));

        self.client.update_product(agency_id, &payload).await
    }

    /// 아임웹 쇼핑 카테고리
    pub async fn categories(&self) -> AppResult<Value> {
        self.client.list_categories().await
    }

    /// 현재 액세스 토큰
    pub async fn access_token(&self) -> AppResult<String> {
        self.client.tokens().acquire().await
    }

    fn build_create_payload(&self, request: CreateAgencyRequest) -> AppResult<Value> {
        let name = validate_required_string(&request.name, "name")?;
        let brand = request.brand.into_encoded()?;

        let categories: Vec<Value> = self
            .agency_category
            .iter()
            .map(|category| Value::String(category.clone()))
            .collect();

        Ok(json!({
            "name": name,
            "content": request.content,
            "simple_content": request.simple_content,
            "brand": brand,
            "prod_status": DEFAULT_PROD_STATUS,
            "price": 0,
            "price_tax": false,
            "stock_use": false,
            "categories": categories,
            "display_status": DISPLAY_VISIBLE,
            "images": [{
                "url": PLACEHOLDER_IMAGE_URL,
                "thumb_url": PLACEHOLDER_IMAGE_URL,
                "caption": ""
            }]
        }))
    }
}

/// 수정 payload. 요청에 있는 필드만 담고, 상태와 노출 값은 항상 채웁니다.
fn build_update_payload(request: &UpdateAgencyRequest, uploaded_url: Option<String>) -> AppResult<Value> {
    let mut payload = Map::new();

    if let Some(no) = &request.no {
        payload.insert("no".into(), no.clone());
    }
    if let Some(name) = &request.name {
        payload.insert("name".into(), json!(name));
    }
    if let Some(content) = &request.content {
        payload.insert("content".into(), json!(content));
    }
    if let Some(simple_content) = &request.simple_content {
        payload.insert("simple_content".into(), json!(simple_content));
    }
    if let Some(category) = &request.category {
        payload.insert("categories".into(), json!(category));
    }
    if let Some(brand) = request.encoded_brand()? {
        payload.insert("brand".into(), json!(brand));
    }
    if let Some(image_url) = uploaded_url.or_else(|| request.image_url.clone()) {
        payload.insert("image_url".into(), json!(image_url));
    }

    let status = request.status.as_deref().unwrap_or(DEFAULT_PROD_STATUS);
    payload.insert("prod_status".into(), json!(status));
    payload.insert("display_status".into(), json!(DISPLAY_VISIBLE));

    Ok(Value::Object(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::brand_codec::BrandFacets;
    use crate::config::imweb_config::ImwebConfig;
    use crate::domain::dto::agency::BrandInput;
    use crate::errors::errors::AppError;
    use crate::services::imweb::{TokenIssuer, TokenService};
    use async_trait::async_trait;

    struct StaticIssuer;

    #[async_trait]
    impl TokenIssuer for StaticIssuer {
        async fn issue_token(&self) -> AppResult<String> {
            Ok("token".to_string())
        }
    }

    fn service(category: Option<&str>) -> AgencyService {
        let config = ImwebConfig::for_base_url("http://127.0.0.1:9");
        let tokens = Arc::new(TokenService::new(Arc::new(StaticIssuer)));
        let client = Arc::new(ImwebClient::new(reqwest::Client::new(), &config, tokens));
        AgencyService::new(client, category.map(str::to_string))
    }

    #[test]
    fn test_create_payload_defaults() {
        let request = CreateAgencyRequest {
            name: " 웹 에이전시 ".to_string(),
            content: "<p>본문</p>".to_string(),
            simple_content: "요약".to_string(),
            brand: BrandInput::Facets(BrandFacets {
                location: "서울".to_string(),
                mbti: "ENFJ".to_string(),
                main_category: "웹개발".to_string(),
                sub_categories: vec!["프론트엔드".to_string(), "백엔드".to_string()],
            }),
        };

        let payload = service(Some("s2024")).build_create_payload(request).unwrap();

        assert_eq!(payload["name"], "웹 에이전시");
        assert_eq!(payload["brand"], r#"["s","1","w",["1","2"]]"#);
        assert_eq!(payload["prod_status"], "sale");
        assert_eq!(payload["price"], 0);
        assert_eq!(payload["price_tax"], false);
        assert_eq!(payload["stock_use"], false);
        assert_eq!(payload["categories"], json!(["s2024"]));
        assert_eq!(payload["display_status"], "VISIBLE");
        assert_eq!(payload["images"][0]["url"], PLACEHOLDER_IMAGE_URL);
        assert_eq!(payload["images"][0]["thumb_url"], PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_create_payload_without_category() {
        let request = CreateAgencyRequest {
            name: "에이전시".to_string(),
            content: String::new(),
            simple_content: String::new(),
            brand: BrandInput::Encoded("[]".to_string()),
        };

        let payload = service(None).build_create_payload(request).unwrap();
        assert_eq!(payload["categories"], json!([]));
        assert_eq!(payload["brand"], "[]");
    }

    #[test]
    fn test_create_payload_rejects_unknown_label() {
        let request = CreateAgencyRequest {
            name: "에이전시".to_string(),
            content: String::new(),
            simple_content: String::new(),
            brand: BrandInput::Facets(BrandFacets {
                mbti: "XXXX".to_string(),
                ..BrandFacets::default()
            }),
        };

        assert!(matches!(
            service(None).build_create_payload(request),
            Err(AppError::UnknownCode { table: "mbti", .. })
        ));
    }

    #[test]
    fn test_update_payload_only_given_fields() {
        let request: UpdateAgencyRequest = serde_json::from_value(json!({
            "name": "새 이름",
            "location": "그 외",
            "mbti": "INTJ",
            "main_category": "디자인",
            "sub_categories": ["UI/UX"],
            "image_url": "https://cdn.imweb.me/old.png"
        }))
        .unwrap();

        let payload = build_update_payload(&request, None).unwrap();
        assert_eq!(payload["name"], "새 이름");
        assert_eq!(payload["brand"], r#"["e","a","d",["a"]]"#);
        assert_eq!(payload["image_url"], "https://cdn.imweb.me/old.png");
        assert_eq!(payload["prod_status"], "sale");
        assert_eq!(payload["display_status"], "VISIBLE");
        assert!(payload.get("content").is_none());

        let payload = build_update_payload(&request, Some("https://cdn.imweb.me/new.png".to_string())).unwrap();
        assert_eq!(payload["image_url"], "https://cdn.imweb.me/new.png");
    }
}
