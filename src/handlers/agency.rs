//! # Agency HTTP Handlers
//!
//! 에이전시(아임웹 상품) 목록/상세/생성/수정과 MBTI 궁합 테이블을 제공하는
//! 엔드포인트입니다. 모든 엔드포인트는 `/agency` 스코프 아래에 등록됩니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/agency/list` | 에이전시 목록 (1페이지, 100개) |
//! | `GET` | `/agency/categories` | 아임웹 카테고리 그대로 전달 |
//! | `GET` | `/agency/token` | 현재 아임웹 액세스 토큰 |
//! | `GET` | `/agency/mbti-results` | 전체 MBTI 궁합 테이블 |
//! | `GET` | `/agency/mbti-result/{mbti}` | 유형 하나의 궁합 |
//! | `POST` | `/agency/create` | 에이전시 생성 |
//! | `PATCH` | `/agency/{id}` | 에이전시 부분 수정 (이미지 업로드 포함) |
//! | `GET` | `/agency/{id}` | 에이전시 상세 |
//!
//! `/agency/{id}`는 고정 경로들보다 뒤에 등록되어야 합니다.

use actix_web::{get, patch, post, web, HttpResponse};
use log::info;
use serde_json::json;
use validator::Validate;

use crate::domain::dto::agency::{CreateAgencyRequest, UpdateAgencyRequest};
use crate::domain::dto::response::{AccessTokenData, ApiResponse};
use crate::errors::errors::AppError;
use crate::services::agency::AgencyService;
use crate::services::mbti::compatibility::{matching_for, matching_table};

/// 수정 성공 메시지
pub const MSG_UPDATED: &str = "업데이트 성공";

/// 에이전시 목록
///
/// ```bash
/// curl http://localhost:8000/agency/list
/// ```
#[get("/list")]
pub async fn list_agencies(service: web::Data<AgencyService>) -> Result<HttpResponse, AppError> {
    let agencies = service.list_agencies().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(agencies)))
}

#[get("/categories")]
pub async fn list_categories(service: web::Data<AgencyService>) -> Result<HttpResponse, AppError> {
    let categories = service.categories().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data_only(categories)))
}

/// 현재 캐시된(또는 새로 발급한) 아임웹 액세스 토큰
#[get("/token")]
pub async fn access_token(service: web::Data<AgencyService>) -> Result<HttpResponse, AppError> {
    let access_token = service.access_token().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(AccessTokenData { access_token })))
}

#[get("/mbti-results")]
pub async fn mbti_results() -> HttpResponse {
    HttpResponse::Ok().json(matching_table())
}

/// 유형 하나의 궁합. 알 수 없는 유형이면 404입니다.
#[get("/mbti-result/{mbti}")]
pub async fn mbti_result(mbti: web::Path<String>) -> Result<HttpResponse, AppError> {
    let mbti = mbti.into_inner().trim().to_uppercase();

    let entry = matching_for(&mbti)
        .ok_or_else(|| AppError::NotFound(format!("알 수 없는 MBTI 유형입니다: {}", mbti)))?;

    Ok(HttpResponse::Ok().json(json!({ mbti: entry })))
}

/// 에이전시 생성
///
/// `brand`는 인코딩된 문자열이나 `{location, mbti, main_category, sub_categories}`
/// 객체 중 하나로 받을 수 있습니다.
#[post("/create")]
pub async fn create_agency(
    service: web::Data<AgencyService>,
    payload: web::Json<CreateAgencyRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let created = service.create_agency(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data_only(created)))
}

/// 에이전시 부분 수정
///
/// 요청에 `image`(base64 또는 data URL)가 있으면 먼저 업로드하고
/// 업로드된 URL로 `image_url`을 대체합니다.
#[patch("/{agency_id}")]
pub async fn update_agency(
    service: web::Data<AgencyService>,
    agency_id: web::Path<String>,
    payload: web::Json<UpdateAgencyRequest>,
) -> Result<HttpResponse, AppError> {
    let agency_id = agency_id.into_inner();
    info!("에이전시 수정 요청: {}", agency_id);

    let updated = service.update_agency(&agency_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(updated, MSG_UPDATED)))
}

#[get("/{agency_id}")]
pub async fn get_agency(
    service: web::Data<AgencyService>,
    agency_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let agency = service.get_agency(&agency_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(agency)))
}
