//! # MBTI Result Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/mbti/result` | 회원 `home_page`에 결과 저장 |
//! | `GET` | `/mbti/result/{email}` | 저장된 결과 조회 |
//!
//! 응답 본문은 `{email, mbti, message}` 입니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::mbti::MbtiResultRequest;
use crate::errors::errors::AppError;
use crate::services::mbti::MbtiService;

#[post("/result")]
pub async fn save_result(
    service: web::Data<MbtiService>,
    payload: web::Json<MbtiResultRequest>,
) -> Result<HttpResponse, AppError> {
    let mut request = payload.into_inner();
    request.email = request.email.trim().to_string();
    request.result = request.result.trim().to_uppercase();

    // 유효성 검사
    request.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = service.save_result(&request.email, &request.result).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/result/{email}")]
pub async fn get_result(
    service: web::Data<MbtiService>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = service.get_result(email.trim()).await?;

    Ok(HttpResponse::Ok().json(response))
}
