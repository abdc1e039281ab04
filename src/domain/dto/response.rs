//! # 공통 응답 DTO
//!
//! 에이전시 엔드포인트가 사용하는 `{code, message, data}` 래퍼입니다.

use actix_web::http::StatusCode;
use serde::Serialize;

/// API 응답 래퍼 `{code, message, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// `{code: 200, message: "success", data}`
    pub fn success(data: T) -> Self {
        Self::with_message(data, "success")
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: Some(message.into()),
            data,
        }
    }

    /// 메시지 없이 `{code: 200, data}`
    pub fn data_only(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: None,
            data,
        }
    }
}

/// `/agency/token` 응답 데이터
#[derive(Debug, Serialize)]
pub struct AccessTokenData {
    pub access_token: String,
}
