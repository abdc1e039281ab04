//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 아임웹 API 프록시 계층을 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `AuthenticationError` | 401 | 재시도 후에도 토큰 발급 실패 |
//! | `TokenExpired` | 401 | 호출 도중 토큰 만료 (재시도 대상) |
//! | `NotFound` | 404 | 상품/회원/MBTI 결과 없음 |
//! | `ValidationError` | 400 | 입력값 검증 실패 |
//! | `UnknownCode` | 400 | 코드 테이블에 없는 값 인코딩 시도 |
//! | `UpstreamError` | 500 | 아임웹 API 비정상 응답, 네트워크 오류 |
//! | `InternalError` | 500 | 예상치 못한 오류 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AppError;
//!
//! async fn find_member(email: &str) -> Result<ImwebMember, AppError> {
//!     let members = client.search_members_by_email(email, 1).await?;
//!     members.into_iter().next()
//!         .ok_or_else(|| AppError::NotFound("회원을 찾을 수 없습니다".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 토큰 발급 실패 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 호출 도중 토큰 만료 감지 (401, 보통은 재시도로 흡수됨)
    #[error("Token expired: {0}")]
    TokenExpired(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 코드 테이블에 없는 값 (400 Bad Request)
    #[error("Unknown {table} value: {value}")]
    UnknownCode { table: &'static str, value: String },

    /// 아임웹 API 에러 (500 Internal Server Error)
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 재시도가 모두 소진된 뒤 클라이언트에 노출할 에러로 변환합니다.
    ///
    /// "없음" 계열은 404로 유지하고, 그 외의 모든 실패는 500으로 모읍니다.
    pub fn into_retry_terminal(self, fallback_message: &str) -> AppError {
        match self {
            AppError::NotFound(msg) => AppError::NotFound(msg),
            other => {
                log::error!("{}: {}", fallback_message, other);
                AppError::InternalError(format!("{}: {}", fallback_message, other))
            }
        }
    }

    /// 토큰 만료 신호 여부
    pub fn is_token_expired(&self) -> bool {
        matches!(self, AppError::TokenExpired(_))
    }

    /// 응답에 사용할 HTTP 상태 코드
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::AuthenticationError(_) | AppError::TokenExpired(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) | AppError::UnknownCode { .. } => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::UpstreamError(format!("아임웹 API 응답 시간 초과: {}", e))
        } else {
            AppError::UpstreamError(format!("아임웹 API 요청 실패: {}", e))
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = AppError::status_code(self);

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "code": status.as_u16(),
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
