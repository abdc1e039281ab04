//! API 라우트 설정 모듈
//!
//! 에이전시, MBTI 라우트와 헬스체크 엔드포인트를 한 곳에서 등록합니다.
//! 핸들러가 사용하는 서비스(`web::Data<AgencyService>`, `web::Data<MbtiService>`)는
//! 호출하는 쪽에서 `app_data`로 먼저 등록해야 합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(agency_service.clone())
//!     .app_data(mbti_service.clone())
//!     .configure(configure_all_routes);
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(root).service(health_check);

    configure_agency_routes(cfg);
    configure_mbti_routes(cfg);
}

/// `/agency/*` 라우트
///
/// actix는 등록 순서대로 매칭하므로 `/{agency_id}` 패턴은 고정 경로 뒤에 둡니다.
fn configure_agency_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/agency")
            .service(handlers::agency::list_agencies)
            .service(handlers::agency::list_categories)
            .service(handlers::agency::access_token)
            .service(handlers::agency::mbti_results)
            .service(handlers::agency::mbti_result)
            .service(handlers::agency::create_agency)
            .service(handlers::agency::update_agency)
            .service(handlers::agency::get_agency),
    );
}

fn configure_mbti_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/mbti")
            .service(handlers::mbti::save_result)
            .service(handlers::mbti::get_result),
    );
}

fn health_body() -> serde_json::Value {
    json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "upstream": "imweb v2",
            "token_cache": "in-memory"
        }
    })
}

#[get("/")]
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(health_body())
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8000/health
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(health_body())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_endpoints() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for path in ["/", "/health"] {
            let req = test::TestRequest::get().uri(path).to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["status"], "healthy");
        }
    }

    #[actix_web::test]
    async fn test_mbti_compatibility_routes_need_no_services() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/agency/mbti-results").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_object().map(|m| m.len()), Some(16));
        assert!(body["INTJ"]["section_match"]["best_match"].is_array());

        let req = test::TestRequest::get().uri("/agency/mbti-result/intj").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["INTJ"]["section_match"]["good_match"].is_array());

        let req = test::TestRequest::get().uri("/agency/mbti-result/ABCD").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
