//! ilovesales 에이전시 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다. 아임웹 설정을 읽어
//! 토큰 서비스와 API 클라이언트를 만들고, 에이전시/MBTI 서비스를
//! `web::Data`로 등록합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use ilovesales_backend::config::{
    CorsConfig, Environment, ImwebConfig, RateLimitConfig, RetryConfig, ServerConfig,
};
use ilovesales_backend::routes::configure_all_routes;
use ilovesales_backend::services::agency::AgencyService;
use ilovesales_backend::services::imweb::{ImwebAuthIssuer, ImwebClient, TokenService};
use ilovesales_backend::services::mbti::MbtiService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 ilovesales 에이전시 백엔드 시작중...");

    let (agency_service, mbti_service) = initialize_services().await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(agency_service, mbti_service).await
}

/// 아임웹 설정을 읽고 서비스 그래프를 구성합니다.
///
/// 시작 시 토큰을 한 번 발급해 두지만, 실패해도 서버는 뜹니다.
/// 첫 요청에서 다시 발급을 시도합니다.
async fn initialize_services() -> io::Result<(web::Data<AgencyService>, web::Data<MbtiService>)> {
    let config = ImwebConfig::from_env().map_err(to_io_error)?;
    info!("아임웹 API: {} (timeout {:?})", config.base_url, config.timeout);

    let http = ImwebClient::build_http(&config).map_err(to_io_error)?;

    let issuer = Arc::new(ImwebAuthIssuer::new(http.clone(), &config));
    let tokens = Arc::new(TokenService::new(issuer));

    match tokens.acquire().await {
        Ok(_) => info!("🔑 아임웹 액세스 토큰 발급 완료"),
        Err(e) => warn!("시작 시 토큰 발급 실패 (요청 시 재시도): {}", e),
    }

    let client = Arc::new(ImwebClient::new(http, &config, tokens));

    let agency_service = web::Data::new(AgencyService::new(
        client.clone(),
        config.agency_category.clone(),
    ));
    let mbti_service = web::Data::new(MbtiService::new(client, RetryConfig::mbti_policy()));

    Ok((agency_service, mbti_service))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    agency_service: web::Data<AgencyService>,
    mbti_service: web::Data<MbtiService>,
) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Rate Limiting 설정이 올바르지 않습니다")
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = CorsConfig::allowed_origins();
    info!("CORS 허용 Origin: {:?}", allowed_origins);

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(agency_service.clone())
            .app_data(mbti_service.clone())
            .configure(configure_all_routes)
    })
    .bind(bind_address.as_str())?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 실행 환경별 기본 필터를 사용합니다.
fn init_logging() {
    let default_filter = Environment::current().default_log_filter();
    env_logger::init_from_env(Env::default().default_filter_or(default_filter));
}

/// 허용 Origin 목록으로 CORS 미들웨어를 구성합니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

fn to_io_error(e: ilovesales_backend::errors::errors::AppError) -> io::Error {
    error!("서비스 초기화 실패: {}", e);
    io::Error::other(e.to_string())
}
