//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 한곳에서 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`server_config`] - 실행 환경, 바인딩 주소, 재시도, CORS, Rate Limiting
//! - [`imweb_config`] - 아임웹 API 인증 정보와 접속 설정
//!
//! ## 환경 분리
//!
//! `PROFILE` 값에 따라 `.env.dev` / `.env.prod` 파일을 먼저 로드한 뒤
//! 각 설정 타입이 환경 변수를 읽습니다.
//!
//! ```rust,ignore
//! use crate::config::{ImwebConfig, ServerConfig};
//!
//! let imweb = ImwebConfig::from_env()?;
//! let bind = ServerConfig::bind_address();
//! ```
//!
//! | Spring | Rust (이 프로젝트) |
//! |--------|-------------------|
//! | `@Value("${property}")` | `env::var("PROPERTY")` |
//! | `@Profile("dev")` | `.env.dev` + `Environment::Development` |
//! | `@ConfigurationProperties` | `ImwebConfig` |

pub mod server_config;
pub mod imweb_config;

pub use server_config::*;
pub use imweb_config::*;
