//! 아임웹 API 연동
//!
//! - [`token_service`] - 액세스 토큰 캐시와 발급
//! - [`imweb_client`] - 인증 호출과 응답 봉투 해석

pub mod token_service;
pub mod imweb_client;

pub use token_service::{ImwebAuthIssuer, TokenIssuer, TokenService};
pub use imweb_client::ImwebClient;
