//! # 아임웹 API 클라이언트
//!
//! 인증이 필요한 아임웹 v2 API 호출을 감싸고, 본문 `code` 기반의 에러 신호를
//! [`AppError`]로 정규화합니다.
//!
//! ## 응답 해석
//!
//! | 조건 | 결과 |
//! |------|------|
//! | 본문 `code` = -2 또는 401, HTTP 401 | `invalidate()` 후 `TokenExpired` |
//! | HTTP 404 또는 본문 `code` = 404 | `NotFound` |
//! | 그 외 비정상 응답 | `UpstreamError` (응답 본문 포함) |
//!
//! `TokenExpired`가 발생한 호출은 새 토큰으로 한 번 더 실행됩니다.
//! 두 번째도 만료 신호를 받으면 그대로 호출자에게 전달합니다.
//!
//! ## 아웃바운드 엔드포인트
//!
//! | 메서드 | 경로 |
//! |--------|------|
//! | GET | `/shop/products` |
//! | GET / PATCH | `/shop/products/{id}` |
//! | POST | `/shop/products` |
//! | GET | `/shop/categories` |
//! | GET | `/member/members` |
//! | PATCH | `/member/member/{code}` |
//! | POST | `/file` (multipart) |

use std::future::Future;
use std::sync::Arc;

use log::{debug, error, info};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

use crate::config::imweb_config::ImwebConfig;
use crate::core::retry::{retry_when, RetryPolicy};
use crate::domain::models::imweb::{ImwebEnvelope, ImwebMember, ImwebProduct};
use crate::errors::errors::{AppError, AppResult, ErrorContext};
use crate::services::imweb::token_service::TokenService;

/// 인증 헤더 이름
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// 토큰 만료 시 재호출을 포함한 최대 실행 횟수
const TOKEN_REFRESH_ATTEMPTS: u32 = 2;

/// 아임웹 API 클라이언트
pub struct ImwebClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenService>,
}

impl ImwebClient {
    pub fn new(http: reqwest::Client, config: &ImwebConfig, tokens: Arc<TokenService>) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            tokens,
        }
    }

    /// 설정된 타임아웃을 가진 HTTP 클라이언트를 만듭니다.
    pub fn build_http(config: &ImwebConfig) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("HTTP 클라이언트 생성 실패")
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 토큰을 붙여 호출하고, 만료 신호를 받으면 새 토큰으로 다시 호출합니다.
    async fn authed<T, F, Fut>(&self, label: &str, call: F) -> AppResult<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let tokens = &self.tokens;
        let call = &call;

        retry_when(
            &RetryPolicy::immediate(TOKEN_REFRESH_ATTEMPTS),
            label,
            AppError::is_token_expired,
            || async move {
                let token = tokens.acquire().await?;
                call(token).await
            },
        )
        .await
    }

    /// 요청을 보내고 응답 봉투를 해석합니다.
    async fn send(&self, label: &str, request: reqwest::RequestBuilder) -> AppResult<ImwebEnvelope> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("{} 응답 - 상태: {}, 내용: {}", label, status, body);
        self.interpret(label, status, &body)
    }

    fn interpret(&self, label: &str, status: StatusCode, body: &str) -> AppResult<ImwebEnvelope> {
        let envelope = serde_json::from_str::<ImwebEnvelope>(body).ok();

        let expired = status == StatusCode::UNAUTHORIZED
            || envelope.as_ref().is_some_and(ImwebEnvelope::is_token_expired);
        if expired {
            self.tokens.invalidate();
            return Err(AppError::TokenExpired(format!("{}: {}", label, body)));
        }

        let not_found = status == StatusCode::NOT_FOUND
            || envelope.as_ref().is_some_and(ImwebEnvelope::is_not_found);
        if not_found {
            return Err(AppError::NotFound(format!("{}: 대상을 찾을 수 없습니다", label)));
        }

        match envelope {
            Some(envelope) if status.is_success() && envelope.is_success() => Ok(envelope),
            _ => {
                error!("{} 실패 - 상태: {}, 응답: {}", label, status, body);
                Err(AppError::UpstreamError(body.to_string()))
            }
        }
    }

    /// 상품 목록 한 페이지
    pub async fn list_products(&self, page: u32, per_page: u32) -> AppResult<Vec<ImwebProduct>> {
        let envelope = self
            .authed("상품 목록 조회", |token| {
                self.send(
                    "상품 목록 조회",
                    self.http
                        .get(self.url("/shop/products"))
                        .header(ACCESS_TOKEN_HEADER, token)
                        .query(&[("page", page), ("per_page", per_page)]),
                )
            })
            .await?;

        let products = envelope.list::<ImwebProduct>();
        info!("조회된 상품 수: {}", products.len());

        Ok(products)
    }

    /// 상품 단건
    pub async fn get_product(&self, product_id: &str) -> AppResult<ImwebProduct> {
        let path = format!("/shop/products/{}", urlencoding::encode(product_id));
        let envelope = self
            .authed("상품 조회", |token| {
                self.send(
                    "상품 조회",
                    self.http.get(self.url(&path)).header(ACCESS_TOKEN_HEADER, token),
                )
            })
            .await?;

        if envelope.data.is_null() {
            return Err(AppError::NotFound(format!("상품 {}을(를) 찾을 수 없습니다", product_id)));
        }

        serde_json::from_value(envelope.data)
            .map_err(|e| AppError::UpstreamError(format!("상품 파싱 실패: {}", e)))
    }

    /// 상품 생성. 아임웹 응답을 그대로 반환합니다.
    pub async fn create_product(&self, payload: &Value) -> AppResult<Value> {
        let envelope = self
            .authed("상품 생성", |token| {
                self.send(
                    "상품 생성",
                    self.http
                        .post(self.url("/shop/products"))
                        .header(ACCESS_TOKEN_HEADER, token)
                        .json(payload),
                )
            })
            .await?;

        to_raw(envelope)
    }

    /// 상품 수정. 아임웹 응답을 그대로 반환합니다.
    pub async fn update_product(&self, product_id: &str, payload: &Value) -> AppResult<Value> {
        let path = format!("/shop/products/{}", urlencoding::encode(product_id));
        let envelope = self
            .authed("상품 수정", |token| {
                self.send(
                    "상품 수정",
                    self.http
                        .patch(self.url(&path))
                        .header(ACCESS_TOKEN_HEADER, token)
                        .json(payload),
                )
            })
            .await?;

        to_raw(envelope)
    }

    /// 쇼핑 카테고리 목록
    pub async fn list_categories(&self) -> AppResult<Value> {
        let envelope = self
            .authed("카테고리 조회", |token| {
                self.send(
                    "카테고리 조회",
                    self.http
                        .get(self.url("/shop/categories"))
                        .header(ACCESS_TOKEN_HEADER, token),
                )
            })
            .await?;

        to_raw(envelope)
    }

    /// 이메일로 회원을 검색합니다. 완전 일치 여부는 호출하는 쪽에서 확인합니다.
    pub async fn search_members_by_email(&self, email: &str, limit: u32) -> AppResult<Vec<ImwebMember>> {
        let limit = limit.to_string();
        let envelope = self
            .authed("회원 검색", |token| {
                self.send(
                    "회원 검색",
                    self.http
                        .get(self.url("/member/members"))
                        .header(ACCESS_TOKEN_HEADER, token)
                        .query(&[
                            ("search_type", "email"),
                            ("search_value", email),
                            ("limit", limit.as_str()),
                        ]),
                )
            })
            .await?;

        Ok(envelope.list::<ImwebMember>())
    }

    /// 회원의 `home_page` 필드를 갱신합니다.
    pub async fn update_member_home_page(&self, member_code: &str, value: &str) -> AppResult<()> {
        let path = format!("/member/member/{}", urlencoding::encode(member_code));
        let body = json!({ "home_page": value });

        self.authed("회원 정보 수정", |token| {
            self.send(
                "회원 정보 수정",
                self.http
                    .patch(self.url(&path))
                    .header(ACCESS_TOKEN_HEADER, token)
                    .json(&body),
            )
        })
        .await?;

        Ok(())
    }

    /// 이미지를 업로드하고 첫 번째 파일 URL을 반환합니다.
    ///
    /// 업로드가 성공했지만 파일이 없거나, 아임웹이 에러 봉투를 돌려주면 `None`입니다.
    pub async fn upload_file(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> AppResult<Option<String>> {
        info!("이미지 업로드 시도 - 이름: {}, 타입: {}, 크기: {} bytes", filename, content_type, bytes.len());

        let result = self
            .authed("이미지 업로드", |token| async move {
                let part = Part::bytes(bytes.to_vec())
                    .file_name(filename.to_string())
                    .mime_str(content_type)
                    .map_err(|e| AppError::ValidationError(format!("잘못된 content-type: {}", e)))?;

                let form = Form::new()
                    .part("files[]", part)
                    .text("target", "shop")
                    .text("type", "image");

                self.send(
                    "이미지 업로드",
                    self.http
                        .post(self.url("/file"))
                        .header(ACCESS_TOKEN_HEADER, token)
                        .header(reqwest::header::ACCEPT, "application/json")
                        .multipart(form),
                )
                .await
            })
            .await;

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(AppError::UpstreamError(body)) => {
                error!("이미지 업로드 실패: {}", body);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let url = envelope
            .data
            .get("files")
            .and_then(Value::as_array)
            .and_then(|files| files.first())
            .and_then(|file| file.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string);

        match &url {
            Some(url) => info!("이미지 업로드 성공 - URL: {}", url),
            None => error!("이미지 업로드 응답에 파일이 없습니다"),
        }

        Ok(url)
    }
}

fn to_raw(envelope: ImwebEnvelope) -> AppResult<Value> {
    serde_json::to_value(envelope).context("응답 직렬화 실패")
}
