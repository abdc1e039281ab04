//! # MBTI 결과 서비스
//!
//! 회원의 MBTI 결과는 아임웹 회원 정보의 `home_page` 필드에 저장됩니다.
//! 회원은 이메일 완전 일치로 찾습니다.
//!
//! 저장과 조회 모두 일시적인 실패를 견디도록 재시도 래퍼로 감쌉니다.
//!
//! | 최종 실패 | HTTP |
//! |-----------|------|
//! | 회원 없음 / 결과 없음 | 404 |
//! | 그 외 (토큰, 아임웹 오류 등) | 500 |

use std::sync::Arc;

use log::info;

use crate::core::retry::{retry, RetryPolicy};
use crate::domain::dto::mbti::MbtiResultResponse;
use crate::domain::models::imweb::ImwebMember;
use crate::errors::errors::{AppError, AppResult};
use crate::services::imweb::ImwebClient;

pub const MSG_MEMBER_NOT_FOUND: &str = "회원을 찾을 수 없습니다";
pub const MSG_RESULT_NOT_FOUND: &str = "MBTI 결과를 찾을 수 없습니다";
pub const MSG_SAVE_FAILED: &str = "MBTI 결과 저장에 실패했습니다";
pub const MSG_LOOKUP_FAILED: &str = "MBTI 결과 조회에 실패했습니다";

/// 회원 검색 결과 상한. 부분 일치 결과 뒤에 완전 일치 회원이 올 수 있습니다.
const MEMBER_SEARCH_LIMIT: u32 = 20;

pub struct MbtiService {
    client: Arc<ImwebClient>,
    policy: RetryPolicy,
}

impl MbtiService {
    pub fn new(client: Arc<ImwebClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// 회원의 `home_page`에 MBTI 결과를 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 재시도 후에도 회원이 없음
    /// * `AppError::InternalError` - 그 외 최종 실패
    pub async fn save_result(&self, email: &str, mbti: &str) -> AppResult<MbtiResultResponse> {
        let label = format!("MBTI 결과 저장 ({})", email);

        retry(&self.policy, &label, || self.save_once(email, mbti))
            .await
            .map_err(|e| e.into_retry_terminal(MSG_SAVE_FAILED))?;

        info!("MBTI 결과 저장 완료: {} → {}", email, mbti);
        Ok(MbtiResultResponse::saved(email, mbti))
    }

    /// 회원의 MBTI 결과를 조회합니다.
    pub async fn get_result(&self, email: &str) -> AppResult<MbtiResultResponse> {
        let label = format!("MBTI 결과 조회 ({})", email);

        let mbti = retry(&self.policy, &label, || self.get_once(email))
            .await
            .map_err(|e| e.into_retry_terminal(MSG_LOOKUP_FAILED))?;

        Ok(MbtiResultResponse::found(email, mbti))
    }

    async fn save_once(&self, email: &str, mbti: &str) -> AppResult<()> {
        let member = self.find_member(email, MSG_MEMBER_NOT_FOUND).await?;
        self.client.update_member_home_page(&member.member_code, mbti).await
    }

    async fn get_once(&self, email: &str) -> AppResult<String> {
        let member = self.find_member(email, MSG_RESULT_NOT_FOUND).await?;

        member
            .mbti_result()
            .map(str::to_string)
            .ok_or_else(|| AppError::NotFound(MSG_RESULT_NOT_FOUND.to_string()))
    }

    async fn find_member(&self, email: &str, not_found_message: &str) -> AppResult<ImwebMember> {
        let members = self
            .client
            .search_members_by_email(email, MEMBER_SEARCH_LIMIT)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(not_found_message.to_string()),
                other => other,
            })?;

        members
            .into_iter()
            .find(|member| !member.member_code.is_empty() && member.has_email(email))
            .ok_or_else(|| AppError::NotFound(not_found_message.to_string()))
    }
}
