pub mod mbti_service;
pub mod compatibility;

pub use mbti_service::MbtiService;
