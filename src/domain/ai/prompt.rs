//! AI 프롬프트 모듈
//!
//! ## 구조
//! - `review`: 코드 리뷰 프롬프트
//! - `assistant`: 일반 질의 응답 프롬프트

mod assistant;
mod review;

pub use assistant::SYSTEM_PROMPT as ASSISTANT_SYSTEM_PROMPT;
pub use review::user_prompt as review_user_prompt;
pub use review::SYSTEM_PROMPT as REVIEW_SYSTEM_PROMPT;
