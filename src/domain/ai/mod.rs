pub mod client;
pub mod dto;
pub mod handler;
pub mod prompt;
pub mod retry;
pub mod routes;
pub mod service;

pub use client::{AiClient, AiClientTrait, OpenAiClient};
pub use retry::RetryPolicy;
pub use service::AiService;
