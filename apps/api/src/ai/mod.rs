// AI writing assistance built on the shared llm_client.
// Responses are cached in Redis when REDIS_URL is configured.

pub mod cache;
pub mod handlers;
pub mod prompts;
pub mod suggestions;

pub use suggestions::AiAssistant;
