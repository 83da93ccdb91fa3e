mod openai_client;
mod sse_decoder;

pub use openai_client::{OpenAiClient, OpenAiClientFactory};
pub use sse_decoder::SseDecoder;
