use serde::Deserialize;

use crate::application::ports::LlmClientError;

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

/// Incremental decoder for an OpenAI-style chat-completion event stream.
///
/// Network chunks may split lines (and UTF-8 sequences) anywhere, so bytes are buffered
/// until a full line is available. Content deltas come out in arrival order.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
    finished: bool,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<StreamErrorBody>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct StreamErrorBody {
    message: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `data: [DONE]` has been seen. Later input is ignored.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn push(&mut self, bytes: &[u8]) -> Vec<Result<String, LlmClientError>> {
        let mut items = Vec::new();
        if self.done {
            return items;
        }

        self.buffer.extend_from_slice(bytes);

        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(item) = self.decode_line(&line) {
                items.push(item);
            }
            if self.done {
                self.buffer.clear();
                break;
            }
        }

        items
    }

    /// Flushes a trailing unterminated line and reports a stream that ended without
    /// a completion signal.
    pub fn finish(&mut self) -> Vec<Result<String, LlmClientError>> {
        let mut items = Vec::new();

        if !self.done && !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            if let Some(item) = self.decode_line(&line) {
                items.push(item);
            }
        }

        if !self.done && !self.finished {
            items.push(Err(LlmClientError::StreamInterrupted(
                "connection closed before the response completed".to_string(),
            )));
        }

        items
    }

    fn decode_line(&mut self, raw: &[u8]) -> Option<Result<String, LlmClientError>> {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim_end_matches(['\r', '\n']),
            Err(e) => return Some(Err(LlmClientError::InvalidResponse(e.to_string()))),
        };

        // Blank lines separate events; `:` lines are comments / keep-alives.
        let data = line.strip_prefix(DATA_PREFIX)?.trim_start();

        if data == DONE_MARKER {
            self.done = true;
            return None;
        }

        let chunk: ChatCompletionChunk = match serde_json::from_str(data) {
            Ok(chunk) => chunk,
            Err(e) => return Some(Err(LlmClientError::InvalidResponse(e.to_string()))),
        };

        if let Some(error) = chunk.error {
            return Some(Err(LlmClientError::StreamInterrupted(error.message)));
        }

        let choice = chunk.choices.into_iter().next()?;
        if choice.finish_reason.is_some() {
            self.finished = true;
        }

        choice
            .delta
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty())
            .map(Ok)
    }
}
