use futures::stream::StreamExt;

use crate::application::ports::{FragmentSink, LlmClientError, LlmTokenStream};

/// Pulls answer fragments off the stream and writes each one to the sink as it arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseRenderer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub fragments: usize,
    pub characters: usize,
}

/// Rendering stopped early. Whatever was written before the failure stays in the sink.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("response stream interrupted: {source}")]
    Interrupted {
        rendered: RenderSummary,
        #[source]
        source: LlmClientError,
    },
    #[error("output closed before the response finished")]
    SinkClosed { rendered: RenderSummary },
}

impl StreamError {
    pub fn rendered(&self) -> RenderSummary {
        match self {
            StreamError::Interrupted { rendered, .. } | StreamError::SinkClosed { rendered } => {
                *rendered
            }
        }
    }
}

impl ResponseRenderer {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(skip_all)]
    pub async fn render<S>(
        &self,
        mut stream: LlmTokenStream,
        sink: &mut S,
    ) -> Result<RenderSummary, StreamError>
    where
        S: FragmentSink + ?Sized,
    {
        let mut rendered = RenderSummary::default();

        while let Some(item) = stream.next().await {
            match item {
                Ok(fragment) => {
                    if fragment.is_empty() {
                        continue;
                    }
                    if sink.write_fragment(&fragment).await.is_err() {
                        tracing::warn!(
                            fragments = rendered.fragments,
                            "Output closed, abandoning response stream"
                        );
                        return Err(StreamError::SinkClosed { rendered });
                    }
                    rendered.fragments += 1;
                    rendered.characters += fragment.chars().count();
                }
                Err(source) => {
                    tracing::error!(
                        error = %source,
                        fragments = rendered.fragments,
                        "Response stream interrupted"
                    );
                    return Err(StreamError::Interrupted { rendered, source });
                }
            }
        }

        tracing::info!(
            fragments = rendered.fragments,
            characters = rendered.characters,
            "Response rendered"
        );

        Ok(rendered)
    }
}
