use async_trait::async_trait;

/// Destination for rendered answer fragments.
#[async_trait]
pub trait FragmentSink: Send {
    /// Appends one fragment. An error means the reader is gone and nothing more will be shown.
    async fn write_fragment(&mut self, fragment: &str) -> Result<(), SinkClosed>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("output sink closed")]
pub struct SinkClosed;

#[async_trait]
impl FragmentSink for String {
    async fn write_fragment(&mut self, fragment: &str) -> Result<(), SinkClosed> {
        self.push_str(fragment);
        Ok(())
    }
}
