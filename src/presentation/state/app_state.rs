use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::application::services::{DocumentQaService, ResponseRenderer};
use crate::presentation::config::Settings;

pub struct AppState<F>
where
    F: FileLoader + ?Sized,
{
    pub qa_service: Arc<DocumentQaService<F>>,
    pub renderer: ResponseRenderer,
    pub settings: Settings,
}

impl<F> Clone for AppState<F>
where
    F: FileLoader + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            qa_service: Arc::clone(&self.qa_service),
            renderer: self.renderer,
            settings: self.settings.clone(),
        }
    }
}
