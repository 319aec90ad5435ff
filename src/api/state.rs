use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::MediaDispatcher;
use crate::observability::Metrics;
use crate::templates::JsonRenderer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Arc<MediaDispatcher>,
    pub renderer: JsonRenderer,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, dispatcher: MediaDispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
            renderer: JsonRenderer,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
