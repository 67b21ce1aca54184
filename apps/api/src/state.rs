use std::sync::Arc;

use crate::config::Config;
use crate::flow_client::tweaks::Tweaks;
use crate::flow_client::FlowRunner;
use crate::preview::rasterizer::PageRasterizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request works on its own inputs.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable flow engine. Default: LangflowClient.
    pub flow_runner: Arc<dyn FlowRunner>,
    /// Pluggable page renderer. Default: PdfiumRasterizer.
    pub rasterizer: Arc<dyn PageRasterizer>,
    /// Shared component options; each action overlays its own prompt.
    pub base_tweaks: Tweaks,
}

impl AppState {
    pub fn new(
        config: Config,
        flow_runner: Arc<dyn FlowRunner>,
        rasterizer: Arc<dyn PageRasterizer>,
    ) -> Self {
        let base_tweaks = Tweaks::base(&config);
        Self {
            config,
            flow_runner,
            rasterizer,
            base_tweaks,
        }
    }
}
