//! Service wiring.
//!
//! One `ServiceContext` per process: the shared HTTP client plus every
//! service built over it, behind their traits so views and tests can swap
//! implementations.

use std::sync::Arc;

use anyhow::Context as _;

use stockfolio_connect::ApiClient;
use stockfolio_core::portfolios::{PortfolioService, PortfolioServiceTrait};
use stockfolio_core::session::{FileTokenStore, SessionService, SessionServiceTrait};
use stockfolio_core::trades::{TradeService, TradeServiceTrait};
use stockfolio_export::{ExportOptions, ReportExportPipeline, SurfaceFactory};

use crate::config::Config;

pub struct ServiceContext {
    pub client: Arc<ApiClient>,
    pub portfolios: Arc<dyn PortfolioServiceTrait>,
    pub trades: Arc<dyn TradeServiceTrait>,
    pub session: Arc<dyn SessionServiceTrait>,
    config: Config,
}

impl ServiceContext {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds an export pipeline over the shared client and the given
    /// surface factory, honoring the configured scale and output directory.
    pub fn export_pipeline(
        &self,
        surfaces: Arc<dyn SurfaceFactory>,
        scale: Option<f64>,
        output_dir: Option<std::path::PathBuf>,
    ) -> ReportExportPipeline {
        let options = ExportOptions {
            scale: scale.unwrap_or(self.config.export_scale),
            output_dir: output_dir.unwrap_or_else(|| self.config.export_dir.clone()),
            ..ExportOptions::default()
        };
        ReportExportPipeline::new(self.client.clone(), surfaces, options)
    }
}

/// Wires the client and services from configuration.
pub fn initialize_context(config: Config) -> anyhow::Result<Arc<ServiceContext>> {
    let client = Arc::new(
        ApiClient::new(&config.base_url, config.auth_scheme)
            .context("failed to initialize the backend client")?,
    );
    let store = Arc::new(FileTokenStore::new(config.token_file.clone()));

    let portfolios: Arc<dyn PortfolioServiceTrait> =
        Arc::new(PortfolioService::new(client.clone()));
    let trades: Arc<dyn TradeServiceTrait> = Arc::new(TradeService::new(client.clone()));
    let session: Arc<dyn SessionServiceTrait> =
        Arc::new(SessionService::new(client.clone(), store));

    Ok(Arc::new(ServiceContext {
        client,
        portfolios,
        trades,
        session,
        config,
    }))
}
