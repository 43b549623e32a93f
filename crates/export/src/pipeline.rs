//! The export pipeline itself.
//!
//! State machine: Idle → Fetching → Rendering → Rasterizing → Downloading
//! → Idle, with an error path from any state back to idle. Transitions are
//! reported through an observer callback so callers (and tests) can watch
//! progress.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use log::{debug, info, warn};

use stockfolio_connect::ApiClient;

use crate::errors::{ExportError, ExportResult};
use crate::surface::{RenderSurface, SurfaceFactory};

/// Report endpoint on the backend.
pub const REPORT_PATH: &str = "/api/stocks/trades/download_report/";

/// Default device-scale factor for rasterization.
pub const DEFAULT_RASTER_SCALE: f64 = 2.0;

/// Default upper bound on waiting for the surface to signal readiness.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(2);

/// Path for the report endpoint, optionally scoped to one portfolio.
pub fn report_path(portfolio_id: Option<i64>) -> String {
    match portfolio_id {
        Some(id) => format!("{}?portfolio_id={}", REPORT_PATH, id),
        None => REPORT_PATH.to_string(),
    }
}

/// Source of the pre-rendered HTML report.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn fetch_report(&self, portfolio_id: Option<i64>) -> ExportResult<String>;
}

#[async_trait]
impl ReportFetcher for ApiClient {
    async fn fetch_report(&self, portfolio_id: Option<i64>) -> ExportResult<String> {
        Ok(self.get_text(&report_path(portfolio_id)).await?)
    }
}

/// Pipeline states, reported in order through the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Fetching,
    Rendering,
    Rasterizing,
    Downloading,
}

/// Deployment-level export configuration.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Device-scale factor for rasterization. One value per deployment;
    /// never varied per call site.
    pub scale: f64,
    /// Upper bound on waiting for the surface's readiness signal.
    pub ready_timeout: Duration,
    /// Directory receiving exported files.
    pub output_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_RASTER_SCALE,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Scope of a report: one portfolio, or all of them.
#[derive(Debug, Clone, Default)]
pub struct ReportScope {
    pub portfolio_id: Option<i64>,
    /// Display name used for the output filename.
    pub portfolio_name: Option<String>,
}

impl ReportScope {
    /// Report over all portfolios.
    pub fn all() -> Self {
        Self::default()
    }

    /// Report scoped to one portfolio.
    pub fn portfolio(id: i64, name: impl Into<String>) -> Self {
        Self {
            portfolio_id: Some(id),
            portfolio_name: Some(name.into()),
        }
    }
}

/// What an export run produced.
#[derive(Debug)]
pub enum ExportOutcome {
    /// The rendered report as a PNG image.
    Png { path: PathBuf },
    /// Rasterization failed; the raw HTML report was written instead for
    /// the user to open in a browser and print to PDF.
    HtmlFallback { path: PathBuf, reason: String },
}

/// Fetch → render → rasterize → download, with the HTML fallback on
/// rasterization failure and a guaranteed surface disposal on every path.
pub struct ReportExportPipeline {
    fetcher: Arc<dyn ReportFetcher>,
    surfaces: Arc<dyn SurfaceFactory>,
    options: ExportOptions,
}

impl ReportExportPipeline {
    pub fn new(
        fetcher: Arc<dyn ReportFetcher>,
        surfaces: Arc<dyn SurfaceFactory>,
        options: ExportOptions,
    ) -> Self {
        Self {
            fetcher,
            surfaces,
            options,
        }
    }

    /// Runs one export.
    pub async fn run(&self, scope: &ReportScope) -> ExportResult<ExportOutcome> {
        self.run_with_observer(scope, |_| {}).await
    }

    /// Runs one export, reporting each state transition to `observe`.
    pub async fn run_with_observer<F>(
        &self,
        scope: &ReportScope,
        mut observe: F,
    ) -> ExportResult<ExportOutcome>
    where
        F: FnMut(ExportState) + Send,
    {
        observe(ExportState::Fetching);
        let html = self.fetcher.fetch_report(scope.portfolio_id).await?;

        observe(ExportState::Rendering);
        let rasterized = match self.surfaces.create().await {
            Ok(mut surface) => {
                let result = self
                    .render_and_rasterize(surface.as_mut(), &html, &mut observe)
                    .await;
                // The single disposal point: success, failure, and the
                // fallback path below all pass through here.
                surface.dispose().await;
                result
            }
            Err(err) => Err(err),
        };

        let png = match rasterized {
            Ok(png) => png,
            Err(err) => return self.fallback_to_html(scope, err, &mut observe).await,
        };

        observe(ExportState::Downloading);
        let path = self
            .options
            .output_dir
            .join(report_file_name(scope.portfolio_name.as_deref(), "png"));
        tokio::fs::write(&path, &png).await?;
        info!("Report exported to {}", path.display());

        observe(ExportState::Idle);
        Ok(ExportOutcome::Png { path })
    }

    async fn render_and_rasterize<F>(
        &self,
        surface: &mut dyn RenderSurface,
        html: &str,
        observe: &mut F,
    ) -> ExportResult<Vec<u8>>
    where
        F: FnMut(ExportState) + Send,
    {
        surface.mount(html).await?;

        // Injected content may never fire a deterministic ready signal;
        // proceed on whichever of load/timeout resolves first.
        match tokio::time::timeout(self.options.ready_timeout, surface.wait_ready()).await {
            Ok(Ok(())) => debug!("Render surface signalled ready"),
            Ok(Err(err)) => return Err(err),
            Err(_) => debug!(
                "No readiness signal within {:?}, rasterizing anyway",
                self.options.ready_timeout
            ),
        }

        observe(ExportState::Rasterizing);
        surface.rasterize(self.options.scale).await
    }

    /// Degraded path: save the raw HTML so the user can open it in a
    /// browser and print to PDF.
    async fn fallback_to_html<F>(
        &self,
        scope: &ReportScope,
        cause: ExportError,
        observe: &mut F,
    ) -> ExportResult<ExportOutcome>
    where
        F: FnMut(ExportState) + Send,
    {
        warn!(
            "Rasterization failed ({}); falling back to the raw HTML report",
            cause
        );
        observe(ExportState::Fetching);
        let html = self.fetcher.fetch_report(scope.portfolio_id).await?;

        observe(ExportState::Downloading);
        let path = self
            .options
            .output_dir
            .join(report_file_name(scope.portfolio_name.as_deref(), "html"));
        tokio::fs::write(&path, html.as_bytes()).await?;
        info!("HTML report saved to {}", path.display());

        observe(ExportState::Idle);
        Ok(ExportOutcome::HtmlFallback {
            path,
            reason: cause.to_string(),
        })
    }
}

/// `<portfolio>_report_<YYYY-MM-DD>.<ext>`, with the stem made filesystem
/// safe. No portfolio name means an all-portfolios report.
pub fn report_file_name(portfolio_name: Option<&str>, extension: &str) -> String {
    let stem = portfolio_name
        .map(sanitize_file_stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "all_portfolios".to_string());
    format!(
        "{}_report_{}.{}",
        stem,
        Local::now().format("%Y-%m-%d"),
        extension
    )
}

fn sanitize_file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
