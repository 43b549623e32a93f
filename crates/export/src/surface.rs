//! Off-screen rendering surface abstraction.
//!
//! A surface is a scoped resource: the pipeline creates one per run,
//! drives it through mount → ready → rasterize, and disposes it on every
//! exit path.

use async_trait::async_trait;

use crate::errors::ExportResult;

/// An isolated, invisible rendering surface for one report document.
#[async_trait]
pub trait RenderSurface: Send {
    /// Injects the report HTML into the surface.
    async fn mount(&mut self, html: &str) -> ExportResult<()>;

    /// Resolves once the surface's content and styling have finished
    /// loading. Injected content may never signal readiness; the pipeline
    /// races this against a fixed timeout and proceeds on whichever
    /// resolves first.
    async fn wait_ready(&mut self) -> ExportResult<()>;

    /// Captures the surface's full scrollable extent as a PNG bitmap at
    /// the given device-scale factor.
    async fn rasterize(&mut self, scale: f64) -> ExportResult<Vec<u8>>;

    /// Tears the surface down. Infallible by contract; called exactly
    /// once per run regardless of outcome.
    async fn dispose(&mut self);
}

/// Creates one fresh surface per pipeline run.
#[async_trait]
pub trait SurfaceFactory: Send + Sync {
    async fn create(&self) -> ExportResult<Box<dyn RenderSurface>>;
}
