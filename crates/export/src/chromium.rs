//! Headless-Chromium render surface.
//!
//! The report document is a full HTML page with its own styling, so it is
//! rendered by an actual browser engine: one headless Chromium per export
//! run, navigated to the document via a data URL, screenshotted over its
//! full scrollable extent, then torn down.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::debug;

use crate::errors::{ExportError, ExportResult};
use crate::surface::{RenderSurface, SurfaceFactory};

/// Matches the report template's natural width.
const SURFACE_WINDOW_SIZE: (u32, u32) = (1800, 1000);

fn raster_err<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Rasterization(err.to_string())
}

/// Launches one headless browser per export run.
pub struct ChromiumSurfaceFactory;

#[async_trait]
impl SurfaceFactory for ChromiumSurfaceFactory {
    async fn create(&self) -> ExportResult<Box<dyn RenderSurface>> {
        let launched = tokio::task::spawn_blocking(|| -> Result<_, String> {
            let options = LaunchOptions::default_builder()
                .headless(true)
                .window_size(Some(SURFACE_WINDOW_SIZE))
                .build()
                .map_err(|e| e.to_string())?;
            let browser = Browser::new(options).map_err(|e| e.to_string())?;
            let tab = browser.new_tab().map_err(|e| e.to_string())?;
            Ok((browser, tab))
        })
        .await
        .map_err(raster_err)?
        .map_err(ExportError::Rasterization)?;

        let (browser, tab) = launched;
        debug!("Chromium surface launched");
        Ok(Box::new(ChromiumSurface {
            browser: Some(browser),
            tab,
        }))
    }
}

/// One tab in a dedicated headless browser.
pub struct ChromiumSurface {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

#[async_trait]
impl RenderSurface for ChromiumSurface {
    async fn mount(&mut self, html: &str) -> ExportResult<()> {
        let tab = self.tab.clone();
        let url = format!("data:text/html;base64,{}", STANDARD.encode(html));
        tokio::task::spawn_blocking(move || {
            tab.navigate_to(&url).map(|_| ()).map_err(|e| e.to_string())
        })
        .await
        .map_err(raster_err)?
        .map_err(ExportError::Rasterization)
    }

    async fn wait_ready(&mut self) -> ExportResult<()> {
        let tab = self.tab.clone();
        tokio::task::spawn_blocking(move || {
            tab.wait_until_navigated()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(raster_err)?
        .map_err(ExportError::Rasterization)
    }

    async fn rasterize(&mut self, scale: f64) -> ExportResult<Vec<u8>> {
        let tab = self.tab.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<u8>, String> {
            let width = eval_dimension(&tab, "document.body.scrollWidth")?;
            let height = eval_dimension(&tab, "document.body.scrollHeight")?;
            // Clip to the full scrollable extent, not just the viewport.
            let clip = Page::Viewport {
                x: 0.0,
                y: 0.0,
                width,
                height,
                scale,
            };
            tab.capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(clip),
                true,
            )
            .map_err(|e| e.to_string())
        })
        .await
        .map_err(raster_err)?
        .map_err(ExportError::Rasterization)
    }

    async fn dispose(&mut self) {
        // Dropping the Browser tears the whole headless process down.
        if let Some(browser) = self.browser.take() {
            let _ = tokio::task::spawn_blocking(move || drop(browser)).await;
        }
        debug!("Chromium surface disposed");
    }
}

fn eval_dimension(tab: &Tab, expression: &str) -> Result<f64, String> {
    let object = tab.evaluate(expression, false).map_err(|e| e.to_string())?;
    object
        .value
        .as_ref()
        .and_then(|value| value.as_f64())
        .ok_or_else(|| format!("no numeric result for {}", expression))
}
