//! Report export pipeline for the stockfolio client.
//!
//! The backend renders the report as an HTML document; this crate turns it
//! into a PNG file on disk: fetch, mount into an invisible off-screen
//! surface, wait for it to settle (or time out), rasterize the full
//! content extent, and write the image. If rasterization fails the raw
//! HTML is saved instead so the user can print it to PDF from a browser -
//! degraded, never silent.

pub mod errors;
pub mod pipeline;
pub mod surface;

#[cfg(feature = "chromium")]
pub mod chromium;

pub use errors::{ExportError, ExportResult};
pub use pipeline::{
    report_file_name, report_path, ExportOptions, ExportOutcome, ExportState,
    ReportExportPipeline, ReportFetcher, ReportScope, REPORT_PATH,
};
pub use surface::{RenderSurface, SurfaceFactory};

#[cfg(feature = "chromium")]
pub use chromium::ChromiumSurfaceFactory;
