//! Portfolios module - domain models, service, and traits.

mod portfolios_constants;
mod portfolios_model;
mod portfolios_service;
mod portfolios_traits;


// Re-export the public interface
pub use portfolios_constants::*;
pub use portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
pub use portfolios_service::PortfolioService;
pub use portfolios_traits::PortfolioServiceTrait;
