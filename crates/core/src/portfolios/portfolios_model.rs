//! Portfolio domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A named grouping of trades, as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input model for creating a new portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPortfolio {
    pub name: String,
}

impl NewPortfolio {
    /// Validates the new portfolio data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Portfolio name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for renaming a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioUpdate {
    pub name: String,
}

impl PortfolioUpdate {
    /// Validates the portfolio update data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Portfolio name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_portfolio_rejects_blank_name() {
        assert!(NewPortfolio {
            name: "   ".to_string()
        }
        .validate()
        .is_err());
        assert!(NewPortfolio {
            name: "Retirement".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_portfolio_parses_without_created_at() {
        let portfolio: Portfolio =
            serde_json::from_str(r#"{"id":1,"name":"Growth"}"#).unwrap();
        assert!(portfolio.created_at.is_none());
    }

    #[test]
    fn test_portfolio_parses_rfc3339_created_at() {
        let portfolio: Portfolio =
            serde_json::from_str(r#"{"id":1,"name":"Growth","created_at":"2026-01-15T10:30:00Z"}"#)
                .unwrap();
        assert!(portfolio.created_at.is_some());
    }
}
