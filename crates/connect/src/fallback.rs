//! Endpoint fallback resolver.
//!
//! Some logical operations have more than one plausible route on the
//! backend (delete-by-id vs delete-by-name, `?portfolio=` vs
//! `?portfolio_id=`). The resolver tries an ordered list of candidate
//! paths: 404 means "this route does not exist here, try the next one";
//! any other failure is terminal. This is the only retry policy in the
//! client — no backoff, no idempotency tokens.

use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::errors::{ApiError, ApiResult};

/// A successful resolution: the response plus the paths tried to get it.
#[derive(Debug)]
pub struct FallbackOutcome<T> {
    pub value: T,
    pub attempted: Vec<String>,
}

/// Try each candidate path in order and return the first success together
/// with the attempted-path record.
///
/// On an HTTP 404 the next candidate is tried. Any other failure aborts
/// immediately and is returned unchanged except annotated with the paths
/// already attempted. If every candidate 404s, the last error is wrapped
/// in [`ApiError::AllCandidatesExhausted`] with the full path list.
pub async fn resolve<T: DeserializeOwned>(
    client: &ApiClient,
    method: Method,
    candidates: &[String],
    body: Option<&Value>,
) -> ApiResult<FallbackOutcome<T>> {
    if candidates.is_empty() {
        return Err(ApiError::Unexpected(
            "no candidate endpoints provided".to_string(),
        ));
    }

    let mut attempted: Vec<String> = Vec::with_capacity(candidates.len());
    let mut last_not_found: Option<ApiError> = None;

    for path in candidates {
        attempted.push(path.clone());
        match client.request(method.clone(), path, body).await {
            Ok(value) => {
                if attempted.len() > 1 {
                    debug!(
                        "[api] {} resolved on candidate {} of {} ({})",
                        path,
                        attempted.len(),
                        candidates.len(),
                        attempted.join(", ")
                    );
                }
                return Ok(FallbackOutcome { value, attempted });
            }
            Err(err) if err.is_not_found() => {
                debug!("[api] {} returned 404, trying next candidate", path);
                last_not_found = Some(err);
            }
            Err(err) => {
                return Err(ApiError::Attempted {
                    attempted,
                    source: Box::new(err),
                });
            }
        }
    }

    let source = last_not_found
        .unwrap_or_else(|| ApiError::Unexpected("no candidate endpoints responded".to_string()));
    Err(ApiError::AllCandidatesExhausted {
        attempted,
        source: Box::new(source),
    })
}

/// [`resolve`] without the attempted-path record, for callers that only
/// want the response.
pub async fn request_with_fallback<T: DeserializeOwned>(
    client: &ApiClient,
    method: Method,
    candidates: &[String],
    body: Option<&Value>,
) -> ApiResult<T> {
    resolve(client, method, candidates, body)
        .await
        .map(|outcome| outcome.value)
}
