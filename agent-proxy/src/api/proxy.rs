use std::time::Instant;

use bytes::Buf;
use futures::Stream;
use tracing::{info, warn};
use uuid::Uuid;
use warp::http::{Method, StatusCode};
use warp::{Rejection, Reply};

use crate::error::ApiError;
use crate::metrics::Outcome;
use crate::middleware;
use crate::models::ExtractedResult;
use crate::prompt::format_agent_message;
use crate::AppState;

use super::body::read_limited;
use super::validate::validate;

pub async fn handle_agent_proxy<S, B>(
    content_length: Option<String>,
    body: S,
    state: AppState,
) -> Result<warp::reply::Response, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    let content_length = content_length.and_then(|len| len.trim().parse::<u64>().ok());
    let outcome = match read_limited(body, content_length, state.config.max_body_bytes).await {
        Ok(bytes) => proxy_request(&bytes, &state).await,
        Err(err) => Err(err),
    };

    let response = match outcome {
        Ok(result) => {
            state.metrics.record(if result.is_fallback() {
                Outcome::Fallback
            } else {
                Outcome::Ok
            });
            let json = warp::reply::json(&result);
            middleware::with_cors(warp::reply::with_status(json, StatusCode::OK)).into_response()
        }
        Err(err) => {
            state.metrics.record(outcome_for(&err));
            err.to_response()
        }
    };

    Ok(response)
}

async fn proxy_request(body: &[u8], state: &AppState) -> Result<ExtractedResult, ApiError> {
    let request = validate(body)?;

    let api_url = state.config.agent_url().ok_or_else(|| {
        warn!("VERTEX_AGENT_ID is not set; refusing to call the agent");
        ApiError::missing_agent_id()
    })?;

    let session_id = Uuid::new_v4().to_string();
    let query = request.query_text();
    info!("Processing agent query [{}]: {}", session_id, query);

    let message = format_agent_message(&query, &request.constraint_text(), &session_id);

    let started = Instant::now();
    let result = state.agent.query(&api_url, &message, &session_id).await;
    state
        .metrics
        .observe_upstream(result.is_ok(), started.elapsed().as_secs_f64());

    result
}

pub async fn handle_preflight(state: AppState) -> Result<warp::reply::Response, Rejection> {
    state.metrics.record(Outcome::Preflight);
    Ok(middleware::preflight())
}

/// Anything that isn't POST or OPTIONS on the proxy path. Those two routes
/// never reject once the method matches, so they can't land here.
pub async fn handle_other_method(
    method: Method,
    state: AppState,
) -> Result<warp::reply::Response, Rejection> {
    warn!("Rejecting {} on the proxy endpoint", method);
    state.metrics.record(Outcome::MethodNotAllowed);
    Ok(ApiError::MethodNotAllowed.to_response())
}

fn outcome_for(err: &ApiError) -> Outcome {
    match err {
        ApiError::Validation(_) => Outcome::ValidationError,
        ApiError::PayloadTooLarge => Outcome::PayloadTooLarge,
        ApiError::Configuration(_) => Outcome::ConfigurationError,
        ApiError::Upstream { .. } => Outcome::UpstreamError,
        ApiError::MethodNotAllowed => Outcome::MethodNotAllowed,
    }
}
