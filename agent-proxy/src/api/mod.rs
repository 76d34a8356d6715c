use warp::{Filter, Rejection, Reply};
use serde_json::json;
use crate::AppState;

pub mod body;
mod proxy;
pub mod validate;

pub fn routes(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let root = warp::path::end();

    let preflight_route = root
        .and(warp::options())
        .and(with_state(state.clone()))
        .and_then(proxy::handle_preflight);

    let proxy_route = root
        .and(warp::post())
        // String never fails to parse, so a POST can't be rejected here.
        .and(warp::header::optional::<String>("content-length"))
        .and(warp::body::stream())
        .and(with_state(state.clone()))
        .and_then(proxy::handle_agent_proxy);

    let other_method_route = root
        .and(warp::method())
        .and(with_state(state.clone()))
        .and_then(proxy::handle_other_method);

    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&json!({"status": "healthy"})));

    let metrics_route = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state))
        .and_then(handle_metrics);

    preflight_route
        .or(proxy_route)
        .or(other_method_route)
        .or(health_route)
        .or(metrics_route)
}

async fn handle_metrics(state: AppState) -> Result<warp::reply::Response, Rejection> {
    match state.metrics.render() {
        Ok((buffer, content_type)) => {
            Ok(warp::reply::with_header(buffer, "Content-Type", content_type).into_response())
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            Ok(warp::reply::with_status(
                "metrics unavailable",
                warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response())
        }
    }
}

fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}
