use warp::http::StatusCode;
use warp::Reply;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

// warp::cors() rejects preflights that don't match its allow-lists; this
// endpoint answers every OPTIONS with 200, so the headers are set by hand.
pub fn with_cors<R: Reply>(reply: R) -> impl Reply {
    warp::reply::with_header(reply, "Access-Control-Allow-Origin", ALLOW_ORIGIN)
}

/// Empty 200 answer to a CORS preflight.
pub fn preflight() -> warp::reply::Response {
    let reply = warp::reply::with_status("", StatusCode::OK);
    let reply = warp::reply::with_header(reply, "Access-Control-Allow-Methods", ALLOW_METHODS);
    let reply = warp::reply::with_header(reply, "Access-Control-Allow-Headers", ALLOW_HEADERS);
    with_cors(reply).into_response()
}
