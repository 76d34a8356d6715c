// Inbound body collection. Works the same with or without Content-Length
// (chunked HTTP/1.1, HTTP/2); the size limit is enforced while reading.

use bytes::{Buf, BufMut};
use futures::{Stream, TryStreamExt};
use tracing::warn;

use crate::error::ApiError;

pub async fn read_limited<S, B>(
    body: S,
    content_length: Option<u64>,
    limit: u64,
) -> Result<Vec<u8>, ApiError>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    if content_length.map_or(false, |len| len > limit) {
        return Err(ApiError::PayloadTooLarge);
    }

    futures::pin_mut!(body);
    let mut buf = Vec::with_capacity(content_length.unwrap_or(0) as usize);

    while let Some(chunk) = body.try_next().await.map_err(|e| {
        warn!("Failed to read request body: {}", e);
        ApiError::missing_fields()
    })? {
        if (buf.len() + chunk.remaining()) as u64 > limit {
            return Err(ApiError::PayloadTooLarge);
        }
        buf.put(chunk);
    }

    Ok(buf)
}
