//! # Response Shaping
//!
//! Streamed JSON arrays for collection reads and bodiless `201 Created`
//! responses for inserts.

use axum::body::{Body, Bytes};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::stream::{self, Stream, StreamExt};
use serde::Serialize;

use crate::store::{StoreError, StoreResult};

use super::errors::{ApiError, ApiResult};

/// Stream `items` as a JSON array body.
///
/// Elements are encoded one at a time as the stream yields them. A store
/// error after the first chunk has gone out aborts the body.
pub fn json_array<T, S>(items: S) -> Response
where
    T: Serialize + Send + 'static,
    S: Stream<Item = StoreResult<T>> + Send + 'static,
{
    let open = stream::once(async { Ok::<_, StoreError>(Bytes::from_static(b"[")) });
    let close = stream::once(async { Ok::<_, StoreError>(Bytes::from_static(b"]")) });

    let elements = items.enumerate().map(|(index, item)| -> StoreResult<Bytes> {
        let item = item.map_err(|err| {
            tracing::error!(error = %err, index, "collection stream failed");
            err
        })?;

        let mut chunk = Vec::with_capacity(256);
        if index > 0 {
            chunk.push(b',');
        }
        serde_json::to_writer(&mut chunk, &item)?;
        Ok(Bytes::from(chunk))
    });

    let body = Body::from_stream(open.chain(elements).chain(close));
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// `201 Created` with a `Location` of `<collection_path>/<id>`
pub fn created(collection_path: &str, id: Option<&str>) -> ApiResult<Response> {
    let id =
        id.ok_or_else(|| ApiError::Internal("store returned a record without a key".into()))?;
    let location = format!("{}/{}", collection_path, id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}
