use axum::body::{Body, Bytes};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};

use objd_types::{ObjectKey, RecordCodec, MAX_PAYLOAD_SIZE};

use crate::error::{ServerError, ServerResult};
use crate::service::ObjectService;

/// Prefix of every object route; unmatched paths under it are bad ids.
pub const OBJECTS_PREFIX: &str = "/api/objects/";

fn json(body: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// `GET /api/objects/`
pub async fn list_objects(State(service): State<ObjectService>) -> ServerResult<Response> {
    let keys = service.list().await?;
    Ok(json(RecordCodec::encode_keys(&keys)?))
}

/// `GET /api/objects/{id}`
pub async fn get_object(
    State(service): State<ObjectService>,
    id: Result<Path<String>, PathRejection>,
) -> ServerResult<Response> {
    let key = object_key(id)?;
    let record = service.get(key).await?;
    Ok(json(RecordCodec::encode(&record)?))
}

/// `PUT /api/objects/{id}`
pub async fn put_object(
    State(service): State<ObjectService>,
    id: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Body,
) -> ServerResult<StatusCode> {
    let key = object_key(id)?;
    let content_type = ObjectService::check_put(
        declared_length(&headers),
        header_str(&headers, header::CONTENT_TYPE).as_deref(),
    )?;
    let body = read_body(body).await?;
    service.put(key, content_type, &body).await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /api/objects/{id}`
pub async fn delete_object(
    State(service): State<ObjectService>,
    id: Result<Path<String>, PathRejection>,
) -> ServerResult<StatusCode> {
    let key = object_key(id)?;
    service.delete(key).await?;
    Ok(StatusCode::OK)
}

/// Anything the router did not match.
pub async fn fallback(uri: Uri) -> ServerError {
    if uri.path().starts_with(OBJECTS_PREFIX) {
        ServerError::InvalidKeySyntax(uri.path()[OBJECTS_PREFIX.len()..].to_string())
    } else {
        ServerError::RouteNotFound
    }
}

/// A segment axum cannot decode (invalid UTF-8 after percent-decoding) is a
/// bad id like any other.
fn object_key(id: Result<Path<String>, PathRejection>) -> ServerResult<ObjectKey> {
    match id {
        Ok(Path(raw)) => Ok(ObjectKey::parse(&raw)?),
        Err(rejection) => Err(ServerError::InvalidKeySyntax(rejection.body_text())),
    }
}

/// Read the whole body, refusing to buffer more than the payload limit.
async fn read_body(body: Body) -> ServerResult<Bytes> {
    match Limited::new(body, MAX_PAYLOAD_SIZE).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            Err(ServerError::PayloadTooLarge { max: MAX_PAYLOAD_SIZE })
        }
        Err(e) => Err(ServerError::BodyRead(e.to_string())),
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}
