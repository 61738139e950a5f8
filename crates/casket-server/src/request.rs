//! Mapping from HTTP requests to [`ObjectRequest`]s.
//!
//! Object paths have the shape `/data/{repository}/{oid}`. Anything that does
//! not start with `/data/` parses to an empty repository name and empty oid,
//! which can never name a stored object.

use axum::http::Method;
use bytes::Bytes;
use casket_store::ObjectRequest;
use casket_types::ObjectId;

use crate::error::{ServerError, ServerResult};

pub const DATA_PREFIX: &str = "/data/";

/// Split an object path into `(repository, oid)`. Missing parts are empty.
pub fn parse_path(path: &str) -> (&str, &str) {
    let Some(rest) = path.strip_prefix(DATA_PREFIX) else {
        return ("", "");
    };
    let mut segments = rest.split('/');
    let repository = segments.next().unwrap_or_default();
    let oid = segments.next().unwrap_or_default();
    (repository, oid)
}

/// Turn a method and path into exactly one [`ObjectRequest`].
///
/// `body` is only consulted for `PUT`. Unsupported methods are rejected
/// before the path is looked at.
pub fn object_request(
    method: &Method,
    path: &str,
    body: impl FnOnce() -> ServerResult<Bytes>,
) -> ServerResult<ObjectRequest> {
    let (repository, oid) = parse_path(path);
    match *method {
        Method::PUT => {
            if repository.is_empty() {
                return Err(ServerError::NotFound(format!("no repository in {path}")));
            }
            Ok(ObjectRequest::Write {
                repository: repository.to_string(),
                data: body()?,
            })
        }
        Method::GET => Ok(ObjectRequest::Read {
            repository: repository.to_string(),
            oid: parse_oid(oid)?,
        }),
        Method::DELETE => Ok(ObjectRequest::Delete {
            repository: repository.to_string(),
            oid: parse_oid(oid)?,
        }),
        _ => Err(ServerError::MethodNotAllowed(method.clone())),
    }
}

// An oid that does not parse cannot have been produced by a write.
fn parse_oid(oid: &str) -> ServerResult<ObjectId> {
    oid.parse()
        .map_err(|_| ServerError::NotFound(format!("no object {oid:?}")))
}
