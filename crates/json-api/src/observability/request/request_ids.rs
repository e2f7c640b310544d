//! `x-request-id` handling.
//!
//! Callers may supply their own id so a checkout can be followed from the
//! storefront through to the order insert. Ids that would be awkward in a
//! header or a log line are replaced with a fresh UUIDv7.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_LEN: usize = 128;

fn is_acceptable(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_LEN && id.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn resolve_request_id(incoming: Option<String>) -> String {
    match incoming {
        Some(id) if is_acceptable(&id) => id,
        _ => Uuid::now_v7().to_string(),
    }
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}
