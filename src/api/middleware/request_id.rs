//! Request correlation IDs.
//!
//! Every request carries an `x-request-id` header: the client's own if it
//! sent one, otherwise a fresh UUID v4. The same value is echoed on the
//! response and recorded on the request span by [`super::tracing`].

use axum::http::HeaderName;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Assigns a request ID when the client did not send one.
///
/// Must wrap the tracing layer so the span can see the header.
pub fn set_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid)
}

/// Copies the request ID onto the response.
pub fn propagate_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(REQUEST_ID_HEADER)
}
