use bytes::Bytes;
use http::HeaderMap;

/// A raw webhook delivery, decoupled from the HTTP server so adaptors can
/// be driven from any transport (or directly from tests).
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl InboundRequest {
    pub fn new(headers: HeaderMap, body: Bytes) -> Self {
        Self { headers, body }
    }

    /// A body-only request — the common case in tests.
    pub fn from_body(body: impl Into<Bytes>) -> Self {
        Self {
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}
