use axum::http::{HeaderMap, Method, Uri};

/// Request metadata handed to services alongside the payload, for logging.
#[derive(Debug, Clone, Default)]
pub struct RestParams {
    pub method: String,
    pub path: String,
    /// `x-request-id`, set by the router's request-id layer.
    pub request_id: Option<String>,
}

impl RestParams {
    pub fn from_parts(method: &Method, uri: &Uri, headers: &HeaderMap) -> Self {
        Self {
            method: method.to_string(),
            path: uri.path().to_string(),
            request_id: headers
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }
}

/// Services pick their own params type; the REST layer builds it from
/// [`RestParams`].
pub trait FromRestParams: Sized {
    fn from_rest_params(params: RestParams) -> Self;
}

impl FromRestParams for RestParams {
    fn from_rest_params(params: RestParams) -> Self {
        params
    }
}

impl FromRestParams for () {
    fn from_rest_params(_params: RestParams) -> Self {}
}
