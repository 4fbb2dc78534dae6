//! Status routes: application info at `/` and a liveness check at `/health`.

use axum::http::{header, HeaderMap};
use axum::Json;
use kennel_core::KennelConfigSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub swagger_url: Option<String>,
    pub redoc_url: Option<String>,
    pub runtime_version: String,
}

pub fn runtime_version() -> String {
    format!(
        "{} {} ({} {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

impl AppInfo {
    /// Configured values verbatim; doc paths are joined onto `base_url`.
    pub fn from_config(config: &KennelConfigSnapshot, base_url: &str) -> Self {
        let doc_url = |key: &str| config.get(key).map(|path| format!("{base_url}{path}"));

        Self {
            name: config.get_string("api.name"),
            description: config.get_string("api.description"),
            version: config.get_string("api.version"),
            swagger_url: doc_url("docs.swagger_url"),
            redoc_url: doc_url("docs.redoc_url"),
            runtime_version: runtime_version(),
        }
    }
}

/// `scheme://host` of the current request, as far as the headers tell.
fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{scheme}://{host}")
}

pub async fn app_info(config: KennelConfigSnapshot, headers: HeaderMap) -> Json<AppInfo> {
    Json(AppInfo::from_config(&config, &base_url(&headers)))
}

pub async fn health() -> &'static str {
    "ok"
}
