mod app;
pub mod config;
pub mod docs;
pub mod services;
pub mod status;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::http::HeaderMap;
use kennel_axum::AxumApp;
use serde_json::Value;

use crate::services::dogs::DogStore;
use crate::services::KennelParams;

/// Assemble the application: settings, the seeded kennel, the dogs
/// resource, the status routes and the API docs.
pub fn build() -> Result<AxumApp<Value, KennelParams>> {
    let ax = app::kennel_app()?;
    let store = Arc::new(DogStore::seeded());
    let svcs = services::configure(store);

    let config = ax.app.config_snapshot();
    let doc_path = |key: &str| config.get_string(key).ok_or_else(|| anyhow!("Missing config: {key}"));
    let swagger_url = doc_path("docs.swagger_url")?;
    let redoc_url = doc_path("docs.redoc_url")?;

    let info_config = config.clone();
    let openapi_config = config.clone();
    let swagger_config = config.clone();
    let redoc_config = config;

    let ax = ax
        .use_service("/dogs", svcs.dogs)
        .use_get("/", move |headers: HeaderMap| status::app_info(info_config.clone(), headers))
        .use_get("/health", status::health)
        .use_get(docs::OPENAPI_URL, move || docs::openapi_json(openapi_config.clone()))
        .use_get(&swagger_url, move || docs::swagger_ui(swagger_config.clone()))
        .use_get(&redoc_url, move || docs::redoc(redoc_config.clone()));

    Ok(ax)
}
