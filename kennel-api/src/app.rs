use anyhow::Result;
use kennel_axum::{axum, AxumApp};
use kennel_core::KennelApp;
use serde_json::Value;

use crate::services::KennelParams;

pub fn kennel_app() -> Result<AxumApp<Value, KennelParams>> {
    let kennel_app: KennelApp<Value, KennelParams> = KennelApp::new();
    crate::config::config(&kennel_app)?;
    Ok(axum(kennel_app))
}
