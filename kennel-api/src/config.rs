use std::env;

use anyhow::{anyhow, bail, Result};
use kennel_core::KennelApp;
use serde_json::Value;

use crate::docs::OPENAPI_URL;
use crate::services::KennelParams;

pub const DEFAULT_API_NAME: &str = "Kennel API";
pub const DEFAULT_API_DESCRIPTION: &str = "Example dog kennel API";

/// Load every setting from the process environment (after `.env`, if the
/// binary loaded one).
pub fn config(app: &KennelApp<Value, KennelParams>) -> Result<()> {
    config_from(app, |key| env::var(key).ok())
}

/// Load settings through `lookup`. Values are trimmed; empty values fall
/// back to the default.
pub fn config_from<F>(app: &KennelApp<Value, KennelParams>, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str, default: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    // API information shown on the status route
    app.set("api.name", var("API_NAME", DEFAULT_API_NAME));
    app.set("api.version", var("API_VERSION", env!("CARGO_PKG_VERSION")));
    app.set("api.description", var("API_DESCRIPTION", DEFAULT_API_DESCRIPTION));

    configure_http(app, var("APP_HOST", "0.0.0.0"), var("APP_PORT", "8000"))?;

    app.set("log.level", var("LOG_LEVEL", "info"));

    configure_docs(app, var("SWAGGER_URL", "/docs"), var("REDOC_URL", "/redoc"))?;

    Ok(())
}

/// Doc pages get their own routes, so their paths must be absolute and
/// must not shadow another route.
fn configure_docs(app: &KennelApp<Value, KennelParams>, swagger: String, redoc: String) -> Result<()> {
    let absolute = |p: String| if p.starts_with('/') { p } else { format!("/{p}") };
    let (swagger, redoc) = (absolute(swagger), absolute(redoc));

    for (key, path) in [("SWAGGER_URL", &swagger), ("REDOC_URL", &redoc)] {
        let taken = ["/", "/health", OPENAPI_URL].contains(&path.as_str())
            || path == "/dogs"
            || path.starts_with("/dogs/")
            || path.contains(['{', '}', '*']);
        if taken {
            bail!("Invalid {key}: {path} is not available for docs");
        }
    }
    if swagger == redoc {
        bail!("SWAGGER_URL and REDOC_URL must differ: {swagger}");
    }

    app.set("docs.swagger_url", swagger);
    app.set("docs.redoc_url", redoc);
    Ok(())
}

fn configure_http(app: &KennelApp<Value, KennelParams>, host: String, port: String) -> Result<()> {
    let port: u16 = port
        .parse()
        .map_err(|_| anyhow!("Invalid APP_PORT: {port}"))?;

    app.set("http.host", host);
    app.set("http.port", port.to_string());
    Ok(())
}
