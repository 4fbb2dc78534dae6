use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, Method, Uri},
    routing::MethodRouter,
    Json, Router,
};
use kennel_core::errors::KennelError;
use kennel_core::{KennelApp, KennelService, ServiceCapabilities, ServiceMethodKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::{
    params::{FromRestParams, RestParams},
    KennelAxumError, KennelAxumState,
};

type Svc<R, P> = Arc<dyn KennelService<R, P>>;

fn map_json_rejection(rejection: JsonRejection) -> KennelAxumError {
    KennelError::bad_request("Failed to parse the request body as JSON")
        .with_errors(json!({"_schema": [rejection.body_text()]}))
        .into()
}

/// Resolve the service and build its params for one request.
fn dispatch<R, P>(
    state: &KennelAxumState<R, P>,
    method: ServiceMethodKind,
    http_method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<(Svc<R, P>, P), KennelAxumError>
where
    R: Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    tracing::debug!(service = %state.service_name, method = method.as_str(), "dispatching service call");
    let svc = state.app.service(&state.service_name)?;
    let params = RestParams::from_parts(http_method, uri, headers);
    Ok((svc, P::from_rest_params(params)))
}

async fn find<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    http_method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Json<Vec<R>>, KennelAxumError>
where
    R: Serialize + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let (svc, params) = dispatch(&state, ServiceMethodKind::Find, &http_method, &uri, &headers)?;
    Ok(Json(svc.find(params).await?))
}

async fn create<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    http_method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    data: Result<Json<R>, JsonRejection>,
) -> Result<Json<R>, KennelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let Json(data) = data.map_err(map_json_rejection)?;
    let (svc, params) = dispatch(&state, ServiceMethodKind::Create, &http_method, &uri, &headers)?;
    Ok(Json(svc.create(data, params).await?))
}

async fn get<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    http_method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<R>, KennelAxumError>
where
    R: Serialize + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let (svc, params) = dispatch(&state, ServiceMethodKind::Get, &http_method, &uri, &headers)?;
    Ok(Json(svc.get(&id, params).await?))
}

async fn update<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    http_method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Path(id): Path<String>,
    data: Result<Json<R>, JsonRejection>,
) -> Result<Json<R>, KennelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let Json(data) = data.map_err(map_json_rejection)?;
    let (svc, params) = dispatch(&state, ServiceMethodKind::Update, &http_method, &uri, &headers)?;
    Ok(Json(svc.update(&id, data, params).await?))
}

async fn remove<R, P>(
    State(state): State<KennelAxumState<R, P>>,
    http_method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<R>, KennelAxumError>
where
    R: Serialize + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let (svc, params) = dispatch(&state, ServiceMethodKind::Remove, &http_method, &uri, &headers)?;
    Ok(Json(svc.remove(&id, params).await?))
}

async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> KennelAxumError {
    KennelError::method_not_allowed(format!("Method {method} is not allowed on {}", uri.path())).into()
}

/// Mount a service as a REST resource:
///
/// | route | method | service call |
/// |---|---|---|
/// | `/` | GET | `find` |
/// | `/` | POST | `create` |
/// | `/{id}` | GET | `get` |
/// | `/{id}` | PUT | `update` |
/// | `/{id}` | DELETE | `remove` |
///
/// Only methods listed in `capabilities` are mounted; the rest answer 405.
pub fn service_router<R, P>(
    service_name: Arc<str>,
    app: Arc<KennelApp<R, P>>,
    capabilities: &ServiceCapabilities,
) -> Router<()>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let state = KennelAxumState::new(app, service_name);

    let mut collection = MethodRouter::new();
    if capabilities.allows(ServiceMethodKind::Find) {
        collection = collection.get(find::<R, P>);
    }
    if capabilities.allows(ServiceMethodKind::Create) {
        collection = collection.post(create::<R, P>);
    }

    let mut item = MethodRouter::new();
    if capabilities.allows(ServiceMethodKind::Get) {
        item = item.get(get::<R, P>);
    }
    if capabilities.allows(ServiceMethodKind::Update) {
        item = item.put(update::<R, P>);
    }
    if capabilities.allows(ServiceMethodKind::Remove) {
        item = item.delete(remove::<R, P>);
    }

    Router::new()
        .route("/", collection.fallback(method_not_allowed))
        .route("/{id}", item.fallback(method_not_allowed))
        .with_state(state)
}
