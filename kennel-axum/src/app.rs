use std::sync::Arc;

use axum::handler::Handler;
use axum::http::{Method, Uri};
use axum::routing::get;
use axum::Router;
use kennel_core::errors::KennelError;
use kennel_core::{KennelApp, KennelService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::params::FromRestParams;
use crate::{rest, KennelAxumError};

/// A [`KennelApp`] plus the axum router its services are mounted on.
pub struct AxumApp<R, P = ()>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub app: Arc<KennelApp<R, P>>,
    router: Router<()>,
}

impl<R, P> Clone for AxumApp<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            router: self.router.clone(),
        }
    }
}

async fn not_found(method: Method, uri: Uri) -> KennelAxumError {
    KennelError::not_found(format!("No route for {method} {}", uri.path())).into()
}

impl<R, P> AxumApp<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub fn new(app: KennelApp<R, P>) -> Self {
        Self {
            app: Arc::new(app),
            router: Router::new(),
        }
    }

    /// Mount a plain GET handler at `path`.
    pub fn use_get<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    /// Register `service` under `path` (without the leading slash) and mount
    /// its REST routes.
    pub fn use_service(mut self, path: &str, service: Arc<dyn KennelService<R, P>>) -> Self
    where
        R: Serialize + DeserializeOwned,
        P: FromRestParams,
    {
        let name = path.trim_start_matches('/');
        let capabilities = service.capabilities();
        self.app.register_service(name, service);

        tracing::debug!(service = name, methods = ?capabilities.allowed_methods, "mounted service");

        let router = rest::service_router(Arc::from(name), Arc::clone(&self.app), &capabilities);
        self.router = self.router.nest(path, router);
        self
    }

    /// Final router: mounted routes, a JSON 404 fallback, request tracing
    /// and `x-request-id` assignment/propagation.
    pub fn into_router(self) -> Router<()> {
        self.router.fallback(not_found).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Serve until ctrl-c, then drain in-flight requests.
    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "application started");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("application teardown");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c, shutting down");
    }
}

pub fn axum<R, P>(app: KennelApp<R, P>) -> AxumApp<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    AxumApp::new(app)
}
