use std::sync::Arc;

use kennel_core::KennelApp;

/// Router state for one mounted service: the app plus the name the
/// service is registered under.
pub struct KennelAxumState<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub app: Arc<KennelApp<R, P>>,
    pub service_name: Arc<str>,
}

impl<R, P> Clone for KennelAxumState<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            service_name: Arc::clone(&self.service_name),
        }
    }
}

impl<R, P> KennelAxumState<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub fn new(app: Arc<KennelApp<R, P>>, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            app,
            service_name: service_name.into(),
        }
    }
}
