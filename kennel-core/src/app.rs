use std::sync::{Arc, PoisonError, RwLock};

use crate::errors::{KennelError, KennelResult};
use crate::{KennelConfig, KennelConfigSnapshot, KennelService, KennelServiceRegistry};

struct KennelAppInner<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    registry: RwLock<KennelServiceRegistry<R, P>>,
    config: RwLock<KennelConfig>,
}

/// Central application container.
///
/// Framework-agnostic. Holds the service registry and the config.
/// Clones share the same state.
pub struct KennelApp<R, P = ()>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    inner: Arc<KennelAppInner<R, P>>,
}

impl<R, P> Default for KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> Clone for KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, P> KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(KennelAppInner {
                registry: RwLock::new(KennelServiceRegistry::new()),
                config: RwLock::new(KennelConfig::new()),
            }),
        }
    }

    pub fn register_service<S>(&self, name: S, service: Arc<dyn KennelService<R, P>>)
    where
        S: Into<String>,
    {
        self.inner
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(name, service);
    }

    /// Look up a registered service by name.
    pub fn service(&self, name: &str) -> KennelResult<Arc<dyn KennelService<R, P>>> {
        self.inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| KennelError::general_error(format!("Service not found: {name}")).into_anyhow())
    }

    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let cfg = self.inner.config.read().unwrap_or_else(PoisonError::into_inner);
        cfg.get(key).map(|v| v.to_string())
    }

    pub fn config_snapshot(&self) -> KennelConfigSnapshot {
        let cfg = self.inner.config.read().unwrap_or_else(PoisonError::into_inner);
        cfg.snapshot()
    }
}
