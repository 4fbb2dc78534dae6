use std::collections::HashMap;
use std::sync::Arc;

use crate::KennelService;

/// Maps service names to service instances, so any transport can reach
/// a service by the name it was registered under.
pub struct KennelServiceRegistry<R, P = ()> {
    services: HashMap<String, Arc<dyn KennelService<R, P>>>,
}

impl<R, P> KennelServiceRegistry<R, P> {
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    pub fn register<S>(&mut self, name: S, service: Arc<dyn KennelService<R, P>>)
    where
        S: Into<String>,
    {
        self.services.insert(name.into(), service);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn KennelService<R, P>>> {
        self.services.get(name)
    }
}

impl<R, P> Default for KennelServiceRegistry<R, P> {
    fn default() -> Self {
        Self::new()
    }
}
