use std::sync::Arc;

use kennel_core::KennelService;
use serde_json::Value;

pub mod dogs;
pub mod types;

pub use types::KennelParams;

pub struct KennelServices {
    pub dogs: Arc<dyn KennelService<Value, KennelParams>>,
}

/// Build every service over the shared store. Registration happens when the
/// services are mounted on the router.
pub fn configure(store: Arc<dogs::DogStore>) -> KennelServices {
    KennelServices {
        dogs: Arc::new(dogs::DogsService::new(store)),
    }
}
