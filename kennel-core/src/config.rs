//! # Configuration
//!
//! A plain string key/value store, set and read through the app container:
//!
//! ```rust
//! use kennel_core::KennelApp;
//! let app = KennelApp::<(), ()>::new();
//!
//! app.set("http.port", "8000");
//!
//! assert_eq!(app.get("http.port"), Some("8000".to_string()));
//! ```
//!
//! Where the values come from (environment, `.env`, defaults) is up to the
//! application; the core only stores them.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct KennelConfig {
    values: HashMap<String, String>,
}

impl KennelConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn snapshot(&self) -> KennelConfigSnapshot {
        KennelConfigSnapshot::new(self.values.clone())
    }
}

/// Immutable copy of the config, cheap to hand to request handlers.
#[derive(Debug, Clone, Default)]
pub struct KennelConfigSnapshot {
    map: HashMap<String, String>,
}

impl KennelConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.parse::<u16>().ok())
    }
}
