//! kennel-core: transport-agnostic core for the Kennel API.
//!
//! Services implement [`KennelService`] and are registered on a [`KennelApp`],
//! which also carries the string key/value configuration. Transports (see
//! `kennel-axum`) look services up by name and translate [`KennelError`]s
//! into their own wire format.

pub mod app;
pub mod config;
pub mod errors;
pub mod registry;
pub mod service;

pub use app::KennelApp;
pub use config::{KennelConfig, KennelConfigSnapshot};
pub use errors::{ErrorKind, KennelError, KennelResult};
pub use registry::KennelServiceRegistry;
pub use service::{KennelService, ServiceCapabilities, ServiceMethodKind};
