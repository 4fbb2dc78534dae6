//! kennel-axum: Axum adapter for Kennel services.
//!
//! [`AxumApp`] wraps a [`kennel_core::KennelApp`], mounts each registered
//! service as a REST resource and turns service errors into JSON responses.

pub mod app;
pub mod params;
pub mod rest;
pub mod state;
mod error;

pub use error::KennelAxumError;
pub use state::KennelAxumState;

pub use app::{axum, AxumApp};
