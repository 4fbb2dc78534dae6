use async_trait::async_trait;

use crate::errors::{KennelError, KennelResult};

/// Standard service methods:
/// find, get, create, update, remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMethodKind {
    Find,
    Get,
    Create,
    Update,
    Remove,
}

impl ServiceMethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMethodKind::Find => "find",
            ServiceMethodKind::Get => "get",
            ServiceMethodKind::Create => "create",
            ServiceMethodKind::Update => "update",
            ServiceMethodKind::Remove => "remove",
        }
    }
}

/// Capabilities describe which methods a service exposes to the outside
/// world. Transports mount only the allowed routes.
#[derive(Debug, Clone)]
pub struct ServiceCapabilities {
    pub allowed_methods: Vec<ServiceMethodKind>,
}

impl ServiceCapabilities {
    /// Full CRUD: find, get, create, update, remove.
    pub fn standard_crud() -> Self {
        use ServiceMethodKind::*;
        Self {
            allowed_methods: vec![Find, Get, Create, Update, Remove],
        }
    }

    pub fn from_methods(methods: Vec<ServiceMethodKind>) -> Self {
        Self {
            allowed_methods: methods,
        }
    }

    pub fn allows(&self, method: ServiceMethodKind) -> bool {
        self.allowed_methods.contains(&method)
    }
}

fn not_allowed<T>(method: ServiceMethodKind) -> KennelResult<T> {
    Err(KennelError::method_not_allowed(format!("Method not implemented: {}", method.as_str())).into_anyhow())
}

/// Core service trait:
///
/// - `find`   → list many
/// - `get`    → fetch one by id
/// - `create` → create one
/// - `update` → merge the supplied fields into an existing record
/// - `remove` → delete one
///
/// Every method defaults to a `MethodNotAllowed` error so a service only
/// overrides what it supports.
#[async_trait]
pub trait KennelService<R, P = ()>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::standard_crud()
    }

    async fn find(&self, _params: P) -> KennelResult<Vec<R>> {
        not_allowed(ServiceMethodKind::Find)
    }

    async fn get(&self, _id: &str, _params: P) -> KennelResult<R> {
        not_allowed(ServiceMethodKind::Get)
    }

    async fn create(&self, _data: R, _params: P) -> KennelResult<R> {
        not_allowed(ServiceMethodKind::Create)
    }

    async fn update(&self, _id: &str, _data: R, _params: P) -> KennelResult<R> {
        not_allowed(ServiceMethodKind::Update)
    }

    async fn remove(&self, _id: &str, _params: P) -> KennelResult<R> {
        not_allowed(ServiceMethodKind::Remove)
    }
}
