use kennel_core::{ServiceCapabilities, ServiceMethodKind};

/// Dogs are replaced field-by-field through `update`; there is no separate
/// `patch` route.
pub fn crud_capabilities() -> ServiceCapabilities {
    ServiceCapabilities::from_methods(vec![
        ServiceMethodKind::Create,
        ServiceMethodKind::Find,
        ServiceMethodKind::Get,
        ServiceMethodKind::Update,
        ServiceMethodKind::Remove,
    ])
}
