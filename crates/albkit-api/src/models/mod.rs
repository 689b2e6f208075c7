// Controller object models
//
// A few heavily used kinds get typed models with their common fields.
// Every other kind uses a generic payload carrying the shared identity
// fields. All models keep unknown fields in `extra`, so a fetch-modify-update
// cycle sends back everything the controller returned.

mod generic;
mod health_monitor;
mod pool;
mod tenant;
mod virtual_service;

pub use generic::*;
pub use health_monitor::HealthMonitor;
pub use pool::{IpAddr, IpAddrType, Pool, PoolGroup, PoolGroupMember, Server};
pub use tenant::Tenant;
pub use virtual_service::{Service, Vip, VirtualService, VsVip};

/// Implements `Payload` for a model with an `Option<String>` uuid field.
macro_rules! impl_payload {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::resource::Payload for $ty {
                fn uuid(&self) -> Option<&str> {
                    self.uuid.as_deref()
                }
            }
        )*
    };
}

pub(crate) use impl_payload;
