// Resource layer
//
// One generic client serves every controller object kind. A kind is bound
// to its payload type at compile time through `Resource::KIND`; the dynamic
// path (`DynamicObject` + a runtime `ResourceKind`) covers tooling that only
// learns the kind at runtime.

mod client;
mod dynamic;
mod patch;

pub use client::ResourceClient;
pub use dynamic::DynamicObject;
pub use patch::{PatchOp, patch_body};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::registry::ResourceKind;

/// A JSON object the controller stores and addresses by uuid.
pub trait Payload: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Server-assigned identifier, `None` until the object is created.
    fn uuid(&self) -> Option<&str>;
}

/// A payload type statically bound to one resource kind.
pub trait Resource: Payload {
    const KIND: ResourceKind;
}
