// albkit-api: async client for the load-balancer controller REST API
//
// Layers, leaves first: `Session` (authenticated HTTP, options, retries),
// `ResourceClient` (uniform CRUD over one object kind), `AviClient`
// (a session plus one accessor per registered kind).

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod options;
pub mod registry;
pub mod resource;
pub mod session;
pub mod transport;

pub use auth::{Credentials, TokenRefresh};
pub use client::AviClient;
pub use error::Error;
pub use options::{ApiOption, RequestOptions, ResultSink, ResultSlot};
pub use registry::{RESOURCE_KINDS, ResourceKind};
pub use resource::{DynamicObject, PatchOp, Payload, Resource, ResourceClient};
pub use session::{
    CollectionPage, DEFAULT_API_VERSION, DEFAULT_TENANT, RetryPolicy, Session, SessionConfig,
    StatusCheck,
};
pub use transport::{TlsMode, TransportConfig};
