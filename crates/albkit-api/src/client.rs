// Controller facade
//
// `AviClient` owns one session and hands out borrowed resource clients.
// The per-kind accessors (`pool()`, `virtual_service()`, ...) are generated
// alongside the kind registry.

use crate::error::Error;
use crate::registry::ResourceKind;
use crate::resource::{DynamicObject, Resource, ResourceClient};
use crate::session::{Session, SessionConfig};

/// Entry point: one authenticated session plus a client per object kind.
#[derive(Debug)]
pub struct AviClient {
    session: Session,
}

impl AviClient {
    /// Open a session (logging in unless lazy auth is set).
    pub async fn connect(config: SessionConfig) -> Result<Self, Error> {
        Ok(Self {
            session: Session::connect(config).await?,
        })
    }

    pub fn from_session(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Client for a typed kind.
    pub fn resource<T: Resource>(&self) -> ResourceClient<'_, T> {
        ResourceClient::new(&self.session)
    }

    /// Untyped client for a kind picked at runtime.
    pub fn dynamic(&self, kind: ResourceKind) -> ResourceClient<'_, DynamicObject> {
        ResourceClient::with_kind(&self.session, kind)
    }
}
