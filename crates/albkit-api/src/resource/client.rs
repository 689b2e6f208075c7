use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;

use super::{Payload, PatchOp, Resource};
use crate::error::Error;
use crate::options::{RequestOptions, ResultSlot};
use crate::registry::ResourceKind;
use crate::session::Session;

/// CRUD over one object kind, at `api/<token>`.
///
/// Borrows the session and holds no per-call state, so it is `Copy` and
/// can be handed to as many tasks as needed. Every operation is a single
/// session call (delete-by-name: a lookup, then a delete) and errors come
/// back exactly as the session raised them.
pub struct ResourceClient<'s, T> {
    session: &'s Session,
    kind: ResourceKind,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceClient<'_, T> {}

impl<T> std::fmt::Debug for ResourceClient<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("kind", &self.kind.name())
            .finish_non_exhaustive()
    }
}

impl<'s, T: Resource> ResourceClient<'s, T> {
    pub fn new(session: &'s Session) -> Self {
        Self::with_kind(session, T::KIND)
    }
}

impl<'s, T: Payload> ResourceClient<'s, T> {
    /// Client for a kind chosen at runtime.
    pub fn with_kind(session: &'s Session, kind: ResourceKind) -> Self {
        Self {
            session,
            kind,
            _payload: PhantomData,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn session(&self) -> &'s Session {
        self.session
    }

    /// List every object of this kind (first page only).
    pub async fn get_all(&self, opts: &RequestOptions) -> Result<Vec<T>, Error> {
        self.session
            .get_collection(&self.kind.path(None), opts)
            .await
    }

    /// Path of a single object. An empty uuid is [`Error::MissingUuid`].
    fn object_path(&self, uuid: &str) -> Result<String, Error> {
        if uuid.is_empty() {
            return Err(Error::MissingUuid {
                kind: self.kind.name(),
            });
        }
        Ok(self.kind.path(Some(uuid)))
    }

    pub async fn get(&self, uuid: &str, opts: &RequestOptions) -> Result<T, Error> {
        self.session.get(&self.object_path(uuid)?, opts).await
    }

    /// Look up by name. Only the tenant of `opts` is honored.
    pub async fn get_by_name(&self, name: &str, opts: &RequestOptions) -> Result<T, Error> {
        self.session
            .get_object_by_name(self.kind, name, opts)
            .await
    }

    /// Filtered lookup driven entirely by `opts` (`Name`, `Cloud`,
    /// `CloudUuid`, `SkipDefault`, `IncludeName`, `Tenant`, `Param`).
    pub async fn get_object(&self, opts: &RequestOptions) -> Result<T, Error> {
        let slot = Arc::new(ResultSlot::<T>::new());
        self.session
            .get_object(self.kind, &opts.chained(slot.option()))
            .await?;
        slot.take()
            .ok_or(Error::InvalidOptions("object lookup produced no result"))
    }

    pub async fn create(&self, obj: &T, opts: &RequestOptions) -> Result<T, Error> {
        self.session.post(&self.kind.path(None), obj, opts).await
    }

    /// Replace the object addressed by `obj.uuid()`.
    ///
    /// Fails with [`Error::MissingUuid`] before any request when the uuid
    /// is unset.
    pub async fn update(&self, obj: &T, opts: &RequestOptions) -> Result<T, Error> {
        let uuid = obj
            .uuid()
            .filter(|uuid| !uuid.is_empty())
            .ok_or(Error::MissingUuid {
                kind: self.kind.name(),
            })?;
        self.session
            .put(&self.kind.path(Some(uuid)), obj, opts)
            .await
    }

    pub async fn patch<P>(
        &self,
        uuid: &str,
        patch: &P,
        op: PatchOp,
        opts: &RequestOptions,
    ) -> Result<T, Error>
    where
        P: Serialize + ?Sized,
    {
        self.session
            .patch(&self.object_path(uuid)?, patch, op, opts)
            .await
    }

    /// Delete by uuid. Options, when given, go through the option-aware
    /// delete (tenant, params, body).
    pub async fn delete(&self, uuid: &str, opts: &RequestOptions) -> Result<(), Error> {
        let path = self.object_path(uuid)?;
        if opts.is_empty() {
            self.session.delete(&path).await
        } else {
            self.session.delete_object(&path, opts).await
        }
    }

    /// Resolve `name` to a uuid, then delete that uuid.
    ///
    /// Not atomic: the object can change between the two requests.
    pub async fn delete_by_name(&self, name: &str, opts: &RequestOptions) -> Result<(), Error> {
        let obj = self.get_by_name(name, opts).await?;
        let uuid = obj
            .uuid()
            .filter(|uuid| !uuid.is_empty())
            .ok_or(Error::MissingUuid {
                kind: self.kind.name(),
            })?;
        self.delete(uuid, opts).await
    }
}
