// Endpoint helpers
//
// The verb-level API every resource client is built on. Paths are relative
// to the controller root (`api/pool`, `api/pool/<uuid>`); options shape the
// tenant header, query string and, for deletes, the request body.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::Session;
use super::request::decode;
use crate::error::Error;
use crate::options::{ApiOption, RequestOptions, ResolvedOptions, ResultSlot};
use crate::registry::ResourceKind;
use crate::resource::{PatchOp, patch_body};

/// One page of a collection listing.
///
/// The controller wraps lists as `{"count", "results", "next"}`; a bare
/// array is accepted as well.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPage<T = Value> {
    pub count: u64,
    pub results: Vec<T>,
    /// URL of the following page, if the listing was truncated.
    pub next: Option<String>,
}

impl CollectionPage<Value> {
    fn from_body(body: &str) -> Result<Self, Error> {
        match decode::<Value>(body)? {
            Value::Array(results) => Ok(Self {
                count: len_u64(results.len()),
                results,
                next: None,
            }),
            Value::Null => Ok(Self {
                count: 0,
                results: Vec::new(),
                next: None,
            }),
            Value::Object(mut envelope) => {
                let results = match envelope.remove("results") {
                    Some(Value::Array(items)) => items,
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => vec![other],
                };
                let count = envelope
                    .get("count")
                    .and_then(Value::as_u64)
                    .unwrap_or(len_u64(results.len()));
                let next = envelope
                    .get("next")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                Ok(Self {
                    count,
                    results,
                    next,
                })
            }
            other => Err(Error::Deserialization {
                message: "expected a collection object or array".into(),
                body: other.to_string(),
            }),
        }
    }

    /// Decode every result into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<CollectionPage<T>, Error> {
        let results = self
            .results
            .into_iter()
            .map(|item| {
                serde_json::from_value(item.clone()).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: item.to_string(),
                })
            })
            .collect::<Result<Vec<T>, _>>()?;
        Ok(CollectionPage {
            count: self.count,
            results,
            next: self.next,
        })
    }
}

impl Session {
    // ── Typed verbs ──────────────────────────────────────────────────

    /// `GET <path>` and decode the body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<T, Error> {
        let text = self.get_raw(path, opts).await?;
        decode(&text)
    }

    /// `POST <path>` with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B, opts: &RequestOptions) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.post_raw(path, body, opts).await?;
        decode(&text)
    }

    /// `PUT <path>` with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B, opts: &RequestOptions) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.put_raw(path, body, opts).await?;
        decode(&text)
    }

    /// `PATCH <path>` with `{"<op>": body}`.
    pub async fn patch<T, B>(
        &self,
        path: &str,
        body: &B,
        op: PatchOp,
        opts: &RequestOptions,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = patch_body(body, op)?;
        debug!(%op, "PATCH {path}");
        let resolved = opts.resolve();
        let text = self
            .send_resolved(Method::PATCH, path, Some(&body), &resolved)
            .await?;
        decode(&text)
    }

    /// `DELETE <path>` with the session tenant and no body.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send_resolved(Method::DELETE, path, None, &ResolvedOptions::default())
            .await?;
        Ok(())
    }

    /// `DELETE <path>` shaped by options: tenant, query params, a `Payload`
    /// body, and a `Result` destination for the response.
    ///
    /// An empty response body leaves the `Result` destination untouched.
    pub async fn delete_object(&self, path: &str, opts: &RequestOptions) -> Result<(), Error> {
        let resolved = opts.resolve();
        let text = self
            .send_resolved(Method::DELETE, path, resolved.payload.as_ref(), &resolved)
            .await?;
        match resolved.result {
            Some(ref sink) if !text.trim().is_empty() => sink.accept(decode(&text)?)?,
            _ => {}
        }
        Ok(())
    }

    // ── Raw verbs ────────────────────────────────────────────────────

    /// `GET <path>`, returning the body undecoded.
    pub async fn get_raw(&self, path: &str, opts: &RequestOptions) -> Result<String, Error> {
        let resolved = opts.resolve();
        self.send_resolved(Method::GET, path, None, &resolved).await
    }

    /// `POST <path>`, returning the body undecoded.
    pub async fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<String, Error> {
        let body = serde_json::to_value(body)?;
        let resolved = opts.resolve();
        self.send_resolved(Method::POST, path, Some(&body), &resolved)
            .await
    }

    /// `PUT <path>`, returning the body undecoded.
    pub async fn put_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<String, Error> {
        let body = serde_json::to_value(body)?;
        let resolved = opts.resolve();
        self.send_resolved(Method::PUT, path, Some(&body), &resolved)
            .await
    }

    // ── Collections ──────────────────────────────────────────────────

    /// One collection page with results left as JSON.
    pub async fn get_collection_raw(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<CollectionPage, Error> {
        let text = self.get_raw(path, opts).await?;
        CollectionPage::from_body(&text)
    }

    /// The `results` of one collection page, decoded. `next` is not followed.
    pub async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<Vec<T>, Error> {
        let page = self.get_collection_raw(path, opts).await?;
        Ok(page.decode()?.results)
    }

    // ── Name lookups ─────────────────────────────────────────────────

    /// Find the single object of `kind` matching the `Name` option (plus
    /// optional cloud filters) and write it to the `Result` option.
    pub async fn get_object(&self, kind: ResourceKind, opts: &RequestOptions) -> Result<(), Error> {
        let resolved = opts.resolve();
        let sink = resolved
            .result
            .clone()
            .ok_or(Error::InvalidOptions("object lookup needs a result destination"))?;
        let name = resolved
            .name
            .clone()
            .ok_or(Error::InvalidOptions("object lookup needs a name"))?;

        let mut params = resolved.object_filters();
        params.extend(resolved.query_params().cloned());
        let url = self.request_url(&kind.path(None), &params)?;
        let text = self.execute(Method::GET, &url, None, &resolved).await?;
        let page = CollectionPage::from_body(&text)?;

        let found = page.count.max(len_u64(page.results.len()));
        if found > 1 {
            return Err(Error::AmbiguousObject {
                kind: kind.name().to_owned(),
                name,
                count: found,
            });
        }
        let object = page
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::ObjectNotFound {
                kind: kind.name().to_owned(),
                name,
            })?;
        sink.accept(object)
    }

    /// Fetch the object of `kind` named `name`.
    ///
    /// Only the tenant of `opts` is carried into the lookup.
    pub async fn get_object_by_name<T>(
        &self,
        kind: ResourceKind,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let slot = Arc::new(ResultSlot::<T>::new());
        let mut lookup = RequestOptions::new().name(name);
        lookup.push(slot.option());
        if let Some(tenant) = opts.resolve().tenant {
            lookup.push(ApiOption::Tenant(tenant));
        }
        self.get_object(kind, &lookup).await?;
        slot.take().ok_or(Error::InvalidOptions("object lookup produced no result"))
    }

    // ── Controller ───────────────────────────────────────────────────

    /// Version string from `api/initial-data`.
    pub async fn controller_version(&self) -> Result<String, Error> {
        let data: Value = self.get("api/initial-data", &RequestOptions::new()).await?;
        data.pointer("/version/Version")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::Deserialization {
                message: "initial-data has no version.Version".into(),
                body: data.to_string(),
            })
    }

    /// Wait until the controller answers its status endpoint, using the
    /// session's status-check bounds or the defaults.
    pub async fn check_controller_status(&self) -> Result<(), Error> {
        let check = self.retry.status_check.clone().unwrap_or_default();
        self.wait_for_controller(&check).await
    }

    async fn send_resolved(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        resolved: &ResolvedOptions,
    ) -> Result<String, Error> {
        let params: Vec<(String, String)> = resolved.query_params().cloned().collect();
        let url = self.request_url(path, &params)?;
        self.execute(method, &url, body, resolved).await
    }
}

fn len_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
