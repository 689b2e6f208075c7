// Request options
//
// Every session call takes an ordered, append-only sequence of options.
// The sequence is folded front to back into `ResolvedOptions`, so a later
// tenant or cloud overrides an earlier one. Internally injected options
// (name filters, result destinations) are always appended after the
// caller's, never spliced in front of them.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

// ── Result destinations ─────────────────────────────────────────────

/// Destination a session call decodes its result into.
///
/// Used by lookups whose output is delivered through the options sequence
/// rather than the return value.
pub trait ResultSink: fmt::Debug + Send + Sync {
    fn accept(&self, value: Value) -> Result<(), Error>;
}

/// Typed, single-use [`ResultSink`].
pub struct ResultSlot<T> {
    value: Mutex<Option<T>>,
}

impl<T> ResultSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    /// Take the decoded value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.value.lock().expect("result slot lock poisoned").take()
    }
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ResultSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResultSlot")
    }
}

impl<T: DeserializeOwned + Send + 'static> ResultSlot<T> {
    /// The `ApiOption::Result` element pointing at this slot.
    pub fn option(self: &Arc<Self>) -> ApiOption {
        ApiOption::Result(Arc::clone(self) as Arc<dyn ResultSink>)
    }
}

impl<T: DeserializeOwned + Send> ResultSink for ResultSlot<T> {
    fn accept(&self, value: Value) -> Result<(), Error> {
        let decoded = serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })?;
        *self.value.lock().expect("result slot lock poisoned") = Some(decoded);
        Ok(())
    }
}

// ── Options ─────────────────────────────────────────────────────────

/// One request-shaping option.
#[derive(Debug, Clone)]
pub enum ApiOption {
    /// Tenant for the `X-Avi-Tenant` header (overrides the session tenant).
    Tenant(String),
    /// Name filter for object lookups.
    Name(String),
    /// Cloud name filter for object lookups.
    Cloud(String),
    /// Cloud uuid filter (`cloud_ref.uuid`) for object lookups.
    CloudUuid(String),
    /// Ask the controller to omit default-valued fields.
    SkipDefault,
    /// Ask the controller to resolve `*_ref` fields to `url#name` form.
    IncludeName,
    /// Extra query parameter.
    Param(String, String),
    /// JSON body for option-aware deletes.
    Payload(Value),
    /// Correlation id sent as `X-Request-ID`.
    RequestId(String),
    /// Where the decoded result of the call is written.
    Result(Arc<dyn ResultSink>),
}

impl PartialEq for ApiOption {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Tenant(a), Self::Tenant(b))
            | (Self::Name(a), Self::Name(b))
            | (Self::Cloud(a), Self::Cloud(b))
            | (Self::CloudUuid(a), Self::CloudUuid(b))
            | (Self::RequestId(a), Self::RequestId(b)) => a == b,
            (Self::SkipDefault, Self::SkipDefault) | (Self::IncludeName, Self::IncludeName) => {
                true
            }
            (Self::Param(ka, va), Self::Param(kb, vb)) => ka == kb && va == vb,
            (Self::Payload(a), Self::Payload(b)) => a == b,
            (Self::Result(a), Self::Result(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Ordered sequence of [`ApiOption`]s passed through every call.
///
/// Builder methods consume and return `self`; [`chained`](Self::chained)
/// borrows and allocates, so a caller's sequence is never mutated by the
/// calls it is passed to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    options: Vec<ApiOption>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tenant(self, tenant: impl Into<String>) -> Self {
        self.with(ApiOption::Tenant(tenant.into()))
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.with(ApiOption::Name(name.into()))
    }

    pub fn cloud(self, cloud: impl Into<String>) -> Self {
        self.with(ApiOption::Cloud(cloud.into()))
    }

    pub fn cloud_uuid(self, uuid: impl Into<String>) -> Self {
        self.with(ApiOption::CloudUuid(uuid.into()))
    }

    pub fn skip_default(self) -> Self {
        self.with(ApiOption::SkipDefault)
    }

    pub fn include_name(self) -> Self {
        self.with(ApiOption::IncludeName)
    }

    pub fn param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(ApiOption::Param(key.into(), value.into()))
    }

    pub fn payload(self, payload: Value) -> Self {
        self.with(ApiOption::Payload(payload))
    }

    pub fn request_id(self, id: impl Into<String>) -> Self {
        self.with(ApiOption::RequestId(id.into()))
    }

    pub fn result(self, sink: Arc<dyn ResultSink>) -> Self {
        self.with(ApiOption::Result(sink))
    }

    /// Append one option.
    pub fn push(&mut self, option: ApiOption) {
        self.options.push(option);
    }

    /// A new sequence: these options followed by `extra`.
    pub fn chained(&self, extra: ApiOption) -> Self {
        let mut options = Vec::with_capacity(self.options.len() + 1);
        options.extend(self.options.iter().cloned());
        options.push(extra);
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApiOption> {
        self.options.iter()
    }

    pub fn as_slice(&self) -> &[ApiOption] {
        &self.options
    }

    /// Fold the sequence into its effective values.
    pub(crate) fn resolve(&self) -> ResolvedOptions {
        let mut resolved = ResolvedOptions::default();
        for option in &self.options {
            match option {
                ApiOption::Tenant(t) => resolved.tenant = Some(t.clone()),
                ApiOption::Name(n) => resolved.name = Some(n.clone()),
                ApiOption::Cloud(c) => resolved.cloud = Some(c.clone()),
                ApiOption::CloudUuid(c) => resolved.cloud_uuid = Some(c.clone()),
                ApiOption::SkipDefault => resolved.skip_default = true,
                ApiOption::IncludeName => resolved.include_name = true,
                ApiOption::Param(key, value) => {
                    if let Some(slot) = resolved.params.iter_mut().find(|(k, _)| k == key) {
                        slot.1.clone_from(value);
                    } else {
                        resolved.params.push((key.clone(), value.clone()));
                    }
                }
                ApiOption::Payload(p) => resolved.payload = Some(p.clone()),
                ApiOption::RequestId(id) => resolved.request_id = Some(id.clone()),
                ApiOption::Result(sink) => resolved.result = Some(Arc::clone(sink)),
            }
        }
        resolved
    }

    fn with(mut self, option: ApiOption) -> Self {
        self.options.push(option);
        self
    }
}

impl From<Vec<ApiOption>> for RequestOptions {
    fn from(options: Vec<ApiOption>) -> Self {
        Self { options }
    }
}

impl FromIterator<ApiOption> for RequestOptions {
    fn from_iter<I: IntoIterator<Item = ApiOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RequestOptions {
    type Item = &'a ApiOption;
    type IntoIter = std::slice::Iter<'a, ApiOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

// ── Resolution ──────────────────────────────────────────────────────

/// Effective values of an option sequence.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedOptions {
    pub name: Option<String>,
    pub cloud: Option<String>,
    pub cloud_uuid: Option<String>,
    pub tenant: Option<String>,
    pub skip_default: bool,
    pub include_name: bool,
    pub params: Vec<(String, String)>,
    pub payload: Option<Value>,
    pub request_id: Option<String>,
    pub result: Option<Arc<dyn ResultSink>>,
}

impl ResolvedOptions {
    /// Query pairs for a name-filtered object lookup.
    ///
    /// A cloud name takes precedence over a cloud uuid.
    pub fn object_filters(&self) -> Vec<(String, String)> {
        let mut filters = Vec::new();
        if let Some(ref name) = self.name {
            filters.push(("name".to_owned(), name.clone()));
        }
        if let Some(ref cloud) = self.cloud {
            filters.push(("cloud".to_owned(), cloud.clone()));
        } else if let Some(ref uuid) = self.cloud_uuid {
            filters.push(("cloud_ref.uuid".to_owned(), uuid.clone()));
        }
        if self.skip_default {
            filters.push(("skip_default".to_owned(), "true".to_owned()));
        }
        if self.include_name {
            filters.push(("include_name".to_owned(), "true".to_owned()));
        }
        filters
    }

    /// Extra query params, minus keys a dedicated option already sets.
    pub fn query_params(&self) -> impl Iterator<Item = &(String, String)> {
        self.params.iter().filter(|(key, _)| !self.supersedes(key))
    }

    fn supersedes(&self, key: &str) -> bool {
        match key {
            "name" => self.name.is_some(),
            "cloud" => self.cloud.is_some(),
            "cloud_ref.uuid" => self.cloud_uuid.is_some(),
            "include_name" => self.include_name,
            "skip_default" => self.skip_default,
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn chained_appends_exactly_one_option() {
        let caller = RequestOptions::new().tenant("t1").cloud("aws");
        let slot = Arc::new(ResultSlot::<Value>::new());
        let extra = slot.option();

        let chained = caller.chained(extra.clone());

        assert_eq!(chained.len(), caller.len() + 1);
        assert_eq!(&chained.as_slice()[..caller.len()], caller.as_slice());
        assert_eq!(chained.as_slice().last(), Some(&extra));
    }

    #[test]
    fn chained_leaves_caller_untouched() {
        let caller = RequestOptions::new().tenant("t1");
        let before = caller.clone();
        let _ = caller.chained(ApiOption::Name("web".into()));
        assert_eq!(caller, before);
    }

    #[test]
    fn chained_on_empty_has_single_element() {
        let caller = RequestOptions::new();
        let chained = caller.chained(ApiOption::SkipDefault);
        assert_eq!(chained.as_slice(), &[ApiOption::SkipDefault]);
    }

    #[test]
    fn later_tenant_wins() {
        let opts = RequestOptions::new().tenant("first").tenant("second");
        assert_eq!(opts.resolve().tenant.as_deref(), Some("second"));
    }

    #[test]
    fn params_keep_order_and_override_in_place() {
        let opts = RequestOptions::new()
            .param("fields", "name")
            .param("page_size", "10")
            .param("fields", "uuid");
        let resolved = opts.resolve();
        assert_eq!(
            resolved.params,
            vec![
                ("fields".to_owned(), "uuid".to_owned()),
                ("page_size".to_owned(), "10".to_owned()),
            ]
        );
    }

    #[test]
    fn superseded_params_are_dropped() {
        let resolved = RequestOptions::new()
            .name("web")
            .param("name", "other")
            .param("refers_to", "pool:1")
            .resolve();
        let params: Vec<_> = resolved.query_params().collect();
        assert_eq!(params, vec![&("refers_to".to_owned(), "pool:1".to_owned())]);
    }

    #[test]
    fn cloud_name_beats_cloud_uuid() {
        let resolved = RequestOptions::new()
            .name("web")
            .cloud_uuid("cloud-1")
            .cloud("Default-Cloud")
            .include_name()
            .resolve();
        assert_eq!(
            resolved.object_filters(),
            vec![
                ("name".to_owned(), "web".to_owned()),
                ("cloud".to_owned(), "Default-Cloud".to_owned()),
                ("include_name".to_owned(), "true".to_owned()),
            ]
        );
    }

    #[test]
    fn result_slot_decodes_value() {
        let slot = ResultSlot::<std::collections::HashMap<String, u32>>::new();
        slot.accept(serde_json::json!({"port": 80})).unwrap();
        assert_eq!(slot.take().unwrap()["port"], 80);
        assert!(slot.take().is_none());
    }

    #[test]
    fn result_slot_rejects_wrong_shape() {
        let slot = ResultSlot::<u32>::new();
        let err = slot.accept(serde_json::json!("eighty")).unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }
}
