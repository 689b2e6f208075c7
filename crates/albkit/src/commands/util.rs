//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use albkit_api::{DynamicObject, RESOURCE_KINDS, ResourceKind};

use crate::error::CliError;

/// Resolve a kind argument (`pool`, `VirtualService`, ...) against the registry.
pub fn resolve_kind(raw: &str) -> Result<ResourceKind, CliError> {
    ResourceKind::find(raw).ok_or_else(|| CliError::UnknownKind { kind: raw.into() })
}

/// Kinds whose name contains `filter`, ignoring case. `None` keeps all.
pub fn filter_kinds(filter: Option<&str>) -> Vec<ResourceKind> {
    let needle = filter.map(str::to_ascii_lowercase);
    RESOURCE_KINDS
        .iter()
        .filter(|kind| needle.as_deref().is_none_or(|n| kind.token().contains(n)))
        .copied()
        .collect()
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read a JSON object from a `--from-file` path.
pub fn read_object_file(path: &Path) -> Result<DynamicObject, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    DynamicObject::try_from(value).map_err(|other| CliError::Validation {
        field: "from-file".into(),
        reason: format!("expected a JSON object, got {}", json_type(&other)),
    })
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// The tenant name carried by a `tenant_ref`.
///
/// Refs look like `https://ctrl/api/tenant/<uuid>#<name>`; the name after
/// `#` is only present when the controller was asked to include names.
pub fn ref_display(reference: &str) -> &str {
    match reference.rsplit_once('#') {
        Some((_, name)) => name,
        None => reference.rsplit('/').next().unwrap_or(reference),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn kinds_resolve_by_token_or_name() {
        assert_eq!(resolve_kind("pool").unwrap().name(), "Pool");
        assert_eq!(
            resolve_kind("VirtualService").unwrap().token(),
            "virtualservice"
        );
        assert!(matches!(
            resolve_kind("nosuchkind"),
            Err(CliError::UnknownKind { .. })
        ));
    }

    #[test]
    fn kind_filter_is_case_insensitive() {
        let kinds = filter_kinds(Some("POOL"));
        assert!(kinds.iter().any(|k| k.name() == "Pool"));
        assert!(kinds.iter().any(|k| k.name() == "PoolGroup"));
        assert!(kinds.iter().all(|k| k.token().contains("pool")));
        assert_eq!(filter_kinds(None).len(), RESOURCE_KINDS.len());
    }

    #[test]
    fn object_file_must_hold_an_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "web", "uuid": "pool-1"}}"#).unwrap();
        let obj = read_object_file(file.path()).unwrap();
        assert_eq!(obj.name(), Some("web"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let err = read_object_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn refs_show_name_or_uuid() {
        assert_eq!(
            ref_display("https://ctrl/api/tenant/tenant-1#admin"),
            "admin"
        );
        assert_eq!(ref_display("https://ctrl/api/tenant/tenant-1"), "tenant-1");
    }
}
