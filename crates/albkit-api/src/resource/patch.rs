use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Partial-update verb understood by the controller's PATCH endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PatchOp {
    /// Append entries to list fields.
    Add,
    /// Overwrite the given fields.
    Replace,
    /// Remove entries from list fields.
    Delete,
}

/// Wrap a payload as `{"<op>": payload}`.
pub fn patch_body<P: Serialize + ?Sized>(payload: &P, op: PatchOp) -> Result<Value, Error> {
    let mut body = Map::with_capacity(1);
    body.insert(op.as_ref().to_owned(), serde_json::to_value(payload)?);
    Ok(Value::Object(body))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ops_use_lowercase_tokens() {
        assert_eq!(PatchOp::Add.to_string(), "add");
        assert_eq!(PatchOp::Replace.as_ref(), "replace");
        assert_eq!(serde_json::to_value(PatchOp::Delete).unwrap(), json!("delete"));
        assert_eq!("REPLACE".parse::<PatchOp>().unwrap(), PatchOp::Replace);
        assert!("merge".parse::<PatchOp>().is_err());
    }

    #[test]
    fn body_nests_payload_under_op() {
        let body = patch_body(&json!({"enabled": false}), PatchOp::Replace).unwrap();
        assert_eq!(body, json!({"replace": {"enabled": false}}));
    }
}
