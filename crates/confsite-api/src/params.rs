//! Request shapes shared by the collection resources.

use confsite_core::{RecordId, validate::Validate};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// `?id=` on `DELETE` routes. Kept as text so a missing or malformed id is a
/// 400 with a readable message rather than a generic query rejection.
#[derive(Debug, Deserialize)]
pub struct IdParams {
  pub id: Option<String>,
}

impl IdParams {
  pub fn require(&self) -> Result<RecordId, ApiError> {
    let raw = self
      .id
      .as_deref()
      .ok_or_else(|| ApiError::BadRequest("`id` is required".into()))?;
    parse_id(raw)
  }
}

pub fn parse_id(raw: &str) -> Result<RecordId, ApiError> {
  raw
    .trim()
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("invalid id: {raw}")))
}

/// A `PATCH`/`PUT` body: the patch payload plus an optional `id` field.
///
/// The id may arrive as a JSON number or a numeric string.
#[derive(Debug)]
pub struct PatchBody<P> {
  pub id:    Option<RecordId>,
  pub patch: P,
}

impl<P> PatchBody<P>
where
  P: DeserializeOwned + Validate,
{
  pub fn parse(mut body: Map<String, Value>) -> Result<Self, ApiError> {
    let id = match body.remove("id") {
      None | Some(Value::Null) => None,
      Some(Value::Number(n)) => Some(
        n.as_i64()
          .ok_or_else(|| ApiError::BadRequest(format!("invalid id: {n}")))?,
      ),
      Some(Value::String(s)) => Some(parse_id(&s)?),
      Some(other) => return Err(ApiError::BadRequest(format!("invalid id: {other}"))),
    };

    let patch: P = serde_json::from_value(Value::Object(body))
      .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    patch.validate()?;
    Ok(Self { id, patch })
  }

  /// Resolve the target id from the path segment and/or the body.
  pub fn target(&self, path_id: Option<RecordId>) -> Result<RecordId, ApiError> {
    match (path_id, self.id) {
      (Some(p), Some(b)) if p != b => Err(ApiError::BadRequest(format!(
        "id mismatch: path {p}, body {b}"
      ))),
      (Some(id), _) | (None, Some(id)) => Ok(id),
      (None, None) => Err(ApiError::BadRequest("`id` is required".into())),
    }
  }
}

#[cfg(test)]
mod tests {
  use confsite_core::speaker::SpeakerPatch;
  use serde_json::json;

  use super::*;

  fn body(v: Value) -> Map<String, Value> {
    match v {
      Value::Object(m) => m,
      _ => unreachable!(),
    }
  }

  #[test]
  fn id_taken_from_body_number_or_string() {
    let p = PatchBody::<SpeakerPatch>::parse(body(json!({ "id": 7, "name": "Ada" }))).unwrap();
    assert_eq!(p.id, Some(7));
    assert_eq!(p.patch.name.as_deref(), Some("Ada"));

    let p = PatchBody::<SpeakerPatch>::parse(body(json!({ "id": "8" }))).unwrap();
    assert_eq!(p.target(None).unwrap(), 8);
  }

  #[test]
  fn missing_id_is_bad_request() {
    let p = PatchBody::<SpeakerPatch>::parse(body(json!({ "name": "Ada" }))).unwrap();
    assert!(matches!(p.target(None), Err(ApiError::BadRequest(_))));
    assert_eq!(p.target(Some(3)).unwrap(), 3);
  }

  #[test]
  fn conflicting_ids_rejected() {
    let p = PatchBody::<SpeakerPatch>::parse(body(json!({ "id": 1 }))).unwrap();
    assert!(p.target(Some(2)).is_err());
    assert_eq!(p.target(Some(1)).unwrap(), 1);
  }

  #[test]
  fn unknown_field_rejected() {
    let err = PatchBody::<SpeakerPatch>::parse(body(json!({ "id": 1, "nmae": "x" })));
    assert!(matches!(err, Err(ApiError::BadRequest(_))));
  }

  #[test]
  fn blank_required_field_rejected() {
    let err = PatchBody::<SpeakerPatch>::parse(body(json!({ "id": 1, "name": "  " })));
    assert!(matches!(err, Err(ApiError::BadRequest(_))));
  }

  #[test]
  fn delete_id_parsing() {
    assert_eq!(IdParams { id: Some("12".into()) }.require().unwrap(), 12);
    assert!(IdParams { id: Some("abc".into()) }.require().is_err());
    assert!(IdParams { id: None }.require().is_err());
  }
}
