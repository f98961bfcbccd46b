use crate::errors::{GenJwtError, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;

pub type Claims = Map<String, Value>;

/// Where the base payload of a token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    /// JSON document given directly on the command line.
    Inline(String),
    /// Path to a file holding a JSON document.
    File(PathBuf),
}

impl PayloadSource {
    /// Picks the payload file when one is given, the inline payload otherwise.
    ///
    /// An empty file path counts as no file.
    pub fn new(inline: String, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) if !path.as_os_str().is_empty() => PayloadSource::File(path),
            _ => PayloadSource::Inline(inline),
        }
    }
}

/// Loads the base payload as a JSON object.
///
/// # Errors
///
/// * `GenJwtError::PayloadFileIo` - The payload file can't be read.
/// * `GenJwtError::PayloadFileJson` - The payload file is not valid JSON.
/// * `GenJwtError::PayloadJson` - The inline payload is not valid JSON.
/// * `GenJwtError::NotAnObject` - The document is valid JSON but not an object.
pub fn load_payload(source: &PayloadSource) -> Result<Claims> {
    match source {
        PayloadSource::File(path) => {
            debug!(path = %path.display(), "Reading payload file");
            let data = std::fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&data).map_err(GenJwtError::PayloadFileJson)?;
            into_object(value, "payload")
        }
        PayloadSource::Inline(payload) if payload.is_empty() => Ok(Claims::new()),
        PayloadSource::Inline(payload) => {
            let value: Value = serde_json::from_str(payload).map_err(GenJwtError::PayloadJson)?;
            into_object(value, "payload")
        }
    }
}

/// Merges the additional claims over the payload.
///
/// Claims win on collision. A replaced key keeps its place in the payload,
/// new keys are appended in the order they appear in `claims`. Empty `claims`
/// leave the payload untouched.
pub fn merge_claims(mut payload: Claims, claims: &str) -> Result<Claims> {
    if claims.is_empty() {
        return Ok(payload);
    }

    let value: Value = serde_json::from_str(claims).map_err(GenJwtError::ClaimsJson)?;
    let claims = into_object(value, "claims")?;

    for (key, value) in claims {
        if payload.contains_key(&key) {
            debug!(claim = %key, "Claim overrides payload value");
        }
        payload.insert(key, value);
    }

    Ok(payload)
}

/// Loads the payload from its source then merges the additional claims over it.
pub fn build_claims(source: &PayloadSource, claims: &str) -> Result<Claims> {
    let payload = load_payload(source)?;
    merge_claims(payload, claims)
}

fn into_object(value: Value, origin: &'static str) -> Result<Claims> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Claims::new()),
        other => Err(GenJwtError::NotAnObject {
            origin,
            found: kind(&other),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn keys(claims: &Claims) -> Vec<&str> {
        claims.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_load_inline_payload() {
        let source = PayloadSource::Inline(r#"{"user":"alice","admin":true}"#.to_string());
        let payload = load_payload(&source).expect("Unable to load the payload");
        assert_eq!(payload["user"], json!("alice"));
        assert_eq!(payload["admin"], json!(true));
    }

    /// The payload file wins over the inline payload when both are given.
    #[test]
    fn test_payload_file_overrides_inline() {
        let mut file = tempfile::NamedTempFile::new().expect("Unable to create temp file");
        write!(file, r#"{{"from":"file"}}"#).expect("Unable to write temp file");

        let source = PayloadSource::new(
            r#"{"from":"inline"}"#.to_string(),
            Some(file.path().to_path_buf()),
        );
        assert_eq!(source, PayloadSource::File(file.path().to_path_buf()));

        let payload = load_payload(&source).expect("Unable to load the payload");
        assert_eq!(payload["from"], json!("file"));
    }

    #[test]
    fn test_missing_payload_file() {
        let dir = tempfile::tempdir().expect("Unable to create temp dir");
        let source = PayloadSource::File(dir.path().join("missing.json"));

        let error = load_payload(&source).expect_err("A missing file must fail");
        assert!(matches!(error, GenJwtError::PayloadFileIo(_)));
        assert!(error.to_string().starts_with("Error reading payload file: "));
    }

    #[test]
    fn test_malformed_payload_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Unable to create temp file");
        write!(file, "{{not json").expect("Unable to write temp file");

        let error = load_payload(&PayloadSource::File(file.path().to_path_buf()))
            .expect_err("Malformed file must fail");
        assert!(matches!(error, GenJwtError::PayloadFileJson(_)));
        assert!(error.to_string().starts_with("Error reading payload file: "));
    }

    #[test]
    fn test_malformed_inline_payload() {
        let error = load_payload(&PayloadSource::Inline("{oops".to_string()))
            .expect_err("Malformed payload must fail");
        assert!(error.to_string().starts_with("Invalid payload JSON: "));
    }

    #[test]
    fn test_non_object_payload() {
        let error = load_payload(&PayloadSource::Inline("[1, 2]".to_string()))
            .expect_err("An array payload must fail");
        assert_eq!(
            error.to_string(),
            "Invalid payload JSON: expected an object but found an array"
        );
    }

    #[test]
    fn test_non_object_payload_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Unable to create temp file");
        write!(file, r#"["a", "b"]"#).expect("Unable to write temp file");

        let error = load_payload(&PayloadSource::File(file.path().to_path_buf()))
            .expect_err("An array payload file must fail");
        assert_eq!(
            error.to_string(),
            "Invalid payload JSON: expected an object but found an array"
        );
    }

    /// An empty inline payload is the same as `{}`.
    #[test]
    fn test_empty_inline_payload() {
        let payload = load_payload(&PayloadSource::Inline(String::new()))
            .expect("Unable to load the payload");
        assert!(payload.is_empty());
    }

    /// An empty payload file path falls back to the inline payload.
    #[test]
    fn test_empty_payload_file_path() {
        let source = PayloadSource::new(r#"{"from":"inline"}"#.to_string(), Some(PathBuf::new()));
        assert_eq!(
            source,
            PayloadSource::Inline(r#"{"from":"inline"}"#.to_string())
        );

        let payload = load_payload(&source).expect("Unable to load the payload");
        assert_eq!(payload["from"], json!("inline"));
    }

    #[test]
    fn test_empty_claims_keep_payload() {
        let payload = load_payload(&PayloadSource::Inline(r#"{"a":1}"#.to_string()))
            .expect("Unable to load the payload");
        let merged = merge_claims(payload, "").expect("Unable to merge the claims");
        assert_eq!(keys(&merged), vec!["a"]);
    }

    #[test]
    fn test_null_payload_is_empty() {
        let payload = load_payload(&PayloadSource::Inline("null".to_string()))
            .expect("Unable to load the payload");
        assert!(payload.is_empty());
    }

    /// Claims take precedence over the payload, colliding keys keep their position.
    #[test]
    fn test_merge_claims_precedence_and_order() {
        let payload = load_payload(&PayloadSource::Inline(
            r#"{"role":"user","name":"bob"}"#.to_string(),
        ))
        .expect("Unable to load the payload");

        let merged = merge_claims(payload, r#"{"scope":"read","role":"admin"}"#)
            .expect("Unable to merge the claims");

        assert_eq!(merged["role"], json!("admin"));
        assert_eq!(keys(&merged), vec!["role", "name", "scope"]);
    }

    #[test]
    fn test_malformed_claims() {
        let error = merge_claims(Claims::new(), "{,}").expect_err("Malformed claims must fail");
        assert!(matches!(error, GenJwtError::ClaimsJson(_)));
        assert!(error.to_string().starts_with("Invalid claims JSON: "));
    }

    #[test]
    fn test_non_object_claims() {
        let error = merge_claims(Claims::new(), "\"scope\"").expect_err("A string must fail");
        assert_eq!(
            error.to_string(),
            "Invalid claims JSON: expected an object but found a string"
        );
    }

    #[test]
    fn test_build_claims_defaults() {
        let claims = build_claims(&PayloadSource::Inline("{}".to_string()), "{}")
            .expect("Unable to build the claims");
        assert!(claims.is_empty());
    }
}
