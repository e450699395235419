//! Classification and validation of response documents.

use plexrpc_protocol::{JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject, JsonRpcMessage, JsonRpcVersion, RequestId, keys};
use serde_json::{Map, Value};
use tracing::debug;

use crate::builder::IdSpace;
use crate::error::ResponseViolation;

/// A response document that passed validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedResponse {
    Single(JsonRpcMessage),
    Batch(Vec<JsonRpcMessage>),
}

impl ValidatedResponse {
    pub fn messages(&self) -> &[JsonRpcMessage] {
        match self {
            ValidatedResponse::Single(message) => std::slice::from_ref(message),
            ValidatedResponse::Batch(messages) => messages,
        }
    }

    pub fn into_messages(self) -> Vec<JsonRpcMessage> {
        match self {
            ValidatedResponse::Single(message) => vec![message],
            ValidatedResponse::Batch(messages) => messages,
        }
    }
}

/// Checks response envelopes against the error taxonomy and the ids issued so far.
///
/// Numeric ids are only checked for plausibility: any integer in
/// `1..=issued` is accepted, whichever request it belongs to.
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    ids: IdSpace,
}

const RESULT_KEYS: [&str; 3] = [keys::JSONRPC, keys::RESULT, keys::ID];
const ERROR_KEYS: [&str; 3] = [keys::JSONRPC, keys::ERROR, keys::ID];
const ERROR_OBJECT_KEYS: [&str; 3] = [keys::CODE, keys::MESSAGE, "data"];

impl ResponseValidator {
    pub fn new(ids: IdSpace) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &IdSpace {
        &self.ids
    }

    pub fn is_batch(&self, document: &Value) -> bool {
        document.is_array()
    }

    /// True when a single response object carries an `error` member.
    ///
    /// Always false for arrays: errors inside a batch are not reported here.
    pub fn is_error(&self, document: &Value) -> bool {
        document
            .as_object()
            .is_some_and(|object| object.contains_key(keys::ERROR))
    }

    /// True when the document is a legal single response or a batch of legal responses
    pub fn validate(&self, document: &Value) -> bool {
        match self.inspect(document) {
            Ok(_) => true,
            Err(violation) => {
                debug!(reason = %violation, "Response failed validation");
                false
            }
        }
    }

    /// Per-element validity, in input order. Empty for non-array documents.
    pub fn validate_batch(&self, document: &Value) -> Vec<bool> {
        match document.as_array() {
            Some(elements) => elements
                .iter()
                .map(|element| self.check_object(element).is_ok())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Validate and return the typed message(s), or the first reason for rejection
    pub fn inspect(&self, document: &Value) -> Result<ValidatedResponse, ResponseViolation> {
        match document {
            Value::Null => Err(ResponseViolation::EmptyDocument),
            Value::Array(elements) if elements.is_empty() => Err(ResponseViolation::EmptyDocument),
            Value::Object(object) if object.is_empty() => Err(ResponseViolation::EmptyDocument),
            Value::Array(elements) => elements
                .iter()
                .map(|element| self.check_object(element))
                .collect::<Result<Vec<_>, _>>()
                .map(ValidatedResponse::Batch),
            Value::Object(_) => self.check_object(document).map(ValidatedResponse::Single),
            _ => Err(ResponseViolation::NotAnObject),
        }
    }

    /// Validate one response object
    pub fn check_object(&self, element: &Value) -> Result<JsonRpcMessage, ResponseViolation> {
        let object = element.as_object().ok_or(ResponseViolation::NotAnObject)?;

        if object.contains_key(keys::ERROR) {
            require_keys(object, &ERROR_KEYS)?;
            require_version(object)?;
            let error = check_error_object(&object[keys::ERROR])?;
            let id = match &object[keys::ID] {
                Value::Null => RequestId::Null,
                id => self.check_id(id)?,
            };
            Ok(JsonRpcError::new(id, error).into())
        } else {
            require_keys(object, &RESULT_KEYS)?;
            require_version(object)?;
            let id = self.check_id(&object[keys::ID])?;
            Ok(JsonRpcMessage::success(id, object[keys::RESULT].clone()))
        }
    }

    fn check_id(&self, id: &Value) -> Result<RequestId, ResponseViolation> {
        let numeric = id
            .as_i64()
            .ok_or_else(|| ResponseViolation::IdNotInteger(id.clone()))?;
        let issued = self.ids.current();
        if numeric < 1 || numeric as u64 > issued {
            return Err(ResponseViolation::IdOutOfRange { id: numeric, issued });
        }
        Ok(RequestId::from(numeric))
    }
}

fn require_keys(object: &Map<String, Value>, expected: &[&str; 3]) -> Result<(), ResponseViolation> {
    if object.len() == expected.len() && expected.iter().all(|key| object.contains_key(*key)) {
        Ok(())
    } else {
        Err(ResponseViolation::KeySet(object.keys().cloned().collect()))
    }
}

fn require_version(object: &Map<String, Value>) -> Result<(), ResponseViolation> {
    if JsonRpcVersion::matches(object.get(keys::JSONRPC)) {
        Ok(())
    } else {
        Err(ResponseViolation::BadVersion)
    }
}

fn check_error_object(error: &Value) -> Result<JsonRpcErrorObject, ResponseViolation> {
    let object = error.as_object().ok_or(ResponseViolation::MalformedError)?;
    if object.keys().any(|key| !ERROR_OBJECT_KEYS.contains(&key.as_str())) {
        return Err(ResponseViolation::MalformedError);
    }

    let code = object
        .get(keys::CODE)
        .and_then(Value::as_i64)
        .ok_or(ResponseViolation::MalformedError)?;
    let message = object
        .get(keys::MESSAGE)
        .and_then(Value::as_str)
        .ok_or(ResponseViolation::MalformedError)?;

    let kind = JsonRpcErrorCode::from_code(code).ok_or(ResponseViolation::UnknownErrorCode(code))?;
    if !kind.accepts_message(message) {
        return Err(ResponseViolation::MismatchedMessage {
            code,
            message: message.to_string(),
        });
    }

    Ok(JsonRpcErrorObject {
        code,
        message: message.to_string(),
        data: object.get("data").cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A validator that has issued ids 1..=issued
    fn validator(issued: u64) -> ResponseValidator {
        let ids = IdSpace::new();
        for _ in 0..issued {
            ids.next_id();
        }
        ResponseValidator::new(ids)
    }

    #[test]
    fn test_success_response() {
        let validator = validator(2);
        assert!(validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 1})));
        assert!(validator.validate(&json!({"jsonrpc": "2.0", "result": null, "id": 2})));
        assert!(!validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 3})));
        assert!(!validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 0})));
        assert!(!validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": "1"})));
        assert!(!validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 1.0})));
        assert!(!validator.validate(&json!({"jsonrpc": "1.0", "result": 19, "id": 1})));
        assert!(!validator.validate(&json!({"jsonrpc": "2.0", "result": 19})));
        assert!(!validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 1, "extra": 0})));
    }

    #[test]
    fn test_nothing_issued_rejects_every_id() {
        let validator = validator(0);
        assert_eq!(
            validator.inspect(&json!({"jsonrpc": "2.0", "result": 1, "id": 1})),
            Err(ResponseViolation::IdOutOfRange { id: 1, issued: 0 })
        );
    }

    #[test]
    fn test_error_response() {
        let validator = validator(1);
        assert!(validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 1
        })));
        assert!(validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32700, "message": "Parse error"}, "id": null
        })));
        assert!(validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32000, "message": "Server error", "data": {"x": 1}}, "id": null
        })));
        assert!(!validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 2
        })));
        assert!(!validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "result": 1, "id": 1
        })));
        assert!(!validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found", "x": 1}, "id": 1
        })));
        assert!(!validator.validate(&json!({"jsonrpc": "2.0", "error": "boom", "id": 1})));
    }

    #[test]
    fn test_error_taxonomy_pairing() {
        let validator = validator(1);
        let pairs = [
            (-32700, "Parse error"),
            (-32701, "Parse error"),
            (-32702, "Parse error"),
            (-32600, "Invalid Request"),
            (-32601, "Method not found"),
            (-32602, "Invalid params"),
            (-32603, "Internal error"),
            (-32099, "Server error"),
            (-32050, "Server error"),
            (-32000, "Server error"),
        ];

        for (code, message) in pairs {
            let good = json!({"jsonrpc": "2.0", "error": {"code": code, "message": message}, "id": 1});
            assert!(validator.validate(&good), "{}", good);

            let bad = json!({"jsonrpc": "2.0", "error": {"code": code, "message": "Oops"}, "id": 1});
            assert_eq!(
                validator.inspect(&bad),
                Err(ResponseViolation::MismatchedMessage { code, message: "Oops".to_string() })
            );
        }

        for code in [-32100, -31999, -32604, -32500, 0, 32500] {
            let unknown = json!({"jsonrpc": "2.0", "error": {"code": code, "message": "Server error"}, "id": 1});
            assert_eq!(validator.inspect(&unknown), Err(ResponseViolation::UnknownErrorCode(code)));
        }
    }

    #[test]
    fn test_empty_and_scalar_documents() {
        let validator = validator(1);
        assert!(!validator.validate(&Value::Null));
        assert!(!validator.validate(&json!({})));
        assert!(!validator.validate(&json!([])));
        assert!(!validator.validate(&json!("text")));
        assert!(!validator.validate(&json!(1)));
    }

    #[test]
    fn test_is_error_and_is_batch() {
        let validator = validator(1);
        let error = json!({"jsonrpc": "2.0", "error": {"code": -32600, "message": "Invalid Request"}, "id": null});
        assert!(validator.is_error(&error));
        assert!(!validator.is_error(&json!({"jsonrpc": "2.0", "result": 1, "id": 1})));
        assert!(!validator.is_error(&json!([error])));
        assert!(validator.is_batch(&json!([error])));
        assert!(!validator.is_batch(&error));
    }

    #[test]
    fn test_batch_validation() {
        let validator = validator(3);
        let batch = json!([
            {"jsonrpc": "2.0", "result": 7, "id": 1},
            {"jsonrpc": "2.0", "result": 19, "id": 2},
            {"jsonrpc": "2.0", "error": {"code": -32600, "message": "Invalid Request"}, "id": null},
            {"jsonrpc": "2.0", "result": ["hello", 5], "id": 9},
            1
        ]);

        assert_eq!(validator.validate_batch(&batch), vec![true, true, true, false, false]);
        assert!(!validator.validate(&batch));
        assert!(validator.validate_batch(&json!({"jsonrpc": "2.0", "result": 1, "id": 1})).is_empty());

        let good = json!([
            {"jsonrpc": "2.0", "result": 7, "id": 1},
            {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 3}
        ]);
        assert!(validator.validate(&good));
        let ValidatedResponse::Batch(messages) = validator.inspect(&good).unwrap() else {
            panic!("expected batch");
        };
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].error_code(), Some(-32601));
    }

    #[test]
    fn test_inspect_single() {
        let validator = validator(1);
        let response = validator
            .inspect(&json!({"jsonrpc": "2.0", "result": {"a": 1}, "id": 1}))
            .unwrap();
        assert_eq!(
            response,
            ValidatedResponse::Single(JsonRpcMessage::success(RequestId::from(1i64), json!({"a": 1})))
        );
        assert_eq!(response.into_messages().len(), 1);
    }
}
