//! JSON-RPC 2.0 Client Compliance Tests
//!
//! Tests cover:
//! - Call and notification envelope construction
//! - Identifier lifecycle (starts at 1, notifications never consume an id)
//! - Batch construction order
//! - Response validation: key sets, version, id plausibility
//! - Error taxonomy code/message pairing
//! - Batch classification and per-element validation

use plexrpc_client::prelude::*;
use serde_json::{Value, json};

fn params(value: Value) -> Option<RequestParams> {
    RequestParams::from_value(&value)
}

fn to_json<T: serde::Serialize>(envelope: &T) -> Value {
    serde_json::to_value(envelope).unwrap()
}

#[cfg(test)]
mod request_building {
    use super::*;

    #[test]
    fn test_call_with_positional_params() {
        let client = JsonRpcClient::default();
        let request = client.call("myMethod", params(json!([1, 2, 3])));
        assert_eq!(
            to_json(&request),
            json!({"jsonrpc": "2.0", "method": "myMethod", "params": [1, 2, 3], "id": 1})
        );
    }

    #[test]
    fn test_call_without_params() {
        let client = JsonRpcClient::default();
        assert_eq!(
            to_json(&client.call("myMethod", None)),
            json!({"jsonrpc": "2.0", "method": "myMethod", "id": 1})
        );
    }

    #[test]
    fn test_notifications() {
        let client = JsonRpcClient::default();
        assert_eq!(
            to_json(&client.notify("notification", params(json!([1, 2, 3])))),
            json!({"jsonrpc": "2.0", "method": "notification", "params": [1, 2, 3]})
        );
        assert_eq!(
            to_json(&client.notify("notification", params(json!({"param1": 1, "param2": 2})))),
            json!({"jsonrpc": "2.0", "method": "notification", "params": {"param1": 1, "param2": 2}})
        );
        assert_eq!(
            to_json(&client.notify("notification", params(json!({"param2": 1, "param1": 2})))),
            json!({"jsonrpc": "2.0", "method": "notification", "params": {"param1": 2, "param2": 1}})
        );
        assert_eq!(client.builder().ids().current(), 0);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let builder = RequestBuilder::new();
        let ids: Vec<RequestId> = (0..5)
            .map(|i| {
                if i % 2 == 0 {
                    builder.build_notification("tick", None);
                }
                builder.build_call("method", None).id
            })
            .collect();
        let expected: Vec<RequestId> = (1u64..=5).map(RequestId::from).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_batch_request() {
        let client = JsonRpcClient::default();
        let batch = client.batch(vec![
            BatchEntry::call("method_named_params", params(json!({"param1": 1, "param2": 2}))),
            BatchEntry::call("method_positional_params", params(json!([1, 2, 3]))),
            BatchEntry::notification("method_notification_params", params(json!([1, 2, 3]))),
            BatchEntry::notification("method_notification", None),
            BatchEntry::call("method_named_params_reverse", params(json!({"param2": 2, "param1": 1}))),
        ]);

        assert_eq!(
            to_json(&batch),
            json!([
                {"jsonrpc": "2.0", "method": "method_named_params", "params": {"param1": 1, "param2": 2}, "id": 1},
                {"jsonrpc": "2.0", "method": "method_positional_params", "params": [1, 2, 3], "id": 2},
                {"jsonrpc": "2.0", "method": "method_notification_params", "params": [1, 2, 3]},
                {"jsonrpc": "2.0", "method": "method_notification"},
                {"jsonrpc": "2.0", "method": "method_named_params_reverse", "params": {"param2": 2, "param1": 1}, "id": 3}
            ])
        );
    }

    #[test]
    fn test_batch_entry_from_tags() {
        let entries: Result<Vec<BatchEntry>, ClientError> = [("a", "call"), ("b", "notification")]
            .into_iter()
            .map(|(method, tag)| -> Result<BatchEntry, ClientError> {
                Ok(BatchEntry::new(method, None, tag.parse()?))
            })
            .collect();
        let entries = entries.unwrap();
        assert_eq!(entries[0].call_type, CallType::Call);
        assert_eq!(entries[1].call_type, CallType::Notification);

        assert!(matches!("direct".parse::<CallType>(), Err(ClientError::InvalidCallType(_))));
    }
}

#[cfg(test)]
mod response_validation {
    use super::*;

    fn client_with_calls(calls: usize) -> JsonRpcClient {
        let client = JsonRpcClient::default();
        for _ in 0..calls {
            client.call("dummy", params(json!({"param1": 1, "param2": 2})));
        }
        client
    }

    #[test]
    fn test_valid_response() {
        let client = client_with_calls(1);
        assert!(client.validator().validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 1})));
    }

    #[test]
    fn test_id_within_issued_range() {
        let client = client_with_calls(2);
        assert!(client.validator().validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 2})));
        assert!(client.validator().validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 1})));
    }

    #[test]
    fn test_id_beyond_issued_range() {
        let client = client_with_calls(1);
        assert!(!client.validator().validate(&json!({"jsonrpc": "2.0", "result": 42, "id": 666})));
        assert_eq!(
            client.validator().inspect(&json!({"jsonrpc": "2.0", "result": 42, "id": 666})),
            Err(ResponseViolation::IdOutOfRange { id: 666, issued: 1 })
        );
    }

    #[test]
    fn test_missing_or_wrong_version() {
        let client = client_with_calls(1);
        assert!(!client.validator().validate(&json!({"result": 19, "id": 1})));
        assert!(!client.validator().validate(&json!({"jsonrpc": "INVALID", "result": 19, "id": 1})));
    }

    #[test]
    fn test_invalid_body() {
        let client = client_with_calls(1);
        assert!(!client.validator().validate(&json!({"jsonrpc": "2.0", "INVALID_BODY": 42, "id": 1})));
    }

    #[test]
    fn test_error_responses() {
        let client = client_with_calls(1);
        let validator = client.validator();
        assert!(validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 1
        })));
        assert!(validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32700, "message": "Parse error"}, "id": null
        })));
        assert!(!validator.validate(&json!({
            "jsonrpc": "2.0", "error": {"code": 666, "message": "Some message"}, "id": 1
        })));
    }

    #[test]
    fn test_null_error_id_valid_before_any_call() {
        let client = JsonRpcClient::default();
        assert!(client.validator().validate(&json!({
            "jsonrpc": "2.0", "error": {"code": -32700, "message": "Parse error"}, "id": null
        })));
    }

    #[test]
    fn test_every_code_requires_its_message() {
        let client = client_with_calls(1);
        let validator = client.validator();
        let messages = [
            "Parse error",
            "Invalid Request",
            "Method not found",
            "Invalid params",
            "Internal error",
            "Server error",
        ];
        let codes: [(i64, &str); 10] = [
            (-32700, "Parse error"),
            (-32701, "Parse error"),
            (-32702, "Parse error"),
            (-32600, "Invalid Request"),
            (-32601, "Method not found"),
            (-32602, "Invalid params"),
            (-32603, "Internal error"),
            (-32099, "Server error"),
            (-32032, "Server error"),
            (-32000, "Server error"),
        ];

        for (code, paired) in codes {
            for message in messages {
                let response = json!({"jsonrpc": "2.0", "error": {"code": code, "message": message}, "id": 1});
                assert_eq!(validator.validate(&response), message == paired, "{}", response);
            }
        }
    }

    #[test]
    fn test_unparseable_text() {
        let client = client_with_calls(1);
        assert!(matches!(client.decode(r#"{"INVALID": ]foo{bar}}}}"#), Err(ClientError::Codec(_))));
        assert!(!client.validator().validate(&Value::Null));
    }

    #[test]
    fn test_is_error() {
        let client = client_with_calls(4);
        let validator = client.validator();
        assert!(validator.is_error(&json!({
            "jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 4
        })));
        assert!(!validator.is_error(&json!({"jsonrpc": "2.0", "result": 19, "id": 4})));
        assert!(!validator.is_error(&json!([
            {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 4}
        ])));
    }
}

#[cfg(test)]
mod batch_responses {
    use super::*;

    #[test]
    fn test_is_batch() {
        let validator = RequestBuilder::new().validator();
        assert!(validator.is_batch(&json!([
            {"jsonrpc": "2.0", "error": {"code": -32700, "message": "Parse error"}, "id": null},
            {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 1},
            {"jsonrpc": "2.0", "result": 19, "id": 1}
        ])));
        assert!(!validator.is_batch(&json!(
            {"jsonrpc": "2.0", "error": {"code": -32700, "message": "Parse error"}, "id": null}
        )));
    }

    #[test]
    fn test_validate_batch_per_element() {
        let builder = RequestBuilder::new();
        builder.build_batch(vec![
            BatchEntry::call("sum", params(json!([1, 2, 4]))),
            BatchEntry::call("subtract", params(json!([42, 23]))),
        ]);
        let validator = builder.validator();

        let response = json!([
            {"jsonrpc": "2.0", "result": 7, "id": 1},
            {"jsonrpc": "2.0", "result": 19, "id": 2},
            {"jsonrpc": "2.0", "error": {"code": -32600, "message": "Invalid Request"}, "id": null},
            {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 5},
            "garbage",
            {"jsonrpc": "2.0", "result": 1}
        ]);

        let verdicts = validator.validate_batch(&response);
        assert_eq!(verdicts, vec![true, true, true, false, false, false]);
        assert!(!validator.validate(&response));

        let all_good = json!([
            {"jsonrpc": "2.0", "result": 7, "id": 1},
            {"jsonrpc": "2.0", "error": {"code": -32600, "message": "Invalid Request"}, "id": null}
        ]);
        assert_eq!(validator.validate_batch(&all_good), vec![true, true]);
        assert!(validator.validate(&all_good));
    }

    #[test]
    fn test_empty_batch_response_is_invalid() {
        let validator = RequestBuilder::new().validator();
        assert!(!validator.validate(&json!([])));
        assert!(validator.validate_batch(&json!([])).is_empty());
    }
}
