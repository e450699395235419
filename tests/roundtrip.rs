//! Client -> server -> client round trips
//!
//! Envelopes built by the client are encoded to text, dispatched by the server
//! and the response text is validated by the same client.

use plexrpc_client::prelude::*;
use plexrpc_server::{AsyncMethodRegistry, AsyncRequestDispatcher, CallArgs, HandlerError, MethodRegistry, RequestDispatcher};
use serde_json::{Value, json};

fn server() -> RequestDispatcher {
    let _ = tracing_subscriber::fmt::try_init();
    let mut registry = MethodRegistry::new();
    registry.register("subtract", &["subtrahend", "minuend"], |args: CallArgs| {
        Ok(json!(args.i64_at(0)? - args.i64_at(1)?))
    });
    registry.register_variadic("sum", |args: CallArgs| {
        let mut total = 0.0;
        for index in 0..args.len() {
            total += args.f64_at(index)?;
        }
        Ok(json!(total))
    });
    registry.register("divide", &["dividend", "divisor"], |args: CallArgs| {
        let divisor = args.i64_at(1)?;
        if divisor == 0 {
            return Err(HandlerError::server(-32001, "division by zero"));
        }
        Ok(json!(args.i64_at(0)? / divisor))
    });
    registry.register("crash", &[], |_args: CallArgs| Err(HandlerError::internal("unexpected state")));
    registry.register("update", &[], |_args: CallArgs| Ok(Value::Null));
    RequestDispatcher::new(registry)
}

fn params(value: Value) -> Option<RequestParams> {
    RequestParams::from_value(&value)
}

#[test]
fn test_single_call_roundtrip() {
    let client = JsonRpcClient::default();
    let server = server();

    let request = client.call("subtract", params(json!({"minuend": 23, "subtrahend": 42})));
    let text = client.encode(&request.into()).unwrap();
    let reply = server.respond(&text).unwrap().unwrap();

    assert_eq!(client.decode_result(&reply).unwrap(), json!(19));
}

#[test]
fn test_notification_roundtrip_sends_nothing() {
    let client = JsonRpcClient::default();
    let server = server();

    let text = client.encode(&client.notify("update", params(json!([1, 2]))).into()).unwrap();
    assert_eq!(server.respond(&text).unwrap(), None);
}

#[test]
fn test_server_errors_validate_on_client() {
    let client = JsonRpcClient::default();
    let server = server();

    let text = client.encode(&client.call("divide", params(json!([1, 0]))).into()).unwrap();
    let err = client.decode_result(&server.respond(&text).unwrap().unwrap()).unwrap_err();
    assert_eq!(err.error_code(), Some(-32001));

    let text = client.encode(&client.call("nope", None).into()).unwrap();
    let err = client.decode_result(&server.respond(&text).unwrap().unwrap()).unwrap_err();
    assert_eq!(err.error_code(), Some(-32601));

    // internal failures lose the id, which is still a valid response
    let text = client.encode(&client.call("crash", None).into()).unwrap();
    let reply = server.respond(&text).unwrap().unwrap();
    let document: Value = serde_json::from_str(&reply).unwrap();
    assert!(client.validator().validate(&document));
    assert!(client.validator().is_error(&document));
    assert_eq!(document["id"], Value::Null);
}

#[test]
fn test_batch_roundtrip() {
    let client = JsonRpcClient::default();
    let server = server();

    let batch = client.batch(vec![
        BatchEntry::call("sum", params(json!([1, 2, 4]))),
        BatchEntry::notification("update", None),
        BatchEntry::call("subtract", params(json!([42, 23]))),
        BatchEntry::call("subtract", params(json!({"subtrahend": 1}))),
    ]);
    let text = client.encode_batch(&batch).unwrap();
    let reply = server.respond(&text).unwrap().unwrap();

    let response = client.decode(&reply).unwrap();
    let messages = response.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].result(), Some(&json!(7.0)));
    assert_eq!(messages[0].id(), &RequestId::from(1u64));
    assert_eq!(messages[1].result(), Some(&json!(19)));
    assert_eq!(messages[2].error_code(), Some(-32600));
    assert!(messages[2].id().is_null());

    let document: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(client.validator().validate_batch(&document), vec![true, true, true]);
}

#[test]
fn test_responses_from_other_clients_are_implausible() {
    let first = JsonRpcClient::default();
    let second = JsonRpcClient::default();
    let server = server();

    first.call("subtract", None);
    let text = first.encode(&first.call("subtract", params(json!([2, 1]))).into()).unwrap();
    let reply = server.respond(&text).unwrap().unwrap();

    assert!(first.decode(&reply).is_ok());
    assert!(matches!(
        second.decode(&reply),
        Err(ClientError::InvalidResponse(ResponseViolation::IdOutOfRange { id: 2, issued: 0 }))
    ));
}

#[tokio::test]
async fn test_async_server_roundtrip() {
    let mut registry = AsyncMethodRegistry::new();
    registry.register_async("subtract", &["subtrahend", "minuend"], |args: CallArgs| async move {
        Ok(json!(args.i64_at(0)? - args.i64_at(1)?))
    });
    let server = AsyncRequestDispatcher::new(registry);
    let client = JsonRpcClient::default();

    let batch = client.batch(vec![
        BatchEntry::call("subtract", params(json!([10, 3]))),
        BatchEntry::call("subtract", params(json!({"minuend": 3, "subtrahend": 10}))),
    ]);
    let reply = server
        .respond(&client.encode_batch(&batch).unwrap())
        .await
        .unwrap()
        .unwrap();

    let values: Vec<Value> = client
        .decode(&reply)
        .unwrap()
        .into_messages()
        .into_iter()
        .map(|message| into_result(message).unwrap())
        .collect();
    assert_eq!(values, vec![json!(7), json!(7)]);
}

#[test]
fn test_async_server_notification_blocking() {
    let mut registry = AsyncMethodRegistry::new();
    registry.register_variadic_async("update", |_args: CallArgs| async move { Ok(Value::Null) });
    let server = AsyncRequestDispatcher::new(registry);
    let client = JsonRpcClient::default();

    let text = client.encode(&client.notify("update", params(json!([1, 2, 3]))).into()).unwrap();
    assert_eq!(tokio_test::block_on(server.respond(&text)).unwrap(), None);

    let text = client.encode(&client.call("update", None).into()).unwrap();
    let reply = tokio_test::block_on(server.respond(&text)).unwrap().unwrap();
    assert_eq!(client.decode_result(&reply).unwrap(), Value::Null);
}
