//! Canonical JSON output of the event envelope.

use serde_json::{json, Map, Value};
use stripe_events::{Event, EventData, EventRequest};

fn attributes(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object")
}

#[test]
fn empty_event_writes_every_required_field() {
    let data = Event::default().to_json().unwrap();
    assert_eq!(
        data,
        r#"{"api_version":"","created":0,"data":null,"id":"","livemode":false,"object":"","pending_webhooks":0,"request":null,"type":""}"#
    );
}

#[test]
fn empty_previous_attributes_are_omitted() {
    let event = Event {
        account: Some(String::new()),
        data: Some(EventData::default().with_previous_attributes(Map::new())),
        ..Default::default()
    };
    assert_eq!(
        event.to_json().unwrap(),
        r#"{"api_version":"","created":0,"data":{"object":null},"id":"","livemode":false,"object":"","pending_webhooks":0,"request":null,"type":""}"#
    );
}

#[test]
fn zero_valued_previous_attribute_is_kept() {
    let event = Event {
        account: Some(String::new()),
        data: Some(
            EventData::default().with_previous_attributes(attributes(json!({ "amount_paid": 0 }))),
        ),
        ..Default::default()
    };
    assert_eq!(
        event.to_json().unwrap(),
        r#"{"api_version":"","created":0,"data":{"previous_attributes":{"amount_paid":0},"object":null},"id":"","livemode":false,"object":"","pending_webhooks":0,"request":null,"type":""}"#
    );
}

#[test]
fn unset_previous_attributes_are_omitted() {
    let event = Event {
        data: Some(EventData::new(json!({ "id": "in_1" }))),
        ..Default::default()
    };
    let out = event.to_json().unwrap();
    assert!(out.contains(r#""data":{"object":{"id":"in_1"}}"#), "{out}");
}

#[test]
fn populated_event() {
    let event = Event {
        account: Some("acct_123".into()),
        api_version: "2024-06-20".into(),
        created: 1_700_000_000,
        data: Some(EventData::new(json!({ "id": "ch_1", "amount": 500 }))),
        id: "evt_1".into(),
        livemode: true,
        object: "event".into(),
        pending_webhooks: 2,
        request: Some(EventRequest {
            id: "req_1".into(),
            idempotency_key: "key-1".into(),
        }),
        event_type: "charge.succeeded".into(),
    };
    assert_eq!(
        event.to_json().unwrap(),
        r#"{"account":"acct_123","api_version":"2024-06-20","created":1700000000,"data":{"object":{"amount":500,"id":"ch_1"}},"id":"evt_1","livemode":true,"object":"event","pending_webhooks":2,"request":{"id":"req_1","idempotency_key":"key-1"},"type":"charge.succeeded"}"#
    );
}

#[test]
fn decodes_and_reencodes() {
    let payload = r#"{
        "id": "evt_2",
        "object": "event",
        "api_version": "2024-06-20",
        "created": 1700000000,
        "livemode": false,
        "pending_webhooks": 1,
        "type": "invoice.updated",
        "request": { "id": null, "idempotency_key": null },
        "data": {
            "object": { "id": "in_1", "amount_paid": 1000 },
            "previous_attributes": { "amount_paid": 0 }
        }
    }"#;

    let event = Event::from_json(payload).unwrap();
    assert_eq!(event.event_type, "invoice.updated");
    assert_eq!(event.get_object_value(["amount_paid"]), "1000");
    assert_eq!(event.get_previous_value(["amount_paid"]), "0");
    assert_eq!(event.request, Some(EventRequest::default()));
    assert!(event.account.is_none());

    let again = Event::from_json(&event.to_json().unwrap()).unwrap();
    assert_eq!(again, event);
}

#[test]
fn legacy_string_request_is_an_id() {
    let event = Event::from_json(r#"{"request": "req_legacy"}"#).unwrap();
    assert_eq!(
        event.request,
        Some(EventRequest {
            id: "req_legacy".into(),
            idempotency_key: String::new(),
        })
    );
}

#[test]
fn missing_fields_take_zero_values() {
    let event = Event::from_json("{}").unwrap();
    assert_eq!(event, Event::default());
    assert!(event.data.is_none());
    assert!(event.request.is_none());
}

#[test]
fn created_at_converts_unix_seconds() {
    let event = Event {
        created: 1_700_000_000,
        ..Default::default()
    };
    assert_eq!(
        event.created_at().map(|t| t.to_rfc3339()),
        Some("2023-11-14T22:13:20+00:00".to_string())
    );
}

#[test]
fn null_required_fields_take_zero_values() {
    let event = Event::from_json(
        r#"{"api_version":null,"created":null,"id":null,"livemode":null,"object":null,"pending_webhooks":null,"type":null,"request":null,"data":null}"#,
    )
    .unwrap();
    assert_eq!(event.api_version, "");
    assert_eq!(event, Event::default());
}

#[test]
fn null_api_version_passes_through_construct_event() {
    let event = stripe_events::construct_event(
        r#"{"id":"evt_3","api_version":null,"type":"account.updated"}"#,
        &stripe_events::EventConfig::default(),
    )
    .unwrap();
    assert_eq!(event.api_version, "");
    assert_eq!(event.id, "evt_3");
}

#[test]
fn empty_account_decodes_as_unset() {
    let event = Event::from_json(r#"{"account":""}"#).unwrap();
    assert!(event.account.is_none());

    let again = Event::from_json(&event.to_json().unwrap()).unwrap();
    assert_eq!(again, event);
}

#[test]
fn request_of_the_wrong_type_names_the_expected_shapes() {
    let err = Event::from_json(r#"{"request":5}"#).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("a request id string or an object"), "{msg}");
}

#[test]
fn request_ignores_unknown_keys() {
    let event = Event::from_json(r#"{"request":{"id":"req_9","url":"/v1/charges"}}"#).unwrap();
    assert_eq!(
        event.request,
        Some(EventRequest {
            id: "req_9".into(),
            idempotency_key: String::new(),
        })
    );
}
