mod common;

use civic_info::gateway::ElectionSelector;
use common::{client_with, FakeTransport, Reply};
use jsonschema::JSONSchema;
use serde_json::{json, Value};

fn schema_json() -> Value {
    serde_json::from_str(include_str!("../schemas/envelope.v1.json")).unwrap()
}

fn compile(schema: Value) -> JSONSchema {
    let schema_static: &'static Value = Box::leak(Box::new(schema));
    JSONSchema::options().compile(schema_static).unwrap()
}

/// The envelope schema narrowed to one success payload definition.
fn payload_schema(definition: &str) -> JSONSchema {
    let full = schema_json();
    compile(json!({
        "$ref": format!("#/definitions/{}", definition),
        "definitions": full["definitions"].clone()
    }))
}

#[tokio::test]
async fn polling_envelope_is_valid() {
    let (client, _) = client_with(FakeTransport::new().reply(
        "voterinfo",
        Reply::Json(json!({
            "election": {"id": "9001"},
            "pollingLocations": [{"address": {"line1": "5 Oak Ave"}}],
            "earlyVoteSites": [{}]
        })),
    ));
    let envelope = client
        .fetch_polling_locations("5 Oak Ave", ElectionSelector::Id("9001".into()))
        .await;
    let instance = serde_json::to_value(&envelope).unwrap();

    assert!(compile(schema_json()).is_valid(&instance));
    assert!(payload_schema("pollingLocations").is_valid(&instance));
}

#[tokio::test]
async fn representatives_envelope_is_valid() {
    let (client, _) = client_with(FakeTransport::new().reply(
        "representatives",
        Reply::Json(json!({
            "offices": [{"name": "Governor", "officialIndices": [0]}],
            "officials": [{"name": "G", "phones": ["1"], "address": [{"city": "Raleigh"}]}]
        })),
    ));
    let instance = serde_json::to_value(client.fetch_representatives("x").await).unwrap();

    assert!(compile(schema_json()).is_valid(&instance));
    assert!(payload_schema("representatives").is_valid(&instance));
}

#[tokio::test]
async fn elections_envelope_is_valid() {
    let (client, _) = client_with(FakeTransport::new().reply(
        "elections",
        Reply::Json(json!({"elections": [{"name": "No id yet"}, {"id": "2000", "name": "Test"}]})),
    ));
    let instance = serde_json::to_value(client.fetch_elections().await).unwrap();

    assert!(payload_schema("elections").is_valid(&instance));
}

#[tokio::test]
async fn failure_envelope_is_valid_and_closed() {
    let (client, _) = client_with(FakeTransport::new());
    let instance = serde_json::to_value(client.fetch_elections().await).unwrap();
    let schema = compile(schema_json());

    assert!(schema.is_valid(&instance));

    let mut widened = instance.clone();
    widened["elections"] = json!([]);
    assert!(!schema.is_valid(&widened), "failures carry no payload");
}

#[test]
fn success_flag_is_required() {
    let schema = compile(schema_json());
    assert!(!schema.is_valid(&json!({"elections": []})));
    assert!(!schema.is_valid(&json!({"error": "x", "success": true})));
}
