//! Reconciliation through the HTTP adapter against a mock provider

use std::time::Duration;

use serde_json::json;
use vpcsync_core::{
    deploy, remove, Context, DesiredSpec, MemoryStateStore, SubnetState, TracingLog,
};
use vpcsync_provider::{ClientConfig, SubnetClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SubnetClient {
    SubnetClient::new(ClientConfig {
        endpoint: server.uri(),
        region: "us-east-1".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn subnet(id: &str, zone: &str) -> serde_json::Value {
    json!({
        "subnet": {
            "subnet_id": id,
            "vpc_id": "vpc-abbaabba",
            "availability_zone": zone,
            "state": "available",
        }
    })
}

#[tokio::test]
async fn test_replace_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/subnets/subnet-abbaabba"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/subnets"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(subnet("subnet-baabbaab", "us-east-1b")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prior = SubnetState::created(
        "subnet-abbaabba",
        &DesiredSpec::new("vpc-abbaabba", "us-east-1a"),
    );
    let store = MemoryStateStore::with_state(prior.clone());
    let ctx = Context::load(&store, &TracingLog).unwrap();
    let desired = DesiredSpec::new("vpc-abbaabba", "us-east-1b");

    let deployed = deploy(&client, &desired, &ctx).await.unwrap();

    assert_eq!(deployed.subnet_id, "subnet-baabbaab");
    assert_eq!(
        store.saves(),
        vec![
            prior.without_subnet(),
            SubnetState::created("subnet-baabbaab", &desired),
        ]
    );
}

#[tokio::test]
async fn test_remove_of_vanished_subnet_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/subnets/subnet-not-abba"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "InvalidSubnetID.NotFound",
            "message": "The subnet ID 'subnet-not-abba' does not exist",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let store = MemoryStateStore::with_state(SubnetState {
        subnet_id: Some("subnet-not-abba".to_string()),
        ..Default::default()
    });
    let ctx = Context::load(&store, &TracingLog).unwrap();

    remove(&client, &DesiredSpec::default(), &ctx).await.unwrap();

    assert_eq!(store.saves(), vec![SubnetState::default()]);
}

#[tokio::test]
async fn test_remove_failure_over_http_keeps_state() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "UnauthorizedOperation",
            "message": "You are not authorized to perform this operation.",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let store = MemoryStateStore::with_state(SubnetState {
        subnet_id: Some("subnet-abbaabba".to_string()),
        ..Default::default()
    });
    let ctx = Context::load(&store, &TracingLog).unwrap();

    let err = remove(&client, &DesiredSpec::default(), &ctx).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "You are not authorized to perform this operation."
    );
    assert!(store.saves().is_empty());
    assert_eq!(store.current().subnet_id.as_deref(), Some("subnet-abbaabba"));
}

#[tokio::test]
async fn test_remove_through_wrong_prefix_keeps_state() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SubnetClient::new(ClientConfig {
        endpoint: format!("{}/wrong-prefix", server.uri()),
        region: "us-east-1".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    let prior = SubnetState::created(
        "subnet-abbaabba",
        &DesiredSpec::new("vpc-abbaabba", "us-east-1a"),
    );
    let store = MemoryStateStore::with_state(prior.clone());
    let ctx = Context::load(&store, &TracingLog).unwrap();

    let err = remove(&client, &DesiredSpec::new("vpc-abbaabba", "us-east-1a"), &ctx)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "404 page not found");
    assert!(!err.as_provider().is_some_and(|e| e.is_not_found()));
    assert!(store.saves().is_empty());
    assert_eq!(store.current(), prior);
}
