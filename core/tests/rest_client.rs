use harvester_core::api::{
    BrokersRest, ClientError, EntityDefinition, HttpConfig, ProcessStatus, ProcessesRest,
    RestContext, TasksRest,
};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;

fn ctx(server: &Server) -> RestContext {
    RestContext::new(&server.url(), &HttpConfig::default()).unwrap()
}

#[tokio::test]
async fn brokers_list_decodes_wire_shape() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/brokers")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{
                "uuid": "0a0e5fcd-9e25-4bdf-94c6-80ae605c0ece",
                "category": "INBOUND",
                "brokerDefinition": {
                    "type": "CSW",
                    "label": "State catalog",
                    "properties": {"csw-url": "http://example.com/csw"}
                }
            }]"#,
        )
        .create_async()
        .await;

    let brokers = BrokersRest::new(ctx(&server)).list().await.unwrap();
    assert_eq!(brokers.len(), 1);
    assert_eq!(brokers[0].broker_definition.kind, "CSW");
    assert_eq!(brokers[0].broker_definition.display_label(), "State catalog");
}

#[tokio::test]
async fn broker_create_puts_definition() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/brokers")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "type": "WAF",
            "label": "Crawl target"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "uuid": "53f5f3b2-5061-4fff-9f81-a3a64622c935",
                "brokerDefinition": {"type": "WAF", "label": "Crawl target", "properties": {}}
            }"#,
        )
        .create_async()
        .await;

    let definition = EntityDefinition {
        kind: "WAF".into(),
        label: Some("Crawl target".into()),
        ..Default::default()
    };
    let created = BrokersRest::new(ctx(&server))
        .create(&definition)
        .await
        .unwrap();
    assert_eq!(
        created.uuid.to_string(),
        "53f5f3b2-5061-4fff-9f81-a3a64622c935"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_maps_to_status_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/processes")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let err = ProcessesRest::new(ctx(&server)).list().await.unwrap_err();
    match err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn execute_uses_put_and_returns_process() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/tasks/da4b6b0e-8b2b-41a7-902e-cd01a7a62163/execute")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"uuid": "7cb4b9e9-38d9-4b9a-a68b-64ea02bd7b62", "status": "submitted"}"#,
        )
        .create_async()
        .await;

    let process = TasksRest::new(ctx(&server))
        .execute("da4b6b0e-8b2b-41a7-902e-cd01a7a62163".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(process.status, ProcessStatus::Submitted);
    mock.assert_async().await;
}

#[tokio::test]
async fn task_list_labels_recursive_destinations() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/tasks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{
                "uuid": "da4b6b0e-8b2b-41a7-902e-cd01a7a62163",
                "taskDefinition": {
                    "source": {"type": "CSW", "label": "A", "properties": {}},
                    "destinations": [
                        {"action": {"type": "GPT", "label": "B", "properties": {}}},
                        {"drains": [{"action": {"type": "SINK", "label": "C", "properties": {}}}]}
                    ]
                }
            }]"#,
        )
        .create_async()
        .await;

    let tasks = TasksRest::new(ctx(&server)).list().await.unwrap();
    assert_eq!(tasks[0].task_definition.label(), "A -> [B, C]");
}

#[tokio::test]
async fn export_returns_raw_document() {
    let mut server = Server::new_async().await;
    let raw = r#"{"source":{"type":"CSW"},"destinations":[]}"#;
    let _m = server
        .mock("GET", "/tasks/da4b6b0e-8b2b-41a7-902e-cd01a7a62163/export")
        .with_status(200)
        .with_body(raw)
        .create_async()
        .await;

    let exported = TasksRest::new(ctx(&server))
        .export("da4b6b0e-8b2b-41a7-902e-cd01a7a62163".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(exported, raw);
}

#[tokio::test]
async fn delete_tolerates_empty_response_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/brokers/0a0e5fcd-9e25-4bdf-94c6-80ae605c0ece")
        .with_status(200)
        .create_async()
        .await;

    BrokersRest::new(ctx(&server))
        .delete("0a0e5fcd-9e25-4bdf-94c6-80ae605c0ece".parse().unwrap())
        .await
        .unwrap();
    mock.assert_async().await;
}
