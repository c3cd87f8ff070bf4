use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use harvester_core::api::{
    AppEvent, EventBus, HttpConfig, ProcessStatus, ProcessWatch, ProcessesRest, RestContext,
    TasksRest, TriggerDefinition, TriggersRest,
};
use mockito::Server;

fn ctx(server: &Server) -> RestContext {
    RestContext::new(&server.url(), &HttpConfig::default()).unwrap()
}

const TASK_ID: &str = "da4b6b0e-8b2b-41a7-902e-cd01a7a62163";
const TRIGGER_A: &str = "11111111-1111-4111-8111-111111111111";
const TRIGGER_B: &str = "22222222-2222-4222-8222-222222222222";

fn triggers_body() -> String {
    format!(
        r#"[
            {{"uuid": "{TRIGGER_A}", "triggerDefinition": {{"type": "PERIOD", "properties": {{"t-period": "P1W"}}}}}},
            {{"uuid": "{TRIGGER_B}", "triggerDefinition": {{"type": "AT", "properties": {{"t-at-time": "02:00"}}}}}}
        ]"#
    )
}

#[tokio::test]
async fn replace_schedule_deletes_all_triggers_before_creating() {
    let mut server = Server::new_async().await;
    let deleted = Arc::new(AtomicUsize::new(0));

    let _list = server
        .mock("GET", format!("/tasks/{TASK_ID}/triggers").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(triggers_body())
        .create_async()
        .await;

    let mut delete_mocks = Vec::new();
    for id in [TRIGGER_A, TRIGGER_B] {
        let counter = Arc::clone(&deleted);
        let mock = server
            .mock("DELETE", format!("/triggers/{id}").as_str())
            .with_status(200)
            .with_body_from_request(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Vec::new()
            })
            .expect(1)
            .create_async()
            .await;
        delete_mocks.push(mock);
    }

    // The create response only materializes once both deletions settled;
    // an early create would fail JSON decoding and the test with it.
    let counter = Arc::clone(&deleted);
    let create = server
        .mock("PUT", format!("/tasks/{TASK_ID}/schedule").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            if counter.load(Ordering::SeqCst) == 2 {
                format!(
                    r#"{{"uuid": "{TRIGGER_A}", "triggerDefinition": {{"type": "PERIOD", "properties": {{"t-period": "P1D"}}}}}}"#
                )
                .into_bytes()
            } else {
                Vec::new()
            }
        })
        .expect(1)
        .create_async()
        .await;

    let context = ctx(&server);
    let tasks = TasksRest::new(context.clone());
    let triggers = TriggersRest::new(context);
    let bus = EventBus::new();
    let mut rx = bus.subscribe();

    let definition = TriggerDefinition::periodic("P1D");
    let created = harvester_core::api::replace_schedule(
        &tasks,
        &triggers,
        &bus,
        TASK_ID.parse().unwrap(),
        Some(&definition),
    )
    .await
    .unwrap();

    assert_eq!(
        created.unwrap().trigger_definition.period(),
        Some("P1D")
    );
    for mock in delete_mocks {
        mock.assert_async().await;
    }
    create.assert_async().await;
    assert!(matches!(
        rx.try_recv(),
        Ok(AppEvent::TriggersChanged { .. })
    ));
}

#[tokio::test]
async fn replace_schedule_stops_on_failed_deletion() {
    let mut server = Server::new_async().await;

    let _list = server
        .mock("GET", format!("/tasks/{TASK_ID}/triggers").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(triggers_body())
        .create_async()
        .await;
    let _ok = server
        .mock("DELETE", format!("/triggers/{TRIGGER_A}").as_str())
        .with_status(200)
        .create_async()
        .await;
    let _broken = server
        .mock("DELETE", format!("/triggers/{TRIGGER_B}").as_str())
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;
    let create = server
        .mock("PUT", format!("/tasks/{TASK_ID}/schedule").as_str())
        .expect(0)
        .create_async()
        .await;

    let context = ctx(&server);
    let tasks = TasksRest::new(context.clone());
    let triggers = TriggersRest::new(context);
    let bus = EventBus::new();

    let definition = TriggerDefinition::periodic("P1D");
    let result = harvester_core::api::replace_schedule(
        &tasks,
        &triggers,
        &bus,
        TASK_ID.parse().unwrap(),
        Some(&definition),
    )
    .await;

    assert!(result.is_err());
    create.assert_async().await;
}

#[tokio::test]
async fn replace_schedule_with_null_only_clears() {
    let mut server = Server::new_async().await;

    let _list = server
        .mock("GET", format!("/tasks/{TASK_ID}/triggers").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    let create = server
        .mock("PUT", format!("/tasks/{TASK_ID}/schedule").as_str())
        .expect(0)
        .create_async()
        .await;

    let context = ctx(&server);
    let tasks = TasksRest::new(context.clone());
    let triggers = TriggersRest::new(context);
    let bus = EventBus::new();

    let definition = TriggerDefinition {
        kind: "NULL".into(),
        ..Default::default()
    };
    let created = harvester_core::api::replace_schedule(
        &tasks,
        &triggers,
        &bus,
        TASK_ID.parse().unwrap(),
        Some(&definition),
    )
    .await
    .unwrap();

    assert!(created.is_none());
    create.assert_async().await;
}

const PROCESS_ID: &str = "7cb4b9e9-38d9-4b9a-a68b-64ea02bd7b62";

#[tokio::test]
async fn watch_polls_until_completed() {
    let mut server = Server::new_async().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mock = server
        .mock("GET", format!("/processes/{PROCESS_ID}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            let status = if call == 0 { "working" } else { "completed" };
            format!(
                r#"{{"uuid": "{PROCESS_ID}", "status": "{status}",
                     "statistics": {{"acquired": 10, "succeeded": 9}}}}"#
            )
            .into_bytes()
        })
        .expect(2)
        .create_async()
        .await;

    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let processes = ProcessesRest::new(ctx(&server));
    let handle = ProcessWatch::spawn(processes, bus, PROCESS_ID.parse().unwrap());

    let finished = handle.join().await.expect("watch should end terminally");
    assert_eq!(finished.status, ProcessStatus::Completed);
    assert_eq!(finished.statistics.unwrap().failed(), 1);
    mock.assert_async().await;

    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::ProcessChanged(info) = event {
            seen.push(info.status);
        }
    }
    assert_eq!(seen, vec![ProcessStatus::Working, ProcessStatus::Completed]);
}

#[tokio::test]
async fn watch_reports_fetch_failure_and_stops() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/processes/{PROCESS_ID}").as_str())
        .with_status(404)
        .with_body("no such process")
        .expect(1)
        .create_async()
        .await;

    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let processes = ProcessesRest::new(ctx(&server));
    let handle = ProcessWatch::spawn(processes, bus, PROCESS_ID.parse().unwrap());

    assert!(handle.join().await.is_none());
    mock.assert_async().await;

    match rx.try_recv() {
        Ok(AppEvent::Status(msg)) => assert!(msg.text.contains("failed to poll")),
        other => panic!("expected error status, got {other:?}"),
    }
}
