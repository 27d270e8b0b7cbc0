//! End-to-end tests: a wizard submitting over HTTP
//!
//! Each test serves a router on a real local listener and drives a `Wizard`
//! through `HttpSubmissionClient`, so the client's response mapping is
//! exercised against actual status codes and bodies.

mod common;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{UnavailableStore, completed_wizard, spawn};
use prestoconfig::prelude::*;
use serde_json::json;

fn client(base_url: &str) -> HttpSubmissionClient {
    HttpSubmissionClient::new(base_url, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn test_wizard_submission_is_stored() {
    let store = InMemoryConfigurationStore::new();
    let mailer = RecordingMailer::new();
    let base_url = spawn(
        ServerBuilder::new()
            .with_store(store.clone())
            .with_mailer(mailer.clone())
            .build(),
    )
    .await;

    let mut wizard = completed_wizard();
    let status = wizard.submit(&client(&base_url)).await;

    assert_eq!(status, SubmitStatus::Accepted);
    assert_eq!(
        wizard.banner(),
        Some(&Banner::Success("Configuration saved successfully".to_string()))
    );
    assert_eq!(wizard.step(), Step::default());
    assert_eq!(wizard.draft(), &ConfigurationDraft::default());

    let stored = store.snapshot().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].configuration.product, Product::Carport);
    assert!(!stored[0].configuration.service);
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_client_maps_accepted_record() {
    let base_url = spawn(ServerBuilder::new().build()).await;

    let wizard = completed_wizard();
    let outcome = client(&base_url).submit_draft(wizard.draft()).await;

    match outcome {
        SubmissionOutcome::Accepted { message, record } => {
            assert_eq!(message, "Configuration saved successfully");
            assert_eq!(record.configuration.to_draft(), *wizard.draft());
        }
        other => panic!("expected acceptance, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_maps_server_rejection() {
    let base_url = spawn(ServerBuilder::new().build()).await;

    let mut draft = completed_wizard().draft().clone();
    draft.email = Some("a@localhost".to_string());
    let outcome = client(&base_url).submit_draft(&draft).await;

    let SubmissionOutcome::Rejected { field_errors } = outcome else {
        panic!("expected rejection, got {:?}", outcome);
    };
    assert_eq!(field_errors.get("email"), Some("Invalid email format"));
    assert_eq!(field_errors.len(), 1);
}

#[tokio::test]
async fn test_rejection_relocates_wizard() {
    // A service with stricter rules than the wizard's local gate
    let app = Router::new().route(
        "/configurations",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"errors": {
                    "phone": "Phone number is not reachable",
                    "dimensions": "Dimensions (width and depth) must be positive numbers"
                }})),
            )
        }),
    );
    let base_url = spawn(app).await;

    let mut wizard = completed_wizard();
    let draft = wizard.draft().clone();
    let status = wizard.submit(&client(&base_url)).await;

    assert_eq!(status, SubmitStatus::Rejected);
    assert_eq!(wizard.step().number(), 3);
    assert_eq!(wizard.field_errors().len(), 2);
    assert!(wizard.field_errors().contains("dimensions"));
    assert_eq!(wizard.draft(), &draft);
    assert!(!wizard.submission_in_flight());
}

#[tokio::test]
async fn test_server_error_is_generic_failure() {
    let base_url = spawn(ServerBuilder::new().with_store(UnavailableStore).build()).await;

    let mut wizard = completed_wizard();
    let draft = wizard.draft().clone();
    let status = wizard.submit(&client(&base_url)).await;

    assert_eq!(status, SubmitStatus::Failed);
    assert!(wizard.step().is_review());
    assert_eq!(wizard.draft(), &draft);
    assert_eq!(
        wizard.banner(),
        Some(&Banner::Failure(GENERIC_RETRY_MESSAGE.to_string()))
    );
    assert!(!wizard.submission_in_flight());
}

#[tokio::test]
async fn test_unexpected_client_error_is_generic_failure() {
    let app = Router::new().route(
        "/configurations",
        post(|| async { (StatusCode::FORBIDDEN, "nope") }),
    );
    let base_url = spawn(app).await;

    let outcome = client(&base_url)
        .submit_draft(completed_wizard().draft())
        .await;

    assert_eq!(outcome, SubmissionOutcome::failed());
}

#[tokio::test]
async fn test_undecodable_success_body_is_generic_failure() {
    let app = Router::new().route("/configurations", post(|| async { "saved!" }));
    let base_url = spawn(app).await;

    let outcome = client(&base_url)
        .submit_draft(completed_wizard().draft())
        .await;

    assert_eq!(outcome, SubmissionOutcome::failed());
}

#[tokio::test]
async fn test_timeout_is_generic_failure() {
    let app = Router::new().route(
        "/configurations",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let base_url = spawn(app).await;
    let client = HttpSubmissionClient::new(&base_url, Duration::from_millis(200)).expect("client");

    let mut wizard = completed_wizard();
    let status = wizard.submit(&client).await;

    assert_eq!(status, SubmitStatus::Failed);
    assert!(wizard.step().is_review());
}

#[tokio::test]
async fn test_local_gate_blocks_before_network() {
    // Nothing listens here; a blocked submit never finds out
    let client = client("http://127.0.0.1:9");

    let mut wizard = completed_wizard();
    wizard.update_field("led", "").unwrap();
    let status = wizard.submit(&client).await;

    assert_eq!(status, SubmitStatus::Blocked);
    assert_eq!(wizard.step().number(), 5);
    assert_eq!(wizard.field_errors().get("led"), Some("LED option is required"));
    assert_eq!(wizard.banner(), None);
}
