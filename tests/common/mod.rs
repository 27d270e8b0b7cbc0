//! Shared fixtures for the integration tests

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use prestoconfig::prelude::*;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// A complete, valid submission body
pub fn scenario_draft() -> Value {
    json!({
        "product": "carport",
        "installationType": "attached",
        "dimensions": {"width": "300", "depth": "400"},
        "color": "black",
        "led": "no",
        "service": false,
        "branch": "dhaka",
        "name": "A",
        "email": "a@example.com",
        "phone": "123"
    })
}

/// The scenario draft with one field replaced (or removed with `Value::Null`)
pub fn draft_with(field: &str, value: Value) -> Value {
    let mut draft = scenario_draft();
    draft[field] = value;
    draft
}

/// In-process test server over a fresh store
pub fn test_server(mailer: RecordingMailer) -> (TestServer, InMemoryConfigurationStore) {
    let store = InMemoryConfigurationStore::new();
    let app = ServerBuilder::new()
        .with_store(store.clone())
        .with_mailer(mailer)
        .build();

    let server = TestServer::try_new(app).expect("Failed to create test server");
    (server, store)
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}", addr)
}

/// Store whose every operation fails
#[derive(Clone, Copy, Default)]
pub struct UnavailableStore;

#[async_trait]
impl ConfigurationStore for UnavailableStore {
    async fn insert(&self, _configuration: Configuration) -> Result<StoredConfiguration> {
        anyhow::bail!("database connection refused")
    }

    async fn page(&self, _offset: usize, _limit: usize) -> Result<Vec<StoredConfiguration>> {
        anyhow::bail!("database connection refused")
    }

    async fn count(&self) -> Result<usize> {
        anyhow::bail!("database connection refused")
    }
}

/// Fill every wizard field with the scenario values and walk to review
pub fn completed_wizard() -> Wizard {
    let mut wizard = Wizard::new();
    let answers: [(&str, FieldValue); 11] = [
        ("product", "carport".into()),
        ("installationType", "attached".into()),
        ("dimensions.width", "300".into()),
        ("dimensions.depth", "400".into()),
        ("color", "black".into()),
        ("led", "no".into()),
        ("service", false.into()),
        ("branch", "dhaka".into()),
        ("name", "A".into()),
        ("email", "a@example.com".into()),
        ("phone", "123".into()),
    ];
    for (name, value) in answers {
        wizard.update_field(name, value).expect("known field");
    }
    while !wizard.step().is_review() {
        assert!(wizard.advance(), "blocked at {}", wizard.step());
    }
    wizard
}
