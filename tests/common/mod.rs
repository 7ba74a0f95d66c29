//! Shared helpers for integration tests

#![allow(dead_code)]

use repository_client::Repository;
use serde_json::{Value, json};
use wiremock::MockServer;

/// A fresh, unauthenticated client pointed at the mock server.
pub fn client(server: &MockServer) -> Repository {
    init_tracing();
    Repository::new(server.uri()).unwrap()
}

/// Route client logs through the test harness when `RUST_LOG` is set.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client with a session token already in place, skipping the handshake.
pub fn connected(server: &MockServer) -> Repository {
    let repo = client(server);
    repo.set_token("test-token");
    repo
}

/// A service fault body in the documented envelope.
pub fn fault(code: &str, message: &str) -> Value {
    json!({ "fault": { "code": code, "message": message } })
}
