//! ConfigKit Rust SDK Lab
//!
//! Internal verification script for SDK functionality.
//! Run with: cargo run --example sdk-lab

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use configkit::{ConfigClient, Configuration, FetchResponse, RemoteSource, Result};

const PASS: &str = "\x1b[32m[PASS]\x1b[0m";
const FAIL: &str = "\x1b[31m[FAIL]\x1b[0m";

/// Stands in for the remote servers so the lab runs offline.
struct LabSource;

#[async_trait]
impl RemoteSource for LabSource {
    async fn fetch_values(&self, _known_keys: &[String]) -> Result<FetchResponse> {
        let mut values = HashMap::new();
        values.insert("buttonColor".to_string(), "red".to_string());
        Ok(FetchResponse::new(values))
    }
}

#[tokio::main]
async fn main() {
    println!("=== ConfigKit Rust SDK Lab ===\n");

    let mut passed = 0;
    let mut failed = 0;

    macro_rules! check {
        ($test:expr, $ok:expr) => {{
            if $ok {
                println!("{} {}", PASS, $test);
                passed += 1;
            } else {
                println!("{} {}", FAIL, $test);
                failed += 1;
            }
        }};
    }

    let mut defaults = HashMap::new();
    defaults.insert("buttonColor".to_string(), "blue".to_string());

    let configuration = Configuration::builder()
        .app_id("25732")
        .sdk_token("430BBA69FBBC434AA6C1529F1E160EAD")
        .defaults(defaults)
        .show_logs(true)
        .build()
        .expect("configuration should validate");

    let client = ConfigClient::with_source(configuration, Arc::new(LabSource))
        .expect("client should construct");

    check!(
        "default answers before any fetch",
        client.get_value("buttonColor").as_deref() == Some("blue")
    );
    check!("absent key returns None", client.get_value("missing").is_none());

    let outcome = client.fetch().await;
    check!("fetch reports success", outcome.is_success());
    check!(
        "remote value wins after fetch",
        client.get_value("buttonColor").as_deref() == Some("red")
    );
    check!(
        "fetch duration recorded",
        client.last_fetch_duration().is_some()
    );

    check!(
        "rejects empty sdk token",
        Configuration::builder().app_id("1").build().is_err()
    );

    println!("\n{} passed, {} failed", passed, failed);
    if failed > 0 {
        std::process::exit(1);
    }
}
