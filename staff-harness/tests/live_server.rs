//! Runs each staff scenario against a real server.
//!
//! Build with `--features live-server`. The target comes from the usual
//! harness config (`STAFF_HARNESS_CONFIG`, `STAFF_API_URL`, ...). Creation
//! scenarios leave their records on the server.

use staff_harness::{
    config::HarnessConfig, error::HarnessError, infrastructure::client::HttpStaffClient,
    suite::Scenario,
};

async fn run(scenario: Scenario) -> Result<(), HarnessError> {
    let _guard = shared::telemetry::init_telemetry("staff-harness-live");

    let path = std::env::var("STAFF_HARNESS_CONFIG")
        .unwrap_or_else(|_| "staff-harness.toml".to_string());
    let config = HarnessConfig::load(&path)?;
    let api = HttpStaffClient::connect(&config).await?;
    scenario.run(&api, &config.suite).await
}

#[tokio::test]
async fn staff_create() {
    run(Scenario::CreateValid).await.unwrap();
}

#[tokio::test]
async fn staff_create_validation_error() {
    run(Scenario::CreateInvalidMissingField).await.unwrap();
    run(Scenario::CreateInvalidFieldLength).await.unwrap();
}

#[tokio::test]
async fn staff_create_max_name_length() {
    run(Scenario::CreateMaxNameLength).await.unwrap();
}

#[tokio::test]
async fn staff_fetch() {
    run(Scenario::FetchById).await.unwrap();
}

#[tokio::test]
async fn staff_fetch_not_found() {
    run(Scenario::FetchUnknownId).await.unwrap();
}

#[tokio::test]
async fn staff_list_fetch() {
    run(Scenario::ListAll).await.unwrap();
}

#[tokio::test]
async fn staff_list_status_all() {
    run(Scenario::ListStatusAll).await.unwrap();
}

#[tokio::test]
async fn staff_list_status_active() {
    run(Scenario::ListActive).await.unwrap();
}

#[tokio::test]
async fn staff_list_status_inactive() {
    run(Scenario::ListInactive).await.unwrap();
}

#[tokio::test]
async fn staff_list_fetch_wrong_state() {
    run(Scenario::ListInvalidState).await.unwrap();
}
