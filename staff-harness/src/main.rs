use std::{env, process::ExitCode};

use staff_harness::{
    config::HarnessConfig, infrastructure::client::HttpStaffClient, runner::run_scenarios,
    suite::parse_selection,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let _guard = shared::telemetry::init_telemetry("staff-harness");

    let config_path =
        env::var("STAFF_HARNESS_CONFIG").unwrap_or_else(|_| "staff-harness.toml".to_string());
    let config = match HarnessConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let selection = env::var("STAFF_SCENARIOS").unwrap_or_default();
    let scenarios = match parse_selection(&selection) {
        Ok(scenarios) => scenarios,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shared::shutdown::shutdown_signal().await;
            cancel.cancel();
        }
    });

    tracing::info!(
        base_url = %config.server.base_url,
        tenant = %config.server.tenant_identifier,
        scenarios = scenarios.len(),
        "Running staff scenarios"
    );

    let report = run_scenarios(
        &scenarios,
        &config.suite,
        || HttpStaffClient::connect(&config),
        &cancel,
    )
    .await;

    for outcome in report.failed() {
        if let Some(e) = &outcome.error {
            let cause = if e.is_contract_violation() {
                "server broke the staff contract"
            } else {
                "harness could not complete the scenario"
            };
            tracing::error!(scenario = %outcome.scenario, cause, "{e}");
        }
    }

    tracing::info!(
        passed = report.passed(),
        failed = report.failed().count(),
        skipped = report.skipped.len(),
        "Staff scenarios finished"
    );

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
