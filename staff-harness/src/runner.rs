use std::{
    future::Future,
    time::{Duration, Instant},
};

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::{
    config::SuiteSettings, domain::client::StaffApi, error::HarnessError, suite::Scenario,
};

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub elapsed: Duration,
    pub error: Option<HarnessError>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
    /// Scenarios skipped because the run was cancelled.
    pub skipped: Vec<Scenario>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn is_success(&self) -> bool {
        self.skipped.is_empty() && self.outcomes.iter().all(ScenarioOutcome::passed)
    }
}

/// Runs `scenarios` one after another, calling `setup` before each so no
/// template or session is shared between them.
///
/// A failing setup fails only the scenario it was for. Cancellation is
/// honoured between scenarios.
pub async fn run_scenarios<F, Fut, A>(
    scenarios: &[Scenario],
    settings: &SuiteSettings,
    setup: F,
    cancel: &CancellationToken,
) -> SuiteReport
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<A, HarnessError>>,
    A: StaffApi,
{
    let mut report = SuiteReport::default();

    for (idx, &scenario) in scenarios.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::warn!(remaining = scenarios.len() - idx, "Run cancelled");
            report.skipped.extend_from_slice(&scenarios[idx..]);
            break;
        }

        let span = tracing::info_span!("scenario", name = %scenario);
        let started = Instant::now();

        let result = async {
            let api = setup().await?;
            scenario.run(&api, settings).await
        }
        .instrument(span)
        .await;

        let elapsed = started.elapsed();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(()) => tracing::info!(%scenario, elapsed_ms, "PASS"),
            Err(e) => tracing::error!(%scenario, elapsed_ms, error = %e, "FAIL"),
        }

        report.outcomes.push(ScenarioOutcome {
            scenario,
            elapsed,
            error: result.err(),
        });
    }

    report
}
