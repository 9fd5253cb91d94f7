use shared::types::StaffRecord;

use super::{ensure, get_staff};
use crate::{
    config::SuiteSettings,
    domain::{client::StaffApi, expectation::ResponseExpectation},
    error::HarnessError,
};

/// Largest identifier the platform's 32-bit clients can address.
pub const UNKNOWN_STAFF_ID: i64 = i32::MAX as i64;

#[tracing::instrument(skip_all, fields(id = settings.known_staff_id))]
pub async fn fetch_by_id(
    api: &dyn StaffApi,
    settings: &SuiteSettings,
) -> Result<(), HarnessError> {
    let id = settings.known_staff_id;
    let record: StaffRecord = get_staff(api, ResponseExpectation::Success, id)
        .await?
        .json()?;

    ensure(record.id == id, || format!("id: expected {id}, got {}", record.id))
}

#[tracing::instrument(skip_all)]
pub async fn fetch_unknown_id(api: &dyn StaffApi) -> Result<(), HarnessError> {
    get_staff(api, ResponseExpectation::NotFound, UNKNOWN_STAFF_ID).await?;
    Ok(())
}
