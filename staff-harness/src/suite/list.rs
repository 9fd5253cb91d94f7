use shared::types::{StaffRecord, StaffStatusFilter};

use super::{ensure, list_staff};
use crate::{
    domain::{client::StaffApi, expectation::ResponseExpectation},
    error::HarnessError,
};

/// Filter value the platform does not recognise.
pub const INVALID_STATE: &str = "xyz";

#[tracing::instrument(skip_all)]
pub async fn list_all(api: &dyn StaffApi) -> Result<(), HarnessError> {
    let records: Vec<StaffRecord> = list_staff(api, ResponseExpectation::Success, None)
        .await?
        .json()?;

    tracing::info!(count = records.len(), "Listed staff");
    Ok(())
}

/// Every record returned under `filter` must carry the matching `isActive`.
#[tracing::instrument(skip_all, fields(%filter))]
pub async fn list_with_state(
    api: &dyn StaffApi,
    filter: StaffStatusFilter,
) -> Result<(), HarnessError> {
    let records: Vec<StaffRecord> =
        list_staff(api, ResponseExpectation::Success, Some(filter.as_str()))
            .await?
            .json()?;

    if let Some(expected) = filter.expected_active() {
        for record in &records {
            ensure(record.is_active == expected, || {
                format!(
                    "staff {} listed under {filter:?} has isActive={}",
                    record.id, record.is_active
                )
            })?;
        }
    }

    tracing::info!(count = records.len(), "Listed staff");
    Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn list_invalid_state(api: &dyn StaffApi) -> Result<(), HarnessError> {
    list_staff(api, ResponseExpectation::ValidationError, Some(INVALID_STATE)).await?;
    Ok(())
}
