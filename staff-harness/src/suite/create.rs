use shared::types::CreatedResource;

use super::{create_staff, ensure};
use crate::{
    config::SuiteSettings,
    domain::{
        client::StaffApi,
        expectation::ResponseExpectation,
        payload::{
            FIRSTNAME, FIRSTNAME_PREFIX, LASTNAME, LASTNAME_PREFIX, MOBILE_NO, MOBILE_NO_PREFIX,
            OFFICE_ID, StaffPayload, random_name, random_name_of_len,
        },
    },
    error::HarnessError,
};

/// A well-formed payload is accepted and echoes the office it was filed under.
#[tracing::instrument(skip_all)]
pub async fn create_valid(
    api: &dyn StaffApi,
    settings: &SuiteSettings,
) -> Result<(), HarnessError> {
    let office_id = settings.office_id;
    let payload = StaffPayload::valid(office_id);
    let created: CreatedResource = create_staff(api, ResponseExpectation::Success, payload)
        .await?
        .json()?;

    ensure(created.office_id == Some(office_id), || {
        format!("officeId: expected {office_id}, got {:?}", created.office_id)
    })?;
    ensure(created.resource_id.is_some(), || "resourceId missing".to_owned())?;

    tracing::info!(resource_id = ?created.resource_id, "Staff created");
    Ok(())
}

/// Each required field, when left out, is reported as a validation failure.
#[tracing::instrument(skip_all)]
pub async fn create_invalid_missing_field(
    api: &dyn StaffApi,
    settings: &SuiteSettings,
) -> Result<(), HarnessError> {
    let subsets: [&[&str]; 3] = [
        &[FIRSTNAME, LASTNAME],
        &[OFFICE_ID, LASTNAME],
        &[OFFICE_ID, FIRSTNAME],
    ];

    for keep in subsets {
        let payload = StaffPayload::valid(settings.office_id).only(keep);
        tracing::debug!(?keep, "Probing missing field");
        create_staff(api, ResponseExpectation::ValidationError, payload).await?;
    }
    Ok(())
}

/// One bounded field at a time is pushed one character past its limit.
///
/// The oversized field is restored to a valid value before the next request, so
/// each request has exactly one violation.
#[tracing::instrument(skip_all)]
pub async fn create_invalid_field_length(
    api: &dyn StaffApi,
    settings: &SuiteSettings,
) -> Result<(), HarnessError> {
    let limits = settings.limits;
    let mut payload = StaffPayload::valid(settings.office_id);

    payload.set(FIRSTNAME, random_name_of_len(FIRSTNAME_PREFIX, limits.firstname + 1));
    create_staff(api, ResponseExpectation::ValidationError, payload.clone()).await?;
    payload.set(FIRSTNAME, random_name(FIRSTNAME_PREFIX, 5));

    payload.set(LASTNAME, random_name_of_len(LASTNAME_PREFIX, limits.lastname + 1));
    create_staff(api, ResponseExpectation::ValidationError, payload.clone()).await?;
    payload.set(LASTNAME, random_name(LASTNAME_PREFIX, 4));

    payload.set(MOBILE_NO, random_name_of_len(MOBILE_NO_PREFIX, limits.mobile_no + 1));
    create_staff(api, ResponseExpectation::ValidationError, payload).await?;

    Ok(())
}

/// Bounded fields exactly at their limit are still accepted.
#[tracing::instrument(skip_all)]
pub async fn create_max_name_length(
    api: &dyn StaffApi,
    settings: &SuiteSettings,
) -> Result<(), HarnessError> {
    let limits = settings.limits;
    let payload = StaffPayload::valid(settings.office_id)
        .with(FIRSTNAME, random_name_of_len(FIRSTNAME_PREFIX, limits.firstname))
        .with(LASTNAME, random_name_of_len(LASTNAME_PREFIX, limits.lastname))
        .with(MOBILE_NO, random_name_of_len(MOBILE_NO_PREFIX, limits.mobile_no));

    create_staff(api, ResponseExpectation::Success, payload).await?;
    Ok(())
}
