//! Staff resource scenarios.
//!
//! Every scenario is an independent async function taking the transport and
//! the suite settings. A returned error fails that scenario only.

pub mod create;
pub mod fetch;
pub mod list;

use std::{fmt, str::FromStr};

use shared::types::StaffStatusFilter;

use crate::{
    config::SuiteSettings,
    domain::{
        client::{RawResponse, StaffApi},
        expectation::ResponseExpectation,
        payload::StaffPayload,
    },
    error::HarnessError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    CreateValid,
    CreateInvalidMissingField,
    CreateInvalidFieldLength,
    CreateMaxNameLength,
    FetchById,
    FetchUnknownId,
    ListAll,
    ListStatusAll,
    ListActive,
    ListInactive,
    ListInvalidState,
}

impl Scenario {
    /// Suite order.
    pub const ALL: [Scenario; 11] = [
        Scenario::CreateValid,
        Scenario::CreateInvalidMissingField,
        Scenario::CreateInvalidFieldLength,
        Scenario::CreateMaxNameLength,
        Scenario::FetchById,
        Scenario::FetchUnknownId,
        Scenario::ListAll,
        Scenario::ListStatusAll,
        Scenario::ListActive,
        Scenario::ListInactive,
        Scenario::ListInvalidState,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CreateValid => "create_valid",
            Self::CreateInvalidMissingField => "create_invalid_missing_field",
            Self::CreateInvalidFieldLength => "create_invalid_field_length",
            Self::CreateMaxNameLength => "create_max_name_length",
            Self::FetchById => "fetch_by_id",
            Self::FetchUnknownId => "fetch_unknown_id",
            Self::ListAll => "list_all",
            Self::ListStatusAll => "list_status_all",
            Self::ListActive => "list_active",
            Self::ListInactive => "list_inactive",
            Self::ListInvalidState => "list_invalid_state",
        }
    }

    pub async fn run(
        self,
        api: &dyn StaffApi,
        settings: &SuiteSettings,
    ) -> Result<(), HarnessError> {
        match self {
            Self::CreateValid => create::create_valid(api, settings).await,
            Self::CreateInvalidMissingField => {
                create::create_invalid_missing_field(api, settings).await
            }
            Self::CreateInvalidFieldLength => {
                create::create_invalid_field_length(api, settings).await
            }
            Self::CreateMaxNameLength => create::create_max_name_length(api, settings).await,
            Self::FetchById => fetch::fetch_by_id(api, settings).await,
            Self::FetchUnknownId => fetch::fetch_unknown_id(api).await,
            Self::ListAll => list::list_all(api).await,
            Self::ListStatusAll => list::list_with_state(api, StaffStatusFilter::All).await,
            Self::ListActive => list::list_with_state(api, StaffStatusFilter::Active).await,
            Self::ListInactive => list::list_with_state(api, StaffStatusFilter::Inactive).await,
            Self::ListInvalidState => list::list_invalid_state(api).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| HarnessError::Config(format!("unknown scenario {wanted:?}")))
    }
}

/// Parses a comma separated scenario list; blank input selects the whole suite.
pub fn parse_selection(raw: &str) -> Result<Vec<Scenario>, HarnessError> {
    let names: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if names.is_empty() {
        return Ok(Scenario::ALL.to_vec());
    }

    names.into_iter().map(str::parse).collect()
}

// region: request helpers

pub async fn create_staff(
    api: &dyn StaffApi,
    expect: ResponseExpectation,
    payload: StaffPayload,
) -> Result<RawResponse, HarnessError> {
    expect.verify(api.create_staff(payload).await?)
}

pub async fn get_staff(
    api: &dyn StaffApi,
    expect: ResponseExpectation,
    id: i64,
) -> Result<RawResponse, HarnessError> {
    expect.verify(api.get_staff(id).await?)
}

pub async fn list_staff(
    api: &dyn StaffApi,
    expect: ResponseExpectation,
    status: Option<&str>,
) -> Result<RawResponse, HarnessError> {
    expect.verify(api.list_staff(status.map(str::to_owned)).await?)
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), HarnessError> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::Assertion(message()))
    }
}

// endregion: request helpers
