use std::fmt;

use serde::{Deserialize, Serialize};

// region: Staff Types

/// A staff record as returned by `GET /staff/{id}` and `GET /staff`.
///
/// Only the fields the harness inspects are required; anything else the
/// platform adds is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loan_officer: Option<bool>,
    pub is_active: bool,
}

/// Body returned by a successful `POST /staff`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResource {
    pub office_id: Option<i64>,
    pub resource_id: Option<i64>,
}

/// Values accepted by the `status` query parameter of `GET /staff`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatusFilter {
    All,
    Active,
    Inactive,
}

impl StaffStatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// The `isActive` value every listed record must carry, if the filter narrows it.
    pub fn expected_active(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

impl fmt::Display for StaffStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// endregion: Staff Types
