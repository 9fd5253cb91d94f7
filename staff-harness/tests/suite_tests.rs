use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio_util::sync::CancellationToken;

use staff_harness::{
    config::SuiteSettings,
    domain::{
        client::{MockStaffApi, RawResponse},
        payload::{FIRSTNAME, LASTNAME, MOBILE_NO, OFFICE_ID, StaffPayload},
    },
    error::HarnessError,
    runner::run_scenarios,
    suite::{Scenario, create, fetch, list},
};

fn ok(body: serde_json::Value) -> Result<RawResponse, HarnessError> {
    Ok(RawResponse::new(200, body.to_string()))
}

fn status(code: u16) -> Result<RawResponse, HarnessError> {
    Ok(RawResponse::new(code, ""))
}

fn staff(id: i64, active: bool) -> serde_json::Value {
    json!({ "id": id, "firstname": "Ada", "lastname": "Byron", "officeId": 1, "isActive": active })
}

// -- create --

#[tokio::test]
async fn create_valid_passes_when_office_is_echoed() {
    let mut api = MockStaffApi::new();
    api.expect_create_staff()
        .withf(|p: &StaffPayload| {
            p.office_id() == Some(1) && p.contains(FIRSTNAME) && p.contains(LASTNAME)
        })
        .times(1)
        .returning(|_| ok(json!({ "officeId": 1, "resourceId": 42 })));

    create::create_valid(&api, &SuiteSettings::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn create_valid_fails_on_wrong_office() {
    let mut api = MockStaffApi::new();
    api.expect_create_staff()
        .returning(|_| ok(json!({ "officeId": 2, "resourceId": 42 })));

    let err = create::create_valid(&api, &SuiteSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Assertion(_)));
}

#[tokio::test]
async fn create_valid_fails_without_resource_id() {
    let mut api = MockStaffApi::new();
    api.expect_create_staff()
        .returning(|_| ok(json!({ "officeId": 1 })));

    let err = create::create_valid(&api, &SuiteSettings::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("resourceId"));
}

#[tokio::test]
async fn create_valid_fails_on_validation_error() {
    let mut api = MockStaffApi::new();
    api.expect_create_staff().returning(|_| status(400));

    let err = create::create_valid(&api, &SuiteSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HarnessError::UnexpectedStatus {
            expected: 200,
            actual: 400,
            ..
        }
    ));
}

#[tokio::test]
async fn missing_field_omits_each_required_field_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut api = MockStaffApi::new();
    {
        let seen = seen.clone();
        api.expect_create_staff().times(3).returning(move |p| {
            let mut fields: Vec<String> = p.field_names().map(str::to_owned).collect();
            fields.sort();
            seen.lock().unwrap().push(fields);
            status(400)
        });
    }

    create::create_invalid_missing_field(&api, &SuiteSettings::default())
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            vec![FIRSTNAME.to_string(), LASTNAME.to_string()],
            vec![LASTNAME.to_string(), OFFICE_ID.to_string()],
            vec![FIRSTNAME.to_string(), OFFICE_ID.to_string()],
        ]
    );
}

#[tokio::test]
async fn missing_field_fails_when_server_accepts_payload() {
    let mut api = MockStaffApi::new();
    api.expect_create_staff()
        .times(1)
        .returning(|_| ok(json!({ "officeId": 1, "resourceId": 3 })));

    let err = create::create_invalid_missing_field(&api, &SuiteSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HarnessError::UnexpectedStatus { expected: 400, .. }
    ));
}

#[tokio::test]
async fn field_length_violates_one_field_at_a_time() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut api = MockStaffApi::new();
    {
        let seen = seen.clone();
        api.expect_create_staff().times(3).returning(move |p| {
            seen.lock().unwrap().push(p);
            status(400)
        });
    }

    create::create_invalid_field_length(&api, &SuiteSettings::default())
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    let lens = |p: &StaffPayload| {
        (
            p.str_len(FIRSTNAME).unwrap(),
            p.str_len(LASTNAME).unwrap(),
            p.str_len(MOBILE_NO),
        )
    };

    assert_eq!(lens(&seen[0]), (51, 8, None));
    assert_eq!(lens(&seen[1]), (13, 51, None));
    assert_eq!(lens(&seen[2]), (13, 8, Some(51)));
}

#[tokio::test]
async fn field_length_honours_configured_limits() {
    let mut settings = SuiteSettings::default();
    settings.limits.mobile_no = 15;

    let last = Arc::new(Mutex::new(None));
    let mut api = MockStaffApi::new();
    {
        let last = last.clone();
        api.expect_create_staff().times(3).returning(move |p| {
            *last.lock().unwrap() = Some(p);
            status(400)
        });
    }

    create::create_invalid_field_length(&api, &settings)
        .await
        .unwrap();

    let last = last.lock().unwrap().take().unwrap();
    assert_eq!(last.str_len(MOBILE_NO), Some(16));
}

#[tokio::test]
async fn max_name_length_is_accepted() {
    let mut api = MockStaffApi::new();
    api.expect_create_staff()
        .withf(|p: &StaffPayload| {
            p.str_len(FIRSTNAME) == Some(50)
                && p.str_len(LASTNAME) == Some(50)
                && p.str_len(MOBILE_NO) == Some(50)
        })
        .times(1)
        .returning(|_| ok(json!({ "officeId": 1, "resourceId": 9 })));

    create::create_max_name_length(&api, &SuiteSettings::default())
        .await
        .unwrap();
}

// -- fetch --

#[tokio::test]
async fn fetch_by_id_checks_returned_id() {
    let mut api = MockStaffApi::new();
    api.expect_get_staff()
        .withf(|id| *id == 1)
        .returning(|_| ok(staff(1, true)));

    fetch::fetch_by_id(&api, &SuiteSettings::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn fetch_by_id_fails_on_mismatched_id() {
    let mut api = MockStaffApi::new();
    api.expect_get_staff().returning(|_| ok(staff(7, true)));

    let err = fetch::fetch_by_id(&api, &SuiteSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Assertion(_)));
}

#[tokio::test]
async fn fetch_by_id_fails_on_record_without_id() {
    let mut api = MockStaffApi::new();
    api.expect_get_staff()
        .returning(|_| ok(json!({ "firstname": "Ada", "isActive": true })));

    let err = fetch::fetch_by_id(&api, &SuiteSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Decode(_)));
}

#[tokio::test]
async fn fetch_unknown_id_uses_max_int() {
    let mut api = MockStaffApi::new();
    api.expect_get_staff()
        .withf(|id| *id == i64::from(i32::MAX))
        .times(1)
        .returning(|_| status(404));

    fetch::fetch_unknown_id(&api).await.unwrap();
}

#[tokio::test]
async fn fetch_unknown_id_fails_when_found() {
    let mut api = MockStaffApi::new();
    api.expect_get_staff().returning(|id| ok(staff(id, true)));

    let err = fetch::fetch_unknown_id(&api).await.unwrap_err();
    assert!(matches!(
        err,
        HarnessError::UnexpectedStatus {
            expected: 404,
            actual: 200,
            ..
        }
    ));
}

// -- list --

#[tokio::test]
async fn list_all_sends_no_filter() {
    let mut api = MockStaffApi::new();
    api.expect_list_staff()
        .withf(|status| status.is_none())
        .returning(|_| ok(json!([staff(1, true), staff(2, false)])));

    list::list_all(&api).await.unwrap();
}

#[tokio::test]
async fn list_active_rejects_inactive_records() {
    let mut api = MockStaffApi::new();
    api.expect_list_staff()
        .withf(|status| status.as_deref() == Some("active"))
        .returning(|_| ok(json!([staff(1, true), staff(2, false)])));

    let err = list::list_with_state(&api, shared::types::StaffStatusFilter::Active)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("staff 2"));
}

#[tokio::test]
async fn list_inactive_accepts_empty_list() {
    let mut api = MockStaffApi::new();
    api.expect_list_staff()
        .withf(|status| status.as_deref() == Some("inactive"))
        .returning(|_| ok(json!([])));

    list::list_with_state(&api, shared::types::StaffStatusFilter::Inactive)
        .await
        .unwrap();
}

#[tokio::test]
async fn list_status_all_allows_mixed_records() {
    let mut api = MockStaffApi::new();
    api.expect_list_staff()
        .withf(|status| status.as_deref() == Some("all"))
        .returning(|_| ok(json!([staff(1, true), staff(2, false)])));

    list::list_with_state(&api, shared::types::StaffStatusFilter::All)
        .await
        .unwrap();
}

#[tokio::test]
async fn list_invalid_state_expects_validation_error() {
    let mut api = MockStaffApi::new();
    api.expect_list_staff()
        .withf(|status| status.as_deref() == Some("xyz"))
        .returning(|_| status(400));

    list::list_invalid_state(&api).await.unwrap();
}

// -- runner --

#[tokio::test]
async fn runner_sets_up_each_scenario_and_isolates_failures() {
    let setups = Arc::new(Mutex::new(0));
    let counter = setups.clone();

    let report = run_scenarios(
        &[Scenario::FetchUnknownId, Scenario::ListInvalidState],
        &SuiteSettings::default(),
        move || {
            *counter.lock().unwrap() += 1;
            async {
                let mut api = MockStaffApi::new();
                // Server wrongly finds the unknown id.
                api.expect_get_staff().returning(|id| ok(staff(id, true)));
                api.expect_list_staff().returning(|_| status(400));
                Ok(api)
            }
        },
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(*setups.lock().unwrap(), 2);
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.passed(), 1);
    let failed: Vec<Scenario> = report.failed().map(|o| o.scenario).collect();
    assert_eq!(failed, vec![Scenario::FetchUnknownId]);
    assert!(!report.is_success());
}

#[tokio::test]
async fn runner_reports_setup_failure_per_scenario() {
    let report = run_scenarios(
        &[Scenario::ListAll],
        &SuiteSettings::default(),
        || async { Err::<MockStaffApi, _>(HarnessError::Login("denied".into())) },
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(report.outcomes.len(), 1);
    assert!(matches!(
        report.outcomes[0].error,
        Some(HarnessError::Login(_))
    ));
}

#[tokio::test]
async fn runner_skips_everything_once_cancelled() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = run_scenarios(
        &Scenario::ALL,
        &SuiteSettings::default(),
        || async { Ok(MockStaffApi::new()) },
        &cancel,
    )
    .await;

    assert!(report.outcomes.is_empty());
    assert_eq!(report.skipped.len(), Scenario::ALL.len());
    assert!(!report.is_success());
}
