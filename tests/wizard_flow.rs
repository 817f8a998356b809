/// End-to-end step flows against a mocked intake API: a submission only
/// leaves the client when the form validates, and exactly once per attempt.
use std::time::Duration;

use sme_intake_client::attachments::Attachment;
use sme_intake_client::business_proof::BusinessProofForm;
use sme_intake_client::errors::AppError;
use sme_intake_client::income_proof::{IncomeProofForm, StatementKind, FISCAL_YEARS};
use sme_intake_client::intake_client::IntakeApiClient;
use sme_intake_client::kyc::KycForm;
use sme_intake_client::models::CompanyType;
use sme_intake_client::otp::OtpStatus;
use sme_intake_client::router::Route;
use sme_intake_client::session::{ApplicantSession, SessionMode};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IntakeApiClient {
    IntakeApiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn file(name: &str) -> Attachment {
    Attachment::new(name, "application/pdf", b"%PDF-1.4".to_vec())
}

fn valid_kyc_form() -> KycForm {
    let mut form = KycForm::new();
    form.set_business_tax_id("ABCDE1234F");
    form.set_owner_tax_id(0, "FGHIJ5678K");
    form.set_owner_national_id(0, "123456789012");
    form.attach_business_tax_file(Some(file("biz.pdf"))).unwrap();
    form.attach_owner_tax_file(0, Some(file("pan.pdf"))).unwrap();
    form.attach_owner_national_file(0, Some(file("aad.pdf"))).unwrap();
    form.attach_office_address_proof(Some(file("office.pdf"))).unwrap();
    form.set_mail_address("12 Market Road");
    form.set_permanent_address("12 Market Road");
    form
}

#[tokio::test]
async fn valid_kyc_submits_exactly_once_and_advances() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/kyc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = valid_kyc_form();

    let next = form.submit(&client).await.unwrap();
    assert_eq!(next, Route::BusinessProofUpload);
    assert_eq!(form.success_message(), Some("KYC submitted successfully."));
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn invalid_kyc_never_reaches_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/kyc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = valid_kyc_form();
    // knock out one required file
    form.attach_office_address_proof(None).unwrap();

    let result = form.submit(&client).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(form.errors().contains_key("office_address_proof"));
}

#[tokio::test]
async fn failed_kyc_submission_keeps_state_for_retry() {
    let mock_server = MockServer::start().await;

    // first attempt fails at the server, second succeeds
    Mock::given(method("POST"))
        .and(path("/api/kyc"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/kyc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = valid_kyc_form();

    let first = form.submit(&client).await;
    assert!(first.is_err());
    // single submission-level error, field state untouched
    assert!(form.errors().contains_key("submit"));
    assert_eq!(form.errors().len(), 1);

    let second = form.submit(&client).await.unwrap();
    assert_eq!(second, Route::BusinessProofUpload);
    assert!(!form.errors().contains_key("submit"));
}

#[tokio::test]
async fn business_proof_multipart_carries_wire_field_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/business-proof"))
        .and(body_string_contains("name=\"regDocFile\""))
        .and(body_string_contains("name=\"cinNumber\""))
        .and(body_string_contains("name=\"directorsListFile\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = BusinessProofForm::new();
    form.attach_registration_doc(Some(file("reg.pdf"))).unwrap();
    form.set_registration_number("L12345DL2000PTC123456");
    form.set_private_limited(true);
    form.attach_directors_list(Some(file("board.pdf"))).unwrap();

    let next = form.submit(&client).await.unwrap();
    assert_eq!(next, Route::IncomeProofUpload);
}

#[tokio::test]
async fn business_proof_without_directors_blocked_for_private_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/business-proof"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = BusinessProofForm::new();
    form.attach_registration_doc(Some(file("reg.pdf"))).unwrap();
    form.set_private_limited(true);

    let result = form.submit(&client).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn income_proof_submits_all_year_keys() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/income-proof"))
        .and(body_string_contains("name=\"pl_fy1\""))
        .and(body_string_contains("name=\"bs_fy2\""))
        .and(body_string_contains("name=\"itr_fy3\""))
        .and(body_string_contains("name=\"bankStatementFile\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = IncomeProofForm::new();
    for kind in StatementKind::ALL {
        for year in 0..FISCAL_YEARS {
            form.attach_statement(kind, year, Some(file("doc.pdf"))).unwrap();
        }
    }
    form.attach_bank_statement(Some(file("bank.pdf"))).unwrap();

    let next = form.submit(&client).await.unwrap();
    assert_eq!(next, Route::Dashboard);
}

#[tokio::test]
async fn income_proof_missing_one_year_never_submits() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/income-proof"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut form = IncomeProofForm::new();
    for kind in StatementKind::ALL {
        for year in 0..FISCAL_YEARS {
            form.attach_statement(kind, year, Some(file("doc.pdf"))).unwrap();
        }
    }
    form.attach_statement(StatementKind::TaxReturn, 2, None).unwrap();
    form.attach_bank_statement(Some(file("bank.pdf"))).unwrap();

    let result = form.submit(&client).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn create_flow_confirms_otp_then_creates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-otp"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"otp": "654321"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/generate-id/Services"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"applicantID": "SMES9"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/applicant/new"))
        .and(body_string_contains("SMES9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "applicant": {
                "Applicant ID": "SMES9",
                "Full Name": "Asha Services",
                "Phone": "9876543210"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ApplicantSession::new();
    session.set_mode(SessionMode::New);
    session.draft.set_full_name("Asha Services");
    session.draft.set_phone("(98) 765-43210");
    session.draft.set_company_type(CompanyType::Services);

    session.draft.request_otp(&client).await.unwrap();
    assert_eq!(session.draft.enter_otp("654321"), OtpStatus::Matched);
    assert!(session.draft.can_create());

    let applicant = session.draft.create(&client).await.unwrap();
    assert_eq!(applicant.applicant_id, "SMES9");
}

#[tokio::test]
async fn create_without_matched_otp_never_calls_the_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/applicant/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ApplicantSession::new();
    session.draft.set_full_name("Asha Services");
    session.draft.set_phone("9876543210");
    session.draft.set_company_type(CompanyType::Services);

    let result = session.draft.create(&client).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn id_generation_failure_falls_back_to_local_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/generate-id/Trading"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/send-otp"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"otp": "111222"})),
        )
        .mount(&mock_server)
        .await;
    // the created payload carries the degraded-mode local identifier
    Mock::given(method("POST"))
        .and(path("/api/applicant/new"))
        .and(body_string_contains("\"applicantID\":\"SMET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "applicant": {
                "Applicant ID": "SMET1234",
                "Full Name": "Asha Traders",
                "Phone": "9876543210"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ApplicantSession::new();
    session.draft.set_full_name("Asha Traders");
    session.draft.set_phone("9876543210");
    session.draft.set_company_type(CompanyType::Trading);
    session.draft.request_otp(&client).await.unwrap();
    session.draft.enter_otp("111222");

    let applicant = session.draft.create(&client).await.unwrap();
    assert_eq!(applicant.applicant_id, "SMET1234");
}
