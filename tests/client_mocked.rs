/// Integration tests with a mocked intake API.
/// Exercises the client's request/response handling without a real backend.
use sme_intake_client::errors::AppError;
use sme_intake_client::intake_client::IntakeApiClient;
use sme_intake_client::models::{CompanyType, CreateApplicantRequest, DocumentFlag};
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IntakeApiClient {
    IntakeApiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn applicant_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "Applicant ID": id,
        "Full Name": "Asha Traders",
        "Phone": "9876543210",
        "Loan Amount Requested": "250000",
        "Company Type": "Trading",
        "Loan Category": "Working Capital",
        "Applicant's Industry": "Retail",
        "Applicant's Category": "Micro",
        "KYC Submitted": "Yes"
    })
}

#[tokio::test]
async fn fetch_applicant_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applicant/SMET42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applicant_json("SMET42")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let applicant = client.fetch_applicant("SMET42").await.unwrap();

    assert_eq!(applicant.applicant_id, "SMET42");
    assert_eq!(applicant.full_name, "Asha Traders");
    assert_eq!(applicant.flag(DocumentFlag::Kyc), Some("Yes"));
    assert_eq!(applicant.flag(DocumentFlag::Income), None);
}

#[tokio::test]
async fn fetch_applicant_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applicant/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such applicant"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.fetch_applicant("NOPE").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn fetch_applicant_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applicant/SMET42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.fetch_applicant("SMET42").await;

    assert!(matches!(result, Err(AppError::ExternalApiError(_))));
}

#[tokio::test]
async fn generate_id_returns_server_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/generate-id/Manufacturing"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"applicantID": "SMEM77"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let id = client
        .generate_applicant_id(CompanyType::Manufacturing)
        .await
        .unwrap();

    assert_eq!(id, "SMEM77");
}

#[tokio::test]
async fn send_otp_returns_issued_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-otp"))
        .and(body_json(serde_json::json!({"phone": "9876543210"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"otp": "123456"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let code = client.send_otp("9876543210").await.unwrap();

    assert_eq!(code, "123456");
}

#[tokio::test]
async fn send_otp_rejects_empty_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/send-otp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"otp": ""})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.send_otp("9876543210").await;

    assert!(matches!(result, Err(AppError::ExternalApiError(_))));
}

#[tokio::test]
async fn create_applicant_returns_stored_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/applicant/new"))
        .and(body_json(serde_json::json!({
            "fullName": "Asha Traders",
            "phone": "9876543210",
            "companyType": "Trading",
            "applicantID": "SMET42"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "applicant": applicant_json("SMET42")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let applicant = client
        .create_applicant(&CreateApplicantRequest {
            full_name: "Asha Traders".to_string(),
            phone: "9876543210".to_string(),
            company_type: "Trading".to_string(),
            applicant_id: "SMET42".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(applicant.applicant_id, "SMET42");
}

#[tokio::test]
async fn update_field_patches_single_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/applicant/update/SMET42"))
        .and(body_json(serde_json::json!({"KYC Submitted": "Yes"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .update_applicant_field("SMET42", DocumentFlag::Kyc.field_name())
        .await
        .unwrap();
}

#[tokio::test]
async fn update_field_surfaces_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/applicant/update/N/A"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad id"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .update_applicant_field("N/A", DocumentFlag::Income.field_name())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn kyc_multipart_carries_wire_field_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/kyc"))
        .and(body_string_contains("name=\"businessPAN\""))
        .and(body_string_contains("name=\"owners[0][pan]\""))
        .and(body_string_contains("name=\"owners[0][aadhaar]\""))
        .and(body_string_contains("name=\"officeAddressProof\""))
        .and(body_string_contains("name=\"mailAddress\""))
        .and(body_string_contains("name=\"permanentAddress\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    use sme_intake_client::attachments::Attachment;
    use sme_intake_client::kyc::KycForm;

    let mut form = KycForm::new();
    form.set_business_tax_id("ABCDE1234F");
    form.set_owner_tax_id(0, "FGHIJ5678K");
    form.set_owner_national_id(0, "123456789012");
    let file = || Attachment::new("doc.pdf", "application/pdf", b"%PDF-1.4".to_vec());
    form.attach_business_tax_file(Some(file())).unwrap();
    form.attach_owner_tax_file(0, Some(file())).unwrap();
    form.attach_owner_national_file(0, Some(file())).unwrap();
    form.attach_office_address_proof(Some(file())).unwrap();
    form.set_mail_address("12 Market Road");
    form.set_permanent_address("12 Market Road");

    client.submit_kyc(form.multipart().unwrap()).await.unwrap();
}

#[tokio::test]
async fn concurrent_fetches_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applicant_json("SMET42")))
        .expect(10)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let mut handles = vec![];
    for _ in 0..10 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.fetch_applicant("SMET42").await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}
