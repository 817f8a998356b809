use std::time::Duration;

use reqwest::multipart::Form;
use serde_json::json;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    Applicant, CompanyType, CreateApplicantRequest, CreateApplicantResponse, GenerateIdResponse,
    SendOtpRequest, SendOtpResponse,
};

/// Client for the remote intake API.
///
/// One instance is built at startup and shared by every screen; all
/// submission and lookup traffic goes through here.
#[derive(Clone)]
pub struct IntakeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl IntakeApiClient {
    /// Creates a new `IntakeApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the intake API (no trailing slash).
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create intake client: {}", e))
            })?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    /// Fetches an existing applicant by identifier.
    ///
    /// A 404 becomes [`AppError::NotFound`]; the caller decides how to
    /// surface it (the lookup screen reports it, it never auto-routes).
    pub async fn fetch_applicant(&self, applicant_id: &str) -> Result<Applicant, AppError> {
        let url = format!("{}/api/applicant/{}", self.base_url, applicant_id);
        tracing::info!("Fetching applicant {} from {}", applicant_id, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalApiError(format!("Applicant fetch failed: {}", e))
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Applicant {} not found",
                applicant_id
            )));
        }
        if !response.status().is_success() {
            return Err(Self::status_error("Applicant fetch", response).await);
        }

        let applicant = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse applicant record: {}", e))
        })?;

        Ok(applicant)
    }

    /// Requests a server-generated applicant identifier for a company
    /// category.
    pub async fn generate_applicant_id(
        &self,
        company_type: CompanyType,
    ) -> Result<String, AppError> {
        let url = format!("{}/api/generate-id/{}", self.base_url, company_type.as_str());
        tracing::info!("Requesting applicant ID for {} companies", company_type);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalApiError(format!("ID generation request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(Self::status_error("ID generation", response).await);
        }

        let body: GenerateIdResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse ID generation response: {}", e))
        })?;

        Ok(body.applicant_id)
    }

    /// Requests OTP issuance for a phone number and returns the issued code.
    ///
    /// The code is treated as opaque and never logged.
    pub async fn send_otp(&self, phone: &str) -> Result<String, AppError> {
        let url = format!("{}/api/send-otp", self.base_url);
        tracing::info!("Requesting OTP issuance");

        let response = self
            .client
            .post(&url)
            .json(&SendOtpRequest {
                phone: phone.to_string(),
            })
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("OTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::status_error("OTP issuance", response).await);
        }

        let body: SendOtpResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse OTP response: {}", e))
        })?;

        if body.otp.is_empty() {
            return Err(AppError::ExternalApiError(
                "No OTP returned from server".to_string(),
            ));
        }

        Ok(body.otp)
    }

    /// Creates a new applicant and returns the stored record.
    pub async fn create_applicant(
        &self,
        request: &CreateApplicantRequest,
    ) -> Result<Applicant, AppError> {
        let url = format!("{}/api/applicant/new", self.base_url);
        tracing::info!("Creating new applicant: {}", request.full_name);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("Applicant creation failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(Self::status_error("Applicant creation", response).await);
        }

        let body: CreateApplicantResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse creation response: {}", e))
        })?;

        tracing::info!("Applicant created: {}", body.applicant.applicant_id);
        Ok(body.applicant)
    }

    /// Sets one document-submission flag to "Yes".
    pub async fn update_applicant_field(
        &self,
        applicant_id: &str,
        field: &str,
    ) -> Result<(), AppError> {
        let url = format!("{}/api/applicant/update/{}", self.base_url, applicant_id);
        tracing::info!("Updating field '{}' for applicant {}", field, applicant_id);

        let response = self
            .client
            .patch(&url)
            .json(&json!({ field: "Yes" }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Field update failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::status_error("Field update", response).await);
        }

        Ok(())
    }

    /// Submits the KYC multipart payload.
    pub async fn submit_kyc(&self, form: Form) -> Result<(), AppError> {
        self.submit_multipart("/api/kyc", "KYC", form).await
    }

    /// Submits the business-proof multipart payload.
    pub async fn submit_business_proof(&self, form: Form) -> Result<(), AppError> {
        self.submit_multipart("/api/business-proof", "Business proof", form)
            .await
    }

    /// Submits the income-proof multipart payload.
    pub async fn submit_income_proof(&self, form: Form) -> Result<(), AppError> {
        self.submit_multipart("/api/income-proof", "Income proof", form)
            .await
    }

    async fn submit_multipart(&self, path: &str, what: &str, form: Form) -> Result<(), AppError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("Submitting {} payload to {}", what, url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("{} submission failed: {}", what, e)))?;

        if !response.status().is_success() {
            return Err(Self::status_error(what, response).await);
        }

        tracing::info!("{} submitted successfully", what);
        Ok(())
    }

    async fn status_error(what: &str, response: reqwest::Response) -> AppError {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        AppError::ExternalApiError(format!("{} returned {}: {}", what, status, error_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn client_creation() {
        let client = IntakeApiClient::new(
            "http://localhost:8000".to_string(),
            Duration::from_secs(30),
        );
        assert!(client.is_ok());
    }
}
