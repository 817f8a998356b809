//! Applicant session screen: look up an existing applicant by identifier,
//! or provision a new one behind an OTP gate.

use crate::errors::AppError;
use crate::intake_client::IntakeApiClient;
use crate::models::{Applicant, CompanyType, CreateApplicantRequest};
use crate::otp::{OtpChallenge, OtpStatus};
use crate::validators::validate_phone;

/// The two mutually exclusive sides of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Existing,
    New,
}

/// The session screen: mode toggle plus both forms.
///
/// Toggling the mode keeps each side's state, exactly like the tabbed
/// original; everything is discarded together when the screen goes away.
pub struct ApplicantSession {
    mode: SessionMode,
    pub lookup: LookupForm,
    pub draft: NewApplicantForm,
}

impl Default for ApplicantSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicantSession {
    pub fn new() -> Self {
        Self {
            mode: SessionMode::Existing,
            lookup: LookupForm::default(),
            draft: NewApplicantForm::new(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
    }
}

/// Existing-applicant lookup.
#[derive(Debug, Default)]
pub struct LookupForm {
    applicant_id: String,
}

impl LookupForm {
    pub fn set_applicant_id(&mut self, value: &str) {
        self.applicant_id = value.to_string();
    }

    pub fn applicant_id(&self) -> &str {
        self.applicant_id.trim()
    }

    pub fn can_fetch(&self) -> bool {
        !self.applicant_id.trim().is_empty()
    }

    /// Fetch the applicant record for hand-off to the dashboard.
    ///
    /// Failures (not-found included) are reported to the caller; this screen
    /// never routes to the not-found view.
    pub async fn fetch(&self, client: &IntakeApiClient) -> Result<Applicant, AppError> {
        if !self.can_fetch() {
            return Err(AppError::Validation(
                "Please enter an Applicant ID".to_string(),
            ));
        }
        client.fetch_applicant(self.applicant_id()).await
    }
}

/// New-applicant creation: full name, phone, company category, and a
/// confirmed OTP before the create action unlocks.
pub struct NewApplicantForm {
    full_name: String,
    phone: String,
    company_type: Option<CompanyType>,
    challenge: Option<OtpChallenge>,
    sending_otp: bool,
    creating: bool,
}

impl Default for NewApplicantForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NewApplicantForm {
    pub fn new() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            company_type: None,
            challenge: None,
            sending_otp: false,
            creating: false,
        }
    }

    pub fn set_full_name(&mut self, value: &str) {
        self.full_name = value.to_string();
    }

    pub fn set_phone(&mut self, value: &str) {
        self.phone = value.to_string();
    }

    pub fn set_company_type(&mut self, company_type: CompanyType) {
        self.company_type = Some(company_type);
    }

    pub fn company_type(&self) -> Option<CompanyType> {
        self.company_type
    }

    // ---- OTP ----

    /// Request OTP issuance for the entered phone number.
    ///
    /// Resets any previous entry. The owning screen starts its resend
    /// cooldown timer when this returns Ok and drops it on teardown.
    pub async fn request_otp(&mut self, client: &IntakeApiClient) -> Result<(), AppError> {
        let digits = validate_phone(&self.phone).map_err(AppError::Validation)?;

        if self.sending_otp {
            return Err(AppError::Validation(
                "OTP request already in progress.".to_string(),
            ));
        }

        self.sending_otp = true;
        let result = client.send_otp(&digits).await;
        self.sending_otp = false;

        let code = result?;
        self.challenge = Some(OtpChallenge::new(code));
        tracing::info!("OTP issued");
        Ok(())
    }

    /// Record an OTP entry and return the classification.
    pub fn enter_otp(&mut self, raw: &str) -> OtpStatus {
        match self.challenge.as_mut() {
            Some(challenge) => challenge.enter(raw),
            None => OtpStatus::Pending,
        }
    }

    pub fn otp_status(&self) -> OtpStatus {
        self.challenge
            .as_ref()
            .map(|c| c.status())
            .unwrap_or(OtpStatus::Pending)
    }

    // ---- creation ----

    /// True only when every prerequisite of the create action holds.
    pub fn can_create(&self) -> bool {
        !self.creating
            && self.otp_status() == OtpStatus::Matched
            && !self.full_name.trim().is_empty()
            && validate_phone(&self.phone).is_ok()
            && self.company_type.is_some()
    }

    /// Provision the applicant: obtain an identifier (server-generated,
    /// falling back to a local non-unique one), then create the record.
    pub async fn create(&mut self, client: &IntakeApiClient) -> Result<Applicant, AppError> {
        if self.otp_status() != OtpStatus::Matched {
            return Err(AppError::Validation(
                "Please enter the correct OTP before proceeding.".to_string(),
            ));
        }
        if self.full_name.trim().is_empty() {
            return Err(AppError::Validation("Please enter Full Name.".to_string()));
        }
        let phone_digits = validate_phone(&self.phone).map_err(AppError::Validation)?;
        let Some(company_type) = self.company_type else {
            return Err(AppError::Validation(
                "Please select a Company Type.".to_string(),
            ));
        };
        if self.creating {
            return Err(AppError::Validation(
                "Creation already in progress.".to_string(),
            ));
        }

        self.creating = true;
        let result = self
            .create_inner(client, company_type, phone_digits)
            .await;
        self.creating = false;
        result
    }

    async fn create_inner(
        &self,
        client: &IntakeApiClient,
        company_type: CompanyType,
        phone_digits: String,
    ) -> Result<Applicant, AppError> {
        let applicant_id = match client.generate_applicant_id(company_type).await {
            Ok(id) => id,
            Err(e) => {
                // Degraded mode: non-unique local identifier, flow continues
                let fallback = local_fallback_id(company_type);
                tracing::warn!(
                    "ID generation failed ({}), falling back to local id {}",
                    e,
                    fallback
                );
                fallback
            }
        };

        client
            .create_applicant(&CreateApplicantRequest {
                full_name: self.full_name.trim().to_string(),
                phone: phone_digits,
                company_type: company_type.as_str().to_string(),
                applicant_id,
            })
            .await
    }
}

/// Client-synthesized identifier used only when the server cannot supply
/// one: category initial plus a truncated millisecond timestamp. Not unique.
fn local_fallback_id(company_type: CompanyType) -> String {
    let suffix = chrono::Utc::now().timestamp_millis() % 10_000;
    format!("SME{}{}", company_type.initial(), suffix)
}
