//! KYC upload step: business tax ID, per-owner identity documents, office
//! address proof, and the two addresses.

use reqwest::multipart::Form;

use crate::attachments::{Attachment, AttachmentSet};
use crate::errors::AppError;
use crate::form::{file_part, require_file, ErrorMap, SUBMIT_ERROR_KEY};
use crate::intake_client::IntakeApiClient;
use crate::router::Route;
use crate::validators::{validate_national_id, validate_tax_id};

/// Text fields of one owner row. The row's two files live in the form's
/// [`AttachmentSet`] under index-qualified keys.
#[derive(Debug, Clone, Default)]
pub struct OwnerEntry {
    pub tax_id: String,
    pub national_id: String,
}

fn owner_tax_file_key(idx: usize) -> String {
    format!("owner_tax_id_file_{}", idx)
}

fn owner_national_file_key(idx: usize) -> String {
    format!("owner_national_id_file_{}", idx)
}

const BUSINESS_TAX_FILE: &str = "business_tax_id_file";
const OFFICE_ADDRESS_PROOF: &str = "office_address_proof";

/// Controller for the KYC step.
///
/// Owns the field values, the file selections, the derived error map and
/// the in-flight flag; drives one multipart submission per valid attempt.
pub struct KycForm {
    business_tax_id: String,
    owners: Vec<OwnerEntry>,
    mail_address: String,
    permanent_address: String,
    same_as_mail: bool,
    files: AttachmentSet,
    errors: ErrorMap,
    submitting: bool,
    success_msg: Option<String>,
}

impl Default for KycForm {
    fn default() -> Self {
        Self::new()
    }
}

impl KycForm {
    pub fn new() -> Self {
        Self {
            business_tax_id: String::new(),
            owners: vec![OwnerEntry::default()],
            mail_address: String::new(),
            permanent_address: String::new(),
            same_as_mail: false,
            files: AttachmentSet::new(),
            errors: ErrorMap::new(),
            submitting: false,
            success_msg: None,
        }
    }

    // ---- field setters (input-normalizing, like the UI layer) ----

    pub fn set_business_tax_id(&mut self, value: &str) {
        self.business_tax_id = value.to_uppercase();
    }

    pub fn set_owner_tax_id(&mut self, idx: usize, value: &str) {
        if let Some(owner) = self.owners.get_mut(idx) {
            owner.tax_id = value.to_uppercase();
        }
    }

    /// Keeps digits only, capped at 12.
    pub fn set_owner_national_id(&mut self, idx: usize, value: &str) {
        if let Some(owner) = self.owners.get_mut(idx) {
            owner.national_id = value
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(12)
                .collect();
        }
    }

    pub fn set_mail_address(&mut self, value: &str) {
        self.mail_address = value.to_string();
        if self.same_as_mail {
            self.permanent_address = self.mail_address.clone();
        }
    }

    /// Ignored while the same-as-mail mirror is on (the input is
    /// disabled-equivalent then).
    pub fn set_permanent_address(&mut self, value: &str) {
        if !self.same_as_mail {
            self.permanent_address = value.to_string();
        }
    }

    pub fn set_same_as_mail(&mut self, same: bool) {
        self.same_as_mail = same;
        if same {
            self.permanent_address = self.mail_address.clone();
        }
    }

    // ---- owner rows ----

    pub fn owners(&self) -> &[OwnerEntry] {
        &self.owners
    }

    pub fn add_owner(&mut self) {
        self.owners.push(OwnerEntry::default());
    }

    /// Remove an owner row. The last remaining row cannot be removed.
    /// Files of the rows after it shift down one index.
    pub fn remove_owner(&mut self, idx: usize) {
        if self.owners.len() == 1 || idx >= self.owners.len() {
            return;
        }
        self.owners.remove(idx);

        let old_len = self.owners.len() + 1;
        // drop the removed row's files, then shift the tail down
        let _ = self.files.attach(&owner_tax_file_key(idx), None);
        let _ = self.files.attach(&owner_national_file_key(idx), None);
        for i in (idx + 1)..old_len {
            self.files
                .rename(&owner_tax_file_key(i), &owner_tax_file_key(i - 1));
            self.files
                .rename(&owner_national_file_key(i), &owner_national_file_key(i - 1));
        }
    }

    // ---- file bindings ----

    pub fn attach_business_tax_file(&mut self, file: Option<Attachment>) -> Result<(), AppError> {
        self.files.attach(BUSINESS_TAX_FILE, file)
    }

    pub fn attach_owner_tax_file(
        &mut self,
        idx: usize,
        file: Option<Attachment>,
    ) -> Result<(), AppError> {
        self.files.attach(&owner_tax_file_key(idx), file)
    }

    pub fn attach_owner_national_file(
        &mut self,
        idx: usize,
        file: Option<Attachment>,
    ) -> Result<(), AppError> {
        self.files.attach(&owner_national_file_key(idx), file)
    }

    pub fn attach_office_address_proof(
        &mut self,
        file: Option<Attachment>,
    ) -> Result<(), AppError> {
        self.files.attach(OFFICE_ADDRESS_PROOF, file)
    }

    // ---- validation & submission ----

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_msg.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Recompute the full error map. Returns true when the form may submit.
    pub fn validate_all(&mut self) -> bool {
        let mut e = ErrorMap::new();

        if self.business_tax_id.trim().is_empty() {
            e.insert(
                "business_tax_id".to_string(),
                "Business tax ID is required.".to_string(),
            );
        } else if let Err(reason) = validate_tax_id(&self.business_tax_id) {
            e.insert("business_tax_id".to_string(), reason);
        }

        for (i, owner) in self.owners.iter().enumerate() {
            if owner.tax_id.trim().is_empty() {
                e.insert(format!("owner_tax_id_{}", i), "Owner tax ID required.".to_string());
            } else if let Err(reason) = validate_tax_id(&owner.tax_id) {
                e.insert(format!("owner_tax_id_{}", i), reason);
            }

            if owner.national_id.trim().is_empty() {
                e.insert(
                    format!("owner_national_id_{}", i),
                    "Owner national ID required.".to_string(),
                );
            } else if let Err(reason) = validate_national_id(&owner.national_id) {
                e.insert(format!("owner_national_id_{}", i), reason);
            }

            require_file(
                &mut e,
                &self.files,
                &owner_tax_file_key(i),
                "Upload owner's tax ID copy.",
            );
            require_file(
                &mut e,
                &self.files,
                &owner_national_file_key(i),
                "Upload owner's national ID copy.",
            );
        }

        if self.mail_address.is_empty() {
            e.insert("mail_address".to_string(), "Mail address is required.".to_string());
        }
        if self.permanent_address.is_empty() {
            e.insert(
                "permanent_address".to_string(),
                "Permanent address is required.".to_string(),
            );
        }

        require_file(
            &mut e,
            &self.files,
            BUSINESS_TAX_FILE,
            "Upload business tax ID copy.",
        );
        require_file(
            &mut e,
            &self.files,
            OFFICE_ADDRESS_PROOF,
            "Upload office address proof.",
        );

        self.errors = e;
        self.errors.is_empty()
    }

    /// Serialize the form into the multipart payload the KYC endpoint
    /// expects. Owner rows are flattened with index-qualified keys.
    pub fn multipart(&self) -> Result<Form, AppError> {
        let mut form = Form::new().text("businessPAN", self.business_tax_id.trim().to_string());

        if let Some(file) = self.files.get(BUSINESS_TAX_FILE) {
            form = form.part("businessPANFile", file_part(file)?);
        }

        for (i, owner) in self.owners.iter().enumerate() {
            form = form.text(format!("owners[{}][pan]", i), owner.tax_id.trim().to_string());
            if let Some(file) = self.files.get(&owner_tax_file_key(i)) {
                form = form.part(format!("owners[{}][panFile]", i), file_part(file)?);
            }
            form = form.text(
                format!("owners[{}][aadhaar]", i),
                owner.national_id.trim().to_string(),
            );
            if let Some(file) = self.files.get(&owner_national_file_key(i)) {
                form = form.part(format!("owners[{}][aadhaarFile]", i), file_part(file)?);
            }
        }

        if let Some(file) = self.files.get(OFFICE_ADDRESS_PROOF) {
            form = form.part("officeAddressProof", file_part(file)?);
        }
        form = form
            .text("mailAddress", self.mail_address.clone())
            .text("permanentAddress", self.permanent_address.clone());

        Ok(form)
    }

    /// Validate, then issue exactly one submission request.
    ///
    /// On success returns the next route; on failure the field state is left
    /// intact and a single submission-level error is recorded for retry.
    pub async fn submit(&mut self, client: &IntakeApiClient) -> Result<Route, AppError> {
        self.success_msg = None;
        self.errors.remove(SUBMIT_ERROR_KEY);

        if self.submitting {
            return Err(AppError::Validation(
                "A submission is already in progress.".to_string(),
            ));
        }
        if !self.validate_all() {
            tracing::warn!("KYC submission blocked: {} field error(s)", self.errors.len());
            return Err(AppError::Validation(
                "Please fix the highlighted errors before submitting.".to_string(),
            ));
        }

        let payload = self.multipart()?;
        self.submitting = true;
        let result = client.submit_kyc(payload).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.success_msg = Some("KYC submitted successfully.".to_string());
                Ok(Route::BusinessProofUpload)
            }
            Err(err) => {
                self.errors
                    .insert(SUBMIT_ERROR_KEY.to_string(), err.to_string());
                Err(err)
            }
        }
    }

    /// Clear every field, file and message.
    pub fn reset_all(&mut self) {
        *self = Self::new();
    }
}
