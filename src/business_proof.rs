//! Business-proof upload step: registration document, optional corporate
//! registration number, and the directors list that is mandatory only for
//! private-limited companies.

use reqwest::multipart::Form;

use crate::attachments::{Attachment, AttachmentSet};
use crate::errors::AppError;
use crate::form::{file_part, require_file, ErrorMap, SUBMIT_ERROR_KEY};
use crate::intake_client::IntakeApiClient;
use crate::router::Route;
use crate::validators::validate_registration_number;

const REGISTRATION_DOC: &str = "registration_doc";
const DIRECTORS_LIST: &str = "directors_list";

/// Controller for the business-proof step.
pub struct BusinessProofForm {
    registration_number: String,
    /// Sibling state driving the directors-list requirement.
    private_limited: bool,
    files: AttachmentSet,
    errors: ErrorMap,
    submitting: bool,
    success_msg: Option<String>,
}

impl Default for BusinessProofForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BusinessProofForm {
    pub fn new() -> Self {
        Self {
            registration_number: String::new(),
            private_limited: false,
            files: AttachmentSet::new(),
            errors: ErrorMap::new(),
            submitting: false,
            success_msg: None,
        }
    }

    pub fn set_registration_number(&mut self, value: &str) {
        self.registration_number = value.to_uppercase();
    }

    pub fn is_private_limited(&self) -> bool {
        self.private_limited
    }

    /// Toggle the private-limited flag.
    ///
    /// Turning it off makes the directors list irrelevant: the selection is
    /// cleared and the whole error map with it, so no stale entry survives.
    pub fn set_private_limited(&mut self, private_limited: bool) {
        if self.private_limited == private_limited {
            return;
        }
        self.private_limited = private_limited;
        let _ = self.files.attach(DIRECTORS_LIST, None);
        self.errors.clear();
    }

    pub fn attach_registration_doc(&mut self, file: Option<Attachment>) -> Result<(), AppError> {
        self.files.attach(REGISTRATION_DOC, file)
    }

    pub fn attach_directors_list(&mut self, file: Option<Attachment>) -> Result<(), AppError> {
        self.files.attach(DIRECTORS_LIST, file)
    }

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

        require_file(
            &mut e,
            &self.files,
            REGISTRATION_DOC,
            "Registration document upload is mandatory.",
        );

        // Optional field: empty is fine, malformed is not.
        if !self.registration_number.trim().is_empty() {
            if let Err(reason) = validate_registration_number(&self.registration_number) {
                e.insert("registration_number".to_string(), reason);
            }
        }

        if self.private_limited {
            require_file(
                &mut e,
                &self.files,
                DIRECTORS_LIST,
                "List of directors is mandatory for private-limited companies.",
            );
        }

        self.errors = e;
        self.errors.is_empty()
    }

    /// Serialize into the multipart payload the endpoint expects. The
    /// directors list is only included when applicable.
    pub fn multipart(&self) -> Result<Form, AppError> {
        let mut form = Form::new();

        if let Some(file) = self.files.get(REGISTRATION_DOC) {
            form = form.part("regDocFile", file_part(file)?);
        }
        form = form.text("cinNumber", self.registration_number.trim().to_string());
        if self.private_limited {
            if let Some(file) = self.files.get(DIRECTORS_LIST) {
                form = form.part("directorsListFile", file_part(file)?);
            }
        }

        Ok(form)
    }

    /// Validate, then issue exactly one submission request; next route on
    /// success, state left intact on failure.
    pub async fn submit(&mut self, client: &IntakeApiClient) -> Result<Route, AppError> {
        self.success_msg = None;
        self.errors.remove(SUBMIT_ERROR_KEY);

        if self.submitting {
            return Err(AppError::Validation(
                "A submission is already in progress.".to_string(),
            ));
        }
        if !self.validate_all() {
            tracing::warn!(
                "Business proof submission blocked: {} field error(s)",
                self.errors.len()
            );
            return Err(AppError::Validation(
                "Please review the highlighted errors.".to_string(),
            ));
        }

        let payload = self.multipart()?;
        self.submitting = true;
        let result = client.submit_business_proof(payload).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.success_msg = Some("Business proof submitted successfully!".to_string());
                Ok(Route::IncomeProofUpload)
            }
            Err(err) => {
                self.errors
                    .insert(SUBMIT_ERROR_KEY.to_string(), err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str) -> Attachment {
        Attachment::new(name, "application/pdf", b"%PDF-1.4".to_vec())
    }

    #[test]
    fn registration_doc_is_mandatory() {
        let mut form = BusinessProofForm::new();
        assert!(!form.validate_all());
        assert!(form.errors().contains_key(REGISTRATION_DOC));
    }

    #[test]
    fn empty_registration_number_is_not_an_error() {
        let mut form = BusinessProofForm::new();
        form.attach_registration_doc(Some(attachment("reg.pdf"))).unwrap();
        assert!(form.validate_all());
    }

    #[test]
    fn malformed_registration_number_is_an_error() {
        let mut form = BusinessProofForm::new();
        form.attach_registration_doc(Some(attachment("reg.pdf"))).unwrap();
        form.set_registration_number("X12345DL2000PTC123456");
        assert!(!form.validate_all());
        assert!(form.errors().contains_key("registration_number"));

        form.set_registration_number("L12345DL2000PTC123456");
        assert!(form.validate_all());
    }

    #[test]
    fn directors_list_required_only_for_private_limited() {
        let mut form = BusinessProofForm::new();
        form.attach_registration_doc(Some(attachment("reg.pdf"))).unwrap();

        assert!(form.validate_all());

        form.set_private_limited(true);
        assert!(!form.validate_all());
        assert!(form.errors().contains_key(DIRECTORS_LIST));

        form.attach_directors_list(Some(attachment("board.pdf"))).unwrap();
        assert!(form.validate_all());
    }

    #[test]
    fn toggling_private_limited_off_voids_the_error_and_selection() {
        let mut form = BusinessProofForm::new();
        form.set_private_limited(true);
        assert!(!form.validate_all());
        assert!(form.errors().contains_key(DIRECTORS_LIST));

        // no file was ever selected; the error must still disappear at once
        form.set_private_limited(false);
        assert!(!form.errors().contains_key(DIRECTORS_LIST));
        assert!(!form.files.has(DIRECTORS_LIST));
    }

    #[test]
    fn toggling_clears_a_previous_selection() {
        let mut form = BusinessProofForm::new();
        form.set_private_limited(true);
        form.attach_directors_list(Some(attachment("board.pdf"))).unwrap();

        form.set_private_limited(false);
        assert!(!form.files.has(DIRECTORS_LIST));

        // turning it back on does not resurrect the old file
        form.set_private_limited(true);
        assert!(!form.files.has(DIRECTORS_LIST));
    }
}
