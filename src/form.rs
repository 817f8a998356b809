//! Shared plumbing for the step form controllers.

use std::collections::BTreeMap;

use reqwest::multipart::Part;

use crate::attachments::{Attachment, AttachmentSet};
use crate::errors::AppError;

/// Field-keyed validation errors. Recomputed in full on every validation
/// pass; an empty map means the form may submit.
pub type ErrorMap = BTreeMap<String, String>;

/// Error-map key for submission-level (network) failures.
pub const SUBMIT_ERROR_KEY: &str = "submit";

/// Record an error for a required file field if nothing is attached.
pub(crate) fn require_file(errors: &mut ErrorMap, files: &AttachmentSet, field: &str, msg: &str) {
    if !files.has(field) {
        errors.insert(field.to_string(), msg.to_string());
    }
}

/// Build a binary multipart part from an attachment.
pub(crate) fn file_part(attachment: &Attachment) -> Result<Part, AppError> {
    Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.content_type)
        .map_err(|e| AppError::InternalError(format!("Invalid content type: {}", e)))
}
