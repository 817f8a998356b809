//! Dashboard: read-only presentation of a handed-off applicant record plus
//! the per-document "mark submitted" action.

use crate::errors::AppError;
use crate::intake_client::IntakeApiClient;
use crate::models::{Applicant, DocumentFlag};

/// One row of the required-documents list.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRow {
    pub flag: DocumentFlag,
    pub submitted: bool,
}

/// Render model over whatever record was handed across navigation.
///
/// With no hand-off (direct navigation, or the state-dropping reload that
/// follows a successful update) it presents the fixed placeholder record
/// instead of re-fetching; the dashboard never queries by identifier.
pub struct Dashboard {
    applicant: Applicant,
}

impl Dashboard {
    pub fn new(state: Option<Applicant>) -> Self {
        Self {
            applicant: state.unwrap_or_else(Applicant::placeholder),
        }
    }

    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }

    pub fn document_rows(&self) -> Vec<DocumentRow> {
        DocumentFlag::ALL
            .iter()
            .map(|&flag| DocumentRow {
                flag,
                submitted: self.applicant.flag(flag) == Some("Yes"),
            })
            .collect()
    }

    fn submitted_count(&self) -> usize {
        self.document_rows().iter().filter(|r| r.submitted).count()
    }

    /// "{submitted}/3 Completed", pinned to "0/3 Completed" for the
    /// placeholder record.
    pub fn doc_status(&self) -> String {
        if self.applicant.is_placeholder() {
            return "0/3 Completed".to_string();
        }
        format!("{}/{} Completed", self.submitted_count(), DocumentFlag::ALL.len())
    }

    /// Loan amount for display: "₹{amount}", or "N/A" when the stored
    /// amount is "0".
    pub fn loan_display(&self) -> String {
        if self.applicant.loan_amount == "0" {
            "N/A".to_string()
        } else {
            format!("\u{20b9}{}", self.applicant.loan_amount)
        }
    }

    /// Issue the single-field update setting one document flag to "Yes".
    ///
    /// No optimistic local update and no rollback: on success the caller
    /// must fully reload the presenting surface (dropping navigation state);
    /// on failure the flag simply stays unsubmitted and the error is
    /// surfaced as a message.
    pub async fn mark_submitted(
        &self,
        client: &IntakeApiClient,
        flag: DocumentFlag,
    ) -> Result<(), AppError> {
        client
            .update_applicant_field(&self.applicant.applicant_id, flag.field_name())
            .await
    }
}
