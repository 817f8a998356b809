//! Income-proof upload step: three consecutive fiscal years of financial
//! statements plus a bank statement.

use reqwest::multipart::Form;

use crate::attachments::{Attachment, AttachmentSet};
use crate::errors::AppError;
use crate::form::{file_part, require_file, ErrorMap, SUBMIT_ERROR_KEY};
use crate::intake_client::IntakeApiClient;
use crate::router::Route;

/// Number of consecutive fiscal years the step collects.
pub const FISCAL_YEARS: usize = 3;

/// The three per-year document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    ProfitAndLoss,
    BalanceSheet,
    TaxReturn,
}

impl StatementKind {
    /// Multipart key prefix, per the endpoint's naming (`pl_fy1`, ...).
    fn key_prefix(&self) -> &'static str {
        match self {
            StatementKind::ProfitAndLoss => "pl",
            StatementKind::BalanceSheet => "bs",
            StatementKind::TaxReturn => "itr",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StatementKind::ProfitAndLoss => "P&L",
            StatementKind::BalanceSheet => "Balance sheet",
            StatementKind::TaxReturn => "Tax return",
        }
    }

    pub const ALL: [StatementKind; 3] = [
        StatementKind::ProfitAndLoss,
        StatementKind::BalanceSheet,
        StatementKind::TaxReturn,
    ];
}

const BANK_STATEMENT: &str = "bank_statement";

fn statement_key(kind: StatementKind, year: usize) -> String {
    // year is zero-based internally, one-based on the wire
    format!("{}_fy{}", kind.key_prefix(), year + 1)
}

/// Controller for the income-proof step.
pub struct IncomeProofForm {
    files: AttachmentSet,
    errors: ErrorMap,
    submitting: bool,
    success_msg: Option<String>,
}

impl Default for IncomeProofForm {
    fn default() -> Self {
        Self::new()
    }
}

impl IncomeProofForm {
    pub fn new() -> Self {
        Self {
            files: AttachmentSet::new(),
            errors: ErrorMap::new(),
            submitting: false,
            success_msg: None,
        }
    }

    /// Bind a statement file for one fiscal year (zero-based index).
    pub fn attach_statement(
        &mut self,
        kind: StatementKind,
        year: usize,
        file: Option<Attachment>,
    ) -> Result<(), AppError> {
        if year >= FISCAL_YEARS {
            return Err(AppError::InternalError(format!(
                "Fiscal year index {} out of range",
                year
            )));
        }
        self.files.attach(&statement_key(kind, year), file)
    }

    pub fn attach_bank_statement(&mut self, file: Option<Attachment>) -> Result<(), AppError> {
        self.files.attach(BANK_STATEMENT, file)
    }

    pub fn statement(&self, kind: StatementKind, year: usize) -> Option<&Attachment> {
        self.files.get(&statement_key(kind, year))
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

        for year in 0..FISCAL_YEARS {
            for kind in StatementKind::ALL {
                require_file(
                    &mut e,
                    &self.files,
                    &statement_key(kind, year),
                    &format!("{} for FY{} is required.", kind.label(), year + 1),
                );
            }
        }

        require_file(
            &mut e,
            &self.files,
            BANK_STATEMENT,
            "Last 6-12 months bank statement is mandatory.",
        );

        self.errors = e;
        self.errors.is_empty()
    }

    /// Serialize into the multipart payload: nine per-year binary parts plus
    /// the bank statement.
    pub fn multipart(&self) -> Result<Form, AppError> {
        let mut form = Form::new();

        for kind in StatementKind::ALL {
            for year in 0..FISCAL_YEARS {
                let key = statement_key(kind, year);
                if let Some(file) = self.files.get(&key) {
                    form = form.part(key, file_part(file)?);
                }
            }
        }
        if let Some(file) = self.files.get(BANK_STATEMENT) {
            form = form.part("bankStatementFile", file_part(file)?);
        }

        Ok(form)
    }

    /// Validate, then issue exactly one submission request; the dashboard is
    /// the next stop on success.
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
                "Income proof submission blocked: {} field error(s)",
                self.errors.len()
            );
            return Err(AppError::Validation(
                "Please fix all mandatory errors (3 consecutive years required).".to_string(),
            ));
        }

        let payload = self.multipart()?;
        self.submitting = true;
        let result = client.submit_income_proof(payload).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.success_msg = Some("Income proof submitted successfully!".to_string());
                Ok(Route::Dashboard)
            }
            Err(err) => {
                self.errors
                    .insert(SUBMIT_ERROR_KEY.to_string(), err.to_string());
                Err(err)
            }
        }
    }
}
