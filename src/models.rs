use serde::{Deserialize, Serialize};

// ============ Applicant Record ============

/// A loan applicant as the intake API stores it.
///
/// Field names on the wire are the display-style keys the backend uses
/// (`"Applicant ID"`, `"Full Name"`, ...). The record is server-owned: the
/// client only ever holds a transient copy handed across navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    /// Server-assigned unique identifier.
    #[serde(rename = "Applicant ID")]
    pub applicant_id: String,
    /// Full name of the applicant.
    #[serde(rename = "Full Name")]
    pub full_name: String,
    /// Phone number (digits as submitted).
    #[serde(rename = "Phone")]
    pub phone: String,
    /// Requested loan amount, kept as the string the backend stores.
    #[serde(rename = "Loan Amount Requested", default)]
    pub loan_amount: String,
    /// Company category.
    #[serde(rename = "Company Type", default)]
    pub company_type: String,
    /// Loan category.
    #[serde(rename = "Loan Category", default)]
    pub loan_category: String,
    /// Industry the applicant operates in.
    #[serde(rename = "Applicant's Industry", default)]
    pub industry: String,
    /// Applicant category.
    #[serde(rename = "Applicant's Category", default)]
    pub category: String,
    /// "Yes" once the income documents went through; absent/"No" otherwise.
    #[serde(rename = "Income Document Submitted", default, skip_serializing_if = "Option::is_none")]
    pub income_submitted: Option<String>,
    /// "Yes" once KYC went through.
    #[serde(rename = "KYC Submitted", default, skip_serializing_if = "Option::is_none")]
    pub kyc_submitted: Option<String>,
    /// "Yes" once business proof went through.
    #[serde(rename = "Business Proof Submitted", default, skip_serializing_if = "Option::is_none")]
    pub business_proof_submitted: Option<String>,
}

impl Applicant {
    /// The fixed record the dashboard renders when nothing was handed off
    /// (direct navigation or a reload, which drops navigation state).
    pub fn placeholder() -> Self {
        Self {
            applicant_id: "N/A".to_string(),
            full_name: "Applicant Data Not Found".to_string(),
            phone: "\u{2014}".to_string(),
            loan_amount: "0".to_string(),
            company_type: "N/A".to_string(),
            loan_category: "N/A".to_string(),
            industry: "\u{2014}".to_string(),
            category: "\u{2014}".to_string(),
            income_submitted: Some("No".to_string()),
            kyc_submitted: Some("No".to_string()),
            business_proof_submitted: Some("No".to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.applicant_id == "N/A"
    }

    pub fn flag(&self, field: DocumentFlag) -> Option<&str> {
        match field {
            DocumentFlag::Income => self.income_submitted.as_deref(),
            DocumentFlag::Kyc => self.kyc_submitted.as_deref(),
            DocumentFlag::BusinessProof => self.business_proof_submitted.as_deref(),
        }
    }
}

// ============ Company Category ============

/// The three company categories the intake flow accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyType {
    Services,
    Trading,
    Manufacturing,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Services => "Services",
            CompanyType::Trading => "Trading",
            CompanyType::Manufacturing => "Manufacturing",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Services" => Some(CompanyType::Services),
            "Trading" => Some(CompanyType::Trading),
            "Manufacturing" => Some(CompanyType::Manufacturing),
            _ => None,
        }
    }

    /// Initial used by the degraded-mode local identifier fallback.
    pub fn initial(&self) -> char {
        match self {
            CompanyType::Services => 'S',
            CompanyType::Trading => 'T',
            CompanyType::Manufacturing => 'M',
        }
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Document Submission Flags ============

/// The three per-document boolean-as-string flags on an applicant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFlag {
    Income,
    Kyc,
    BusinessProof,
}

impl DocumentFlag {
    /// The record key the PATCH endpoint expects.
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentFlag::Income => "Income Document Submitted",
            DocumentFlag::Kyc => "KYC Submitted",
            DocumentFlag::BusinessProof => "Business Proof Submitted",
        }
    }

    /// Human label used by the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentFlag::Income => "Income Document",
            DocumentFlag::Kyc => "KYC",
            DocumentFlag::BusinessProof => "Business Proof",
        }
    }

    pub const ALL: [DocumentFlag; 3] = [
        DocumentFlag::Income,
        DocumentFlag::Kyc,
        DocumentFlag::BusinessProof,
    ];
}

// ============ API Request/Response Models ============

/// Request payload for creating a new applicant.
#[derive(Debug, Serialize)]
pub struct CreateApplicantRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub phone: String,
    #[serde(rename = "companyType")]
    pub company_type: String,
    #[serde(rename = "applicantID")]
    pub applicant_id: String,
}

/// Response payload for applicant creation.
#[derive(Debug, Deserialize)]
pub struct CreateApplicantResponse {
    pub applicant: Applicant,
}

/// Response payload of the identifier-generation endpoint.
#[derive(Debug, Deserialize)]
pub struct GenerateIdResponse {
    #[serde(rename = "applicantID")]
    pub applicant_id: String,
}

/// Request payload for OTP issuance.
#[derive(Debug, Serialize)]
pub struct SendOtpRequest {
    pub phone: String,
}

/// Response payload of OTP issuance. Demo-only: the server hands the code
/// straight back to the client.
#[derive(Debug, Deserialize)]
pub struct SendOtpResponse {
    pub otp: String,
}
