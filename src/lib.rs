//! SME Loan Intake Client Library
//!
//! This library provides the client side of the SME loan-applicant intake
//! flow: field validators, file attachment handling, the step form
//! controllers, applicant lookup/creation with OTP confirmation, the
//! dashboard presenter, and the typed HTTP client for the remote intake API.
//!
//! # Modules
//!
//! - `attachments`: Per-field file selection and ephemeral previews.
//! - `business_proof`: Business-proof upload step controller.
//! - `config`: Configuration management.
//! - `dashboard`: Dashboard presenter and per-document updates.
//! - `errors`: Error handling types.
//! - `form`: Shared form plumbing (error maps, multipart parts).
//! - `income_proof`: Income-proof upload step controller.
//! - `intake_client`: Intake API client.
//! - `kyc`: KYC upload step controller.
//! - `models`: Core data models.
//! - `otp`: OTP challenge and resend cooldown.
//! - `router`: Route table and navigation-scoped state.
//! - `session`: Applicant lookup/create flow.
//! - `validators`: Identifier and phone validators.
//! - `wizard`: Interactive terminal wizard.

pub mod attachments;
pub mod business_proof;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod form;
pub mod income_proof;
pub mod intake_client;
pub mod kyc;
pub mod models;
pub mod otp;
pub mod router;
pub mod session;
pub mod validators;
pub mod wizard;
