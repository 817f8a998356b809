//! Interactive terminal wizard driving the intake flow.
//!
//! One screen per route, same order as the original flow: start →
//! check-client → dashboard → KYC → business proof → income proof. Screens
//! are thin prompt loops over the library controllers; no business logic
//! lives here. On a failed submission the collected state stays put and the
//! prompts re-run with blank input keeping the current value.

use std::io::Write;

use crate::attachments::Attachment;
use crate::business_proof::BusinessProofForm;
use crate::dashboard::Dashboard;
use crate::errors::AppError;
use crate::income_proof::{IncomeProofForm, StatementKind, FISCAL_YEARS};
use crate::intake_client::IntakeApiClient;
use crate::kyc::KycForm;
use crate::models::CompanyType;
use crate::otp::{CooldownTimer, OtpStatus};
use crate::router::{Navigator, Route};
use crate::session::{ApplicantSession, SessionMode};

/// Run the wizard until the user quits.
pub async fn run(client: IntakeApiClient) -> Result<(), AppError> {
    let mut nav = Navigator::new();

    loop {
        match nav.route() {
            Route::Start => {
                println!("SME Business Loan Pre-Screening");
                println!("-------------------------------");
                println!("Press Enter to proceed (or type 'q' to quit).");
                if prompt("")?.eq_ignore_ascii_case("q") {
                    return Ok(());
                }
                nav.navigate(Route::CheckClient);
            }
            Route::CheckClient => check_client_screen(&client, &mut nav).await?,
            Route::Dashboard => {
                if dashboard_screen(&client, &mut nav).await? {
                    return Ok(());
                }
            }
            Route::UserNotFound => {
                // In the table but unreachable from the lookup flow
                println!("Applicant not found.");
                nav.navigate(Route::CheckClient);
            }
            Route::KycUpload => kyc_screen(&client, &mut nav).await?,
            Route::BusinessProofUpload => business_proof_screen(&client, &mut nav).await?,
            Route::IncomeProofUpload => income_proof_screen(&client, &mut nav).await?,
        }
    }
}

async fn check_client_screen(
    client: &IntakeApiClient,
    nav: &mut Navigator,
) -> Result<(), AppError> {
    let mut session = ApplicantSession::new();

    println!("\n[1] Existing applicant  [2] New applicant");
    if prompt("Choose")? == "2" {
        session.set_mode(SessionMode::New);
    }

    match session.mode() {
        SessionMode::Existing => {
            session.lookup.set_applicant_id(&prompt("Applicant ID")?);
            match session.lookup.fetch(client).await {
                Ok(applicant) => nav.navigate_with(Route::Dashboard, applicant),
                Err(err) => {
                    // report in place, never route to the not-found view
                    println!("Applicant not found! ({})", err);
                }
            }
        }
        SessionMode::New => new_applicant_flow(client, nav, &mut session).await?,
    }
    Ok(())
}

async fn new_applicant_flow(
    client: &IntakeApiClient,
    nav: &mut Navigator,
    session: &mut ApplicantSession,
) -> Result<(), AppError> {
    session.draft.set_full_name(&prompt("Full name")?);
    session.draft.set_phone(&prompt("Phone number")?);
    loop {
        let choice = prompt("Company type (Services/Trading/Manufacturing)")?;
        match CompanyType::parse(&choice) {
            Some(ct) => {
                session.draft.set_company_type(ct);
                break;
            }
            None => println!("Please select a Company Type."),
        }
    }

    if let Err(err) = session.draft.request_otp(client).await {
        println!("Failed to send OTP. Please try again. ({})", err);
        return Ok(());
    }
    println!("OTP has been sent to the given phone number.");
    // the resend cooldown lives only on this screen; leaving it drops the timer
    let mut cooldown = CooldownTimer::start();

    loop {
        let entry = prompt("Enter OTP ('resend' to request a new code)")?;
        if entry.eq_ignore_ascii_case("resend") {
            if !cooldown.can_resend() {
                println!("Resend in {}s", cooldown.remaining());
            } else {
                match session.draft.request_otp(client).await {
                    Ok(()) => {
                        println!("OTP has been sent to the given phone number.");
                        cooldown = CooldownTimer::start();
                    }
                    Err(err) => println!("Failed to send OTP. Please try again. ({})", err),
                }
            }
            continue;
        }
        match session.draft.enter_otp(&entry) {
            OtpStatus::Matched => break,
            OtpStatus::Mismatched => println!("Incorrect OTP."),
            OtpStatus::Pending => println!("Enter all 6 digits."),
        }
    }

    match session.draft.create(client).await {
        Ok(applicant) => nav.navigate_with(Route::Dashboard, applicant),
        Err(err) => println!("Failed to create applicant. Try again. ({})", err),
    }
    Ok(())
}

/// Returns true when the user chose to quit.
async fn dashboard_screen(client: &IntakeApiClient, nav: &mut Navigator) -> Result<bool, AppError> {
    let dashboard = Dashboard::new(nav.state().cloned());
    let applicant = dashboard.applicant();

    println!(
        "\nDashboard — ID: {}  Phone: {}",
        applicant.applicant_id, applicant.phone
    );
    println!(
        "Loan requested: {}  Company type: {}  Loan category: {}",
        dashboard.loan_display(),
        applicant.company_type,
        applicant.loan_category
    );
    println!("Documents: {}", dashboard.doc_status());
    for (i, row) in dashboard.document_rows().iter().enumerate() {
        let status = if row.submitted { "Yes" } else { "pending" };
        println!("  [{}] {} — {}", i + 1, row.flag.label(), status);
    }

    println!("Actions: [u <n>] mark submitted  [k] KYC upload  [c] check client  [q] quit");
    let action = prompt("Action")?;
    match action.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["u", n] => {
            let row = n
                .parse::<usize>()
                .ok()
                .and_then(|n| dashboard.document_rows().get(n.saturating_sub(1)).copied());
            match row {
                Some(row) => match dashboard.mark_submitted(client, row.flag).await {
                    Ok(()) => {
                        println!("{} updated successfully", row.flag.field_name());
                        // full reload: navigation state is gone afterwards
                        nav.reload();
                    }
                    Err(err) => println!("Failed to update ({})", err),
                },
                None => println!("No such document."),
            }
        }
        ["k"] => nav.navigate(Route::KycUpload),
        ["c"] => nav.navigate(Route::CheckClient),
        ["q"] => return Ok(true),
        _ => println!("Unknown action."),
    }
    Ok(false)
}

async fn kyc_screen(client: &IntakeApiClient, nav: &mut Navigator) -> Result<(), AppError> {
    let mut form = KycForm::new();
    println!("\nKYC Verification — Business");

    loop {
        if let Some(v) = prompt_keep("Business tax ID (AAAAA0000A)")? {
            form.set_business_tax_id(&v);
        }
        if let Some(file) = prompt_file("Business tax ID copy (path)")? {
            form.attach_business_tax_file(Some(file))?;
        }

        let mut idx = 0;
        loop {
            println!("Owner #{}", idx + 1);
            if let Some(v) = prompt_keep("  Owner tax ID")? {
                form.set_owner_tax_id(idx, &v);
            }
            if let Some(file) = prompt_file("  Owner tax ID copy (path)")? {
                form.attach_owner_tax_file(idx, Some(file))?;
            }
            if let Some(v) = prompt_keep("  Owner national ID (12 digits)")? {
                form.set_owner_national_id(idx, &v);
            }
            if let Some(file) = prompt_file("  Owner national ID copy (path)")? {
                form.attach_owner_national_file(idx, Some(file))?;
            }

            idx += 1;
            if idx < form.owners().len() {
                continue;
            }
            if prompt("Add another owner? (y/N)")?.eq_ignore_ascii_case("y") {
                form.add_owner();
            } else {
                break;
            }
        }

        if let Some(file) = prompt_file("Office address proof (path)")? {
            form.attach_office_address_proof(Some(file))?;
        }
        if let Some(v) = prompt_keep("Mail address")? {
            form.set_mail_address(&v);
        }
        if prompt("Permanent address same as mail? (y/N)")?.eq_ignore_ascii_case("y") {
            form.set_same_as_mail(true);
        } else {
            form.set_same_as_mail(false);
            if let Some(v) = prompt_keep("Permanent address")? {
                form.set_permanent_address(&v);
            }
        }

        match form.submit(client).await {
            Ok(next) => {
                println!("KYC submitted successfully.");
                nav.navigate(next);
                return Ok(());
            }
            Err(_) => {
                print_errors(form.errors());
                match prompt("Try again? (Y/n, x to reset the form)")?.as_str() {
                    "n" | "N" => {
                        nav.navigate(Route::Dashboard);
                        return Ok(());
                    }
                    "x" | "X" => form.reset_all(),
                    _ => {}
                }
            }
        }
    }
}

async fn business_proof_screen(
    client: &IntakeApiClient,
    nav: &mut Navigator,
) -> Result<(), AppError> {
    let mut form = BusinessProofForm::new();
    println!("\nBusiness Registration & Ownership Proof");

    loop {
        if let Some(file) = prompt_file("Registration document (path)")? {
            form.attach_registration_doc(Some(file))?;
        }
        if let Some(v) = prompt_keep("Registration number (blank if not applicable)")? {
            form.set_registration_number(&v);
        }
        let pvt = prompt("Private limited company? (y/N)")?.eq_ignore_ascii_case("y");
        form.set_private_limited(pvt);
        if pvt {
            if let Some(file) = prompt_file("List of directors (path)")? {
                form.attach_directors_list(Some(file))?;
            }
        }

        match form.submit(client).await {
            Ok(next) => {
                println!("Business proof submitted successfully!");
                nav.navigate(next);
                return Ok(());
            }
            Err(_) => {
                print_errors(form.errors());
                if prompt("Try again? (Y/n)")?.eq_ignore_ascii_case("n") {
                    nav.navigate(Route::IncomeProofUpload);
                    return Ok(());
                }
            }
        }
    }
}

async fn income_proof_screen(
    client: &IntakeApiClient,
    nav: &mut Navigator,
) -> Result<(), AppError> {
    let mut form = IncomeProofForm::new();
    println!("\nIncome & Financial Proof (3 consecutive years)");

    loop {
        for year in 0..FISCAL_YEARS {
            for (kind, label) in [
                (StatementKind::ProfitAndLoss, "P&L"),
                (StatementKind::BalanceSheet, "Balance sheet"),
                (StatementKind::TaxReturn, "Tax return"),
            ] {
                let q = format!("{} — FY{} (path)", label, year + 1);
                if let Some(file) = prompt_file(&q)? {
                    form.attach_statement(kind, year, Some(file))?;
                }
            }
        }
        if let Some(file) = prompt_file("Bank statement, last 6-12 months (path)")? {
            form.attach_bank_statement(Some(file))?;
        }

        match form.submit(client).await {
            Ok(next) => {
                println!("Income proof submitted successfully!");
                nav.navigate(next);
                return Ok(());
            }
            Err(_) => {
                print_errors(form.errors());
                if prompt("Try again? (Y/n)")?.eq_ignore_ascii_case("n") {
                    nav.navigate(Route::Dashboard);
                    return Ok(());
                }
            }
        }
    }
}

fn print_errors(errors: &crate::form::ErrorMap) {
    if errors.is_empty() {
        return;
    }
    println!("Please fix the highlighted errors before submitting:");
    for (field, reason) in errors {
        println!("  {}: {}", field, reason);
    }
}

fn prompt(label: &str) -> Result<String, AppError> {
    if !label.is_empty() {
        print!("{}: ", label);
    }
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for a text value; blank input keeps the current one.
fn prompt_keep(label: &str) -> Result<Option<String>, AppError> {
    let value = prompt(label)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Prompt for a file path. Blank input keeps whatever is attached.
fn prompt_file(label: &str) -> Result<Option<Attachment>, AppError> {
    let path = prompt(label)?;
    if path.is_empty() {
        return Ok(None);
    }
    match Attachment::from_path(&path) {
        Ok(attachment) => Ok(Some(attachment)),
        Err(err) => {
            println!("Could not read file: {}", err);
            Ok(None)
        }
    }
}
